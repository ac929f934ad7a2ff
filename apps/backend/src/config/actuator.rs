use std::path::PathBuf;

use crate::actuator::DriverChoice;
use crate::error::AppError;

const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

/// `ACTUATOR_DRIVER` = `sim` | `sysfs` | `auto` (default).
pub fn driver_choice<F>(lookup: &F) -> Result<DriverChoice, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let root = lookup("GPIO_SYSFS_ROOT")
        .filter(|r| !r.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GPIO_ROOT));

    let raw = lookup("ACTUATOR_DRIVER").unwrap_or_else(|| "auto".to_string());
    match raw.trim().to_ascii_lowercase().as_str() {
        "sim" | "simulated" => Ok(DriverChoice::Simulated),
        "sysfs" | "gpio" => Ok(DriverChoice::Sysfs(root)),
        "auto" | "" => Ok(DriverChoice::Auto(root)),
        other => Err(AppError::config(format!(
            "ACTUATOR_DRIVER must be one of sim, sysfs, auto; got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_driver_is_rejected() {
        let lookup = |name: &str| (name == "ACTUATOR_DRIVER").then(|| "relay".to_string());
        assert!(driver_choice(&lookup).is_err());
    }

    #[test]
    fn sysfs_uses_custom_root() {
        let lookup = |name: &str| match name {
            "ACTUATOR_DRIVER" => Some("SYSFS".to_string()),
            "GPIO_SYSFS_ROOT" => Some("/tmp/gpio".to_string()),
            _ => None,
        };
        assert_eq!(
            driver_choice(&lookup).unwrap(),
            DriverChoice::Sysfs(PathBuf::from("/tmp/gpio"))
        );
    }
}
