use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::info;

/// Digital output pins.
pub trait PinDriver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Claim `pin` as an output driven low.
    fn export_output(&self, pin: u32) -> io::Result<()>;

    fn write(&self, pin: u32, high: bool) -> io::Result<()>;
}

fn level(high: bool) -> &'static str {
    if high {
        "HIGH"
    } else {
        "LOW"
    }
}

/// No hardware; every transition is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedPins;

impl PinDriver for SimulatedPins {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn export_output(&self, pin: u32) -> io::Result<()> {
        info!(pin, "[simulated] pin exported as output");
        Ok(())
    }

    fn write(&self, pin: u32, high: bool) -> io::Result<()> {
        info!(pin, level = level(high), "[simulated] pin set");
        Ok(())
    }
}

/// Linux GPIO sysfs interface (`<root>/export`, `<root>/gpioN/{direction,value}`).
#[derive(Debug, Clone)]
pub struct SysfsPins {
    root: PathBuf,
}

impl SysfsPins {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}"))
    }
}

impl PinDriver for SysfsPins {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn export_output(&self, pin: u32) -> io::Result<()> {
        let dir = self.pin_dir(pin);
        if !dir.exists() {
            fs::write(self.root.join("export"), pin.to_string())?;
        }
        fs::write(dir.join("direction"), "out")?;
        fs::write(dir.join("value"), "0")?;
        Ok(())
    }

    fn write(&self, pin: u32, high: bool) -> io::Result<()> {
        fs::write(self.pin_dir(pin).join("value"), if high { "1" } else { "0" })?;
        info!(pin, level = level(high), "pin set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sysfs_export_sets_direction_and_low() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("gpio22")).unwrap();
        let pins = SysfsPins::new(dir.path());

        pins.export_output(22).unwrap();
        let direction = std::fs::read_to_string(dir.path().join("gpio22/direction")).unwrap();
        assert_eq!(direction, "out");

        pins.write(22, true).unwrap();
        let value = std::fs::read_to_string(dir.path().join("gpio22/value")).unwrap();
        assert_eq!(value, "1");
    }

    #[test]
    fn sysfs_write_to_missing_pin_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pins = SysfsPins::new(dir.path());
        assert!(pins.write(5, true).is_err());
    }
}
