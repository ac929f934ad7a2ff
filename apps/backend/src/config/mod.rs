//! Configuration loaded from environment variables at start-up.
//!
//! Everything is read through a lookup function so tests can feed a map
//! instead of mutating the process environment.

mod actuator;
mod room;

use std::env;
use std::path::PathBuf;

use crate::actuator::DriverChoice;
use crate::domain::RoomSettings;
use crate::error::AppError;

pub use actuator::driver_choice;
pub use room::room_settings;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 64 * 1024;

/// Centralized application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_json_payload_size: usize,
    pub room: RoomSettings,
    pub actuator: DriverChoice,
    /// JSON question bank; the built-in bank is used when unset.
    pub question_bank_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "BACKEND_PORT", DEFAULT_PORT)?;
        let max_json_payload_size =
            parse_var(&lookup, "MAX_JSON_PAYLOAD_SIZE", DEFAULT_MAX_JSON_PAYLOAD_SIZE)?;

        let room = room_settings(&lookup)?;
        let actuator = driver_choice(&lookup)?;
        let question_bank_path = lookup("QUESTION_BANK_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            max_json_payload_size,
            room,
            actuator,
            question_bank_path,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.room, RoomSettings::default());
        assert!(config.question_bank_path.is_none());
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("BACKEND_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("BACKEND_PORT"));
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_lookup(lookup_from(&[
            ("BACKEND_HOST", "127.0.0.1"),
            ("BACKEND_PORT", "9000"),
            ("QUESTION_BANK_PATH", "/tmp/q.json"),
            ("ACTUATOR_DRIVER", "sim"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.actuator, DriverChoice::Simulated);
        assert_eq!(
            config.question_bank_path,
            Some(PathBuf::from("/tmp/q.json"))
        );
    }
}
