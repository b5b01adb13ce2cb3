//! Pin-list files
//!
//! The resolved pins of one run, stored as TOML:
//!
//! ```toml
//! [[pin]]
//! name = "POWER_LED_PIN"
//! port = "A"
//! pin = "2"
//! usage = { input = false, output = true, gpio = true, ... }
//! direction = { input = false, output = true }
//! registers = [{ register = "TRIS", value = "0" }]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pinmap_core::PinRecord;

use crate::config::ConfigError;
use crate::error::GenError;

#[derive(Serialize)]
struct PinListRef<'a> {
    pin: &'a [PinRecord],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PinList {
    #[serde(default)]
    pin: Vec<PinRecord>,
}

/// Serialize records as a pin-list document
pub fn to_toml(records: &[PinRecord]) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&PinListRef { pin: records })
}

/// Parse pin-list text
pub fn parse_pin_list(text: &str) -> Result<Vec<PinRecord>, ConfigError> {
    let list: PinList = toml::from_str(text).map_err(ConfigError::Toml)?;
    Ok(list.pin)
}

/// Read and parse a pin-list file
pub fn load_pin_list(path: &Path) -> Result<Vec<PinRecord>, GenError> {
    let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_pin_list(&text).map_err(|source| GenError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::{resolve_registers, Assignment, Pic18Channels, RoleSpec};

    fn record(loc: &str, name: &str, role: &str) -> PinRecord {
        let a = Assignment::from_role(name, &RoleSpec::shortcut(role)).unwrap();
        let pin = resolve_registers(loc.parse().unwrap(), &a, &Pic18Channels).unwrap();
        PinRecord::from(&pin)
    }

    #[test]
    fn test_pin_list_reads_back() {
        let records = vec![
            record("A0", "FWD_PIN", "analog_in"),
            record("C3", "BYPASS_LED_PIN", "relay"),
        ];

        let text = to_toml(&records).unwrap();
        assert_eq!(parse_pin_list(&text).unwrap(), records);
    }

    #[test]
    fn test_empty_pin_list() {
        assert!(parse_pin_list("").unwrap().is_empty());
    }

    #[test]
    fn test_pin_list_missing_field() {
        let err = parse_pin_list("[[pin]]\nname = \"FWD_PIN\"\nport = \"A\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
