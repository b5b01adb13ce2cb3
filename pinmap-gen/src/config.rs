//! TOML pin layout loader
//!
//! Layout files list pins as arrays of tables so declaration order is kept:
//!
//! ```toml
//! [[common]]
//! pin = "A0"
//! name = "FWD_PIN"
//! role = "analog_in"
//!
//! [[common]]
//! pin = "B0"            # no name: explicitly unassigned
//!
//! [[variant.development]]
//! pin = "^E1"           # ^ enables the weak pull-up
//! name = "TUNE_BUTTON_PIN"
//! role = "button"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use pinmap_core::{Layout, PinEntry, PinLocation, PinMap, PinmapError, RoleSpec};

use crate::error::GenError;

/// Layout file errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid TOML or unexpected structure
    Toml(toml::de::Error),
    /// Entry is missing a field its other fields require
    MissingField {
        section: String,
        pin: String,
        field: &'static str,
    },
    /// Entry rejected by the pin model
    Entry {
        section: String,
        pin: String,
        source: PinmapError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml(e) => write!(f, "{}", e),
            ConfigError::MissingField {
                section,
                pin,
                field,
            } => write!(f, "[{}] {}: missing '{}'", section, pin, field),
            ConfigError::Entry {
                section,
                pin,
                source,
            } => write!(f, "[{}] {}: {}", section, pin, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml(e) => Some(e),
            ConfigError::MissingField { .. } => None,
            ConfigError::Entry { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFile {
    #[serde(default)]
    common: Vec<EntryDecl>,
    /// Variant sections in file order; values are arrays of entries
    #[serde(default)]
    variant: toml::Table,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryDecl {
    pin: String,
    name: Option<String>,
    role: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse layout text
pub fn parse_layout(text: &str) -> Result<Layout, ConfigError> {
    let file: LayoutFile = toml::from_str(text).map_err(ConfigError::Toml)?;

    let mut layout = Layout::new(build_map("common", &file.common)?);
    for (name, value) in file.variant {
        let decls: Vec<EntryDecl> = value.try_into().map_err(ConfigError::Toml)?;
        layout = layout.with_variant(&name, build_map(&format!("variant.{}", name), &decls)?);
    }

    Ok(layout)
}

/// Read and parse a layout file
pub fn load_layout(path: &Path) -> Result<Layout, GenError> {
    let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_layout(&text).map_err(|source| GenError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn build_map(section: &str, decls: &[EntryDecl]) -> Result<PinMap, ConfigError> {
    let mut map = PinMap::new();

    for decl in decls {
        let entry_error = |source: PinmapError| ConfigError::Entry {
            section: section.to_string(),
            pin: decl.pin.clone(),
            source,
        };

        let (location, pull_up) =
            PinLocation::parse_with_modifiers(&decl.pin).map_err(entry_error)?;
        let entry = build_entry(section, decl, pull_up)?;
        map.insert(location, entry).map_err(entry_error)?;
    }

    Ok(map)
}

fn build_entry(section: &str, decl: &EntryDecl, pull_up: bool) -> Result<PinEntry, ConfigError> {
    let missing = |field| ConfigError::MissingField {
        section: section.to_string(),
        pin: decl.pin.clone(),
        field,
    };

    let has_role = decl.role.is_some() || !decl.tags.is_empty();
    let name = match (&decl.name, has_role) {
        (None, false) if !pull_up => return Ok(PinEntry::Unassigned),
        (None, _) => return Err(missing("name")),
        (Some(_), false) => return Err(missing("role")),
        (Some(name), true) => name,
    };

    let mut role = RoleSpec {
        shortcut: decl.role.clone(),
        tags: decl.tags.clone(),
    };
    if pull_up {
        role = role.with_tag("pullup");
    }

    PinEntry::assigned(name, &role).map_err(|source| ConfigError::Entry {
        section: section.to_string(),
        pin: decl.pin.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::{Tag, TagSet};

    fn loc(s: &str) -> PinLocation {
        s.parse().unwrap()
    }

    const LAYOUT: &str = r#"
[[common]]
pin = "A0"
name = "FWD_PIN"
role = "analog_in"

[[common]]
pin = "A6"
name = "FP_CLOCK_PIN"
tags = ["output", "gpio"]

[[common]]
pin = "B6"

[[variant.release]]
pin = "^B6"
name = "TUNE_BUTTON_PIN"
role = "button"

[[variant.development]]
pin = "D2"
name = "DEBUG_TX_PIN"
role = "uart_tx"
"#;

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout(LAYOUT).unwrap();

        assert_eq!(layout.common.len(), 3);
        assert_eq!(layout.common.get(loc("B6")), Some(&PinEntry::Unassigned));
        assert_eq!(
            layout.variant_names().collect::<Vec<_>>(),
            ["release", "development"]
        );

        let clock = layout.common.get(loc("A6")).unwrap().assignment().unwrap();
        assert_eq!(clock.tags, TagSet::OUTPUT | TagSet::GPIO);
    }

    #[test]
    fn test_pullup_modifier_adds_tag() {
        let layout = parse_layout(LAYOUT).unwrap();
        let tune = layout.variant("release").unwrap().get(loc("B6")).unwrap();
        let tags = tune.assignment().unwrap().tags;
        assert!(tags.has(Tag::Pullup));
        assert!(tags.has(Tag::Button));
    }

    #[test]
    fn test_keeps_declared_order() {
        let layout = parse_layout(LAYOUT).unwrap();
        let order: Vec<String> = layout.common.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(order, ["A0", "A6", "B6"]);
    }

    #[test]
    fn test_name_without_role() {
        let err = parse_layout("[[common]]\npin = \"A2\"\nname = \"POWER_LED_PIN\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "role", .. }));
    }

    #[test]
    fn test_role_without_name() {
        let err = parse_layout("[[common]]\npin = \"A2\"\nrole = \"led\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_unknown_tag_reports_location() {
        let err = parse_layout(
            "[[common]]\npin = \"A7\"\nname = \"RADIO_CMD_PIN\"\ntags = [\"output\", \"gpi0\"]\n",
        )
        .unwrap_err();

        match err {
            ConfigError::Entry {
                section,
                pin,
                source,
            } => {
                assert_eq!(section, "common");
                assert_eq!(pin, "A7");
                assert_eq!(
                    source,
                    PinmapError::UnknownTag {
                        tag: "gpi0".into()
                    }
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_location_in_section() {
        let err = parse_layout("[[common]]\npin = \"B0\"\n\n[[common]]\npin = \"B0\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Entry {
                source: PinmapError::DuplicateLocation { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_layout("[[common]]\npin = \"B0\"\ninverted = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_variant_must_be_entry_array() {
        let err = parse_layout("[variant]\nrelease = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = parse_layout("[[variant.release]]\npin = \"B0\"\ninverted = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_bad_location() {
        for pin in ["B9", "B04", "^^B6", " B6"] {
            let text = format!(
                "[[common]]\npin = \"{}\"\nname = \"TUNE_BUTTON_PIN\"\nrole = \"button\"\n",
                pin
            );
            let err = parse_layout(&text).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Entry {
                        source: PinmapError::InvalidLocation { .. },
                        ..
                    }
                ),
                "{}: {}",
                pin,
                err
            );
        }
    }
}
