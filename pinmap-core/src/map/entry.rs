//! Pin entries and single-layer pin maps

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::capability::{expand, RoleSpec, TagSet};
use crate::error::PinmapError;
use crate::location::PinLocation;
use crate::Result;

/// Maximum symbolic name length
pub const MAX_NAME_LEN: usize = 32;

/// Symbolic pin name used by firmware code
pub type Name = heapless::String<MAX_NAME_LEN>;

/// A symbolic role bound to a physical pin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Assignment {
    /// Identifier firmware uses for the pin (e.g., "POWER_LED_PIN")
    pub name: Name,
    /// Expanded tag set
    pub tags: TagSet,
}

impl Assignment {
    /// Create an assignment from an already expanded tag set
    pub fn new(name: &str, tags: TagSet) -> Result<Self> {
        if !is_identifier(name) {
            return Err(PinmapError::InvalidName {
                name: name.to_string(),
            });
        }

        let name = Name::try_from(name).map_err(|_| PinmapError::InvalidName {
            name: name.to_string(),
        })?;

        Ok(Self { name, tags })
    }

    /// Create an assignment by expanding a role
    pub fn from_role(name: &str, role: &RoleSpec) -> Result<Self> {
        Self::new(name, expand(role)?)
    }
}

/// What a map says about one physical location
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinEntry {
    /// Explicitly unused; suppresses all generation for the location
    Unassigned,
    /// Pin in use
    Assigned(Assignment),
}

impl PinEntry {
    /// Shorthand for an assigned entry
    pub fn assigned(name: &str, role: &RoleSpec) -> Result<Self> {
        Assignment::from_role(name, role).map(PinEntry::Assigned)
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            PinEntry::Assigned(a) => Some(a),
            PinEntry::Unassigned => None,
        }
    }
}

/// One layer of a layout, in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinMap {
    entries: Vec<(PinLocation, PinEntry)>,
}

impl PinMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from entries in declared order
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (PinLocation, PinEntry)>,
    {
        let mut map = Self::new();
        for (location, entry) in entries {
            map.insert(location, entry)?;
        }
        Ok(map)
    }

    /// Append an entry
    ///
    /// A location may only be declared once per map.
    pub fn insert(&mut self, location: PinLocation, entry: PinEntry) -> Result<()> {
        if self.contains(location) {
            return Err(PinmapError::DuplicateLocation { location });
        }
        self.entries.push((location, entry));
        Ok(())
    }

    pub fn get(&self, location: PinLocation) -> Option<&PinEntry> {
        self.entries
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, location: PinLocation) -> bool {
        self.get(location).is_some()
    }

    /// Entries in declared order
    pub fn iter(&self) -> impl Iterator<Item = (PinLocation, &PinEntry)> {
        self.entries.iter().map(|(loc, entry)| (*loc, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
