//! Baseline + overlay merge

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::entry::{Assignment, PinEntry, PinMap};
use crate::error::PinmapError;
use crate::location::PinLocation;
use crate::Result;

/// Resolved pin list for one build variant
///
/// Holds only assigned pins. Order is baseline declaration order followed
/// by overlay-only locations in their declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatPinMap {
    pins: Vec<(PinLocation, Assignment)>,
}

impl FlatPinMap {
    pub fn iter(&self) -> impl Iterator<Item = (PinLocation, &Assignment)> {
        self.pins.iter().map(|(loc, a)| (*loc, a))
    }

    pub fn get(&self, location: PinLocation) -> Option<&Assignment> {
        self.pins
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, a)| a)
    }

    /// Find a pin by symbolic name
    pub fn find(&self, name: &str) -> Option<(PinLocation, &Assignment)> {
        self.iter().find(|(_, a)| a.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// Merge a baseline map with a variant overlay
///
/// The overlay entry wins wherever both maps name a location; an overlay
/// `Unassigned` removes the baseline assignment.
pub fn resolve(baseline: &PinMap, overlay: &PinMap) -> Result<FlatPinMap> {
    let merged = baseline
        .iter()
        .map(|(loc, entry)| (loc, overlay.get(loc).unwrap_or(entry)))
        .chain(overlay.iter().filter(|(loc, _)| !baseline.contains(*loc)));

    let mut pins = Vec::new();
    let mut names: BTreeMap<&str, PinLocation> = BTreeMap::new();

    for (location, entry) in merged {
        let PinEntry::Assigned(assignment) = entry else {
            continue;
        };

        if let Some(first) = names.insert(assignment.name.as_str(), location) {
            return Err(PinmapError::DuplicateSymbolicName {
                name: assignment.name.clone(),
                first,
                second: location,
            });
        }

        pins.push((location, assignment.clone()));
    }

    Ok(FlatPinMap { pins })
}

/// Baseline map plus named variant overlays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Pins shared by every variant
    pub common: PinMap,
    /// Overrides by variant name (e.g., "development", "release"), in
    /// declaration order
    pub variants: Vec<(String, PinMap)>,
}

impl Layout {
    pub fn new(common: PinMap) -> Self {
        Self {
            common,
            variants: Vec::new(),
        }
    }

    /// Add a variant overlay, replacing one of the same name in place
    pub fn with_variant(mut self, name: &str, overlay: PinMap) -> Self {
        match self.variants.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = overlay,
            None => self.variants.push((name.to_string(), overlay)),
        }
        self
    }

    /// Declared variant names, in declaration order
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(n, _)| n.as_str())
    }

    /// Overlay of a declared variant
    pub fn variant(&self, name: &str) -> Option<&PinMap> {
        self.variants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, overlay)| overlay)
    }

    /// Resolve one variant, or the baseline alone for `None`
    pub fn resolve(&self, variant: Option<&str>) -> Result<FlatPinMap> {
        match variant {
            None => resolve(&self.common, &PinMap::new()),
            Some(name) => {
                let overlay = self
                    .variant(name)
                    .ok_or_else(|| PinmapError::UnknownVariant {
                        name: name.to_string(),
                    })?;
                resolve(&self.common, overlay)
            }
        }
    }
}
