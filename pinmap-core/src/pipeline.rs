//! End-to-end generation
//!
//! Resolution runs to completion before anything is rendered, so a bad
//! layout never yields partial output.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::emit::Artifacts;
use crate::error::PinmapError;
use crate::map::{FlatPinMap, Layout, Name};
use crate::record::PinRecord;
use crate::registers::{resolve_registers, AnalogChannelTable, ResolvedPin};
use crate::Result;

/// Resolve every pin of a flat map, in map order
///
/// Stops at the first invalid pin.
pub fn resolve_all(
    flat: &FlatPinMap,
    channels: &dyn AnalogChannelTable,
) -> Result<Vec<ResolvedPin>> {
    flat.iter()
        .map(|(location, assignment)| resolve_registers(location, assignment, channels))
        .collect()
}

/// Rebuild resolved pins from a pin list, in list order
///
/// Locations and names must be unique across the list, as in a resolved
/// map.
pub fn resolve_records(
    records: &[PinRecord],
    channels: &dyn AnalogChannelTable,
) -> Result<Vec<ResolvedPin>> {
    let mut locations = BTreeSet::new();
    let mut names: BTreeMap<Name, _> = BTreeMap::new();
    let mut pins = Vec::with_capacity(records.len());

    for record in records {
        let pin = record.resolve(channels)?;

        if !locations.insert(pin.location) {
            return Err(PinmapError::DuplicateLocation {
                location: pin.location,
            });
        }
        if let Some(first) = names.insert(pin.name.clone(), pin.location) {
            return Err(PinmapError::DuplicateSymbolicName {
                name: pin.name.clone(),
                first,
                second: pin.location,
            });
        }

        pins.push(pin);
    }

    Ok(pins)
}

/// Resolve a layout variant and render all artifacts
pub fn generate(
    layout: &Layout,
    variant: Option<&str>,
    channels: &dyn AnalogChannelTable,
) -> Result<Artifacts> {
    let flat = layout.resolve(variant)?;
    let pins = resolve_all(&flat, channels)?;
    Ok(Artifacts::render(&pins))
}
