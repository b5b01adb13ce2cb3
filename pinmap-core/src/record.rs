//! Pin-list interchange record
//!
//! Flat, string-keyed view of a resolved pin: name, location, tag usage,
//! direction flags and register assignments. This is the shape of the
//! intermediate pin list kept between runs. A record can be turned back
//! into a [`ResolvedPin`]; its register values are then emitted verbatim.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capability::{Tag, TagSet};
use crate::error::PinmapError;
use crate::location::PinLocation;
use crate::map::Assignment;
use crate::registers::{
    direction_of, resolve_recorded, AnalogChannelTable, Direction, Register, RegisterWrite,
    RegisterWrites, ResolvedPin,
};
use crate::Result;

/// Direction flags of a pin record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionFlags {
    pub input: bool,
    pub output: bool,
}

/// One register assignment of a pin record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterAssignment {
    /// Register prefix (e.g., "TRIS")
    pub register: String,
    /// Value expression assigned to the pin's bit
    pub value: String,
}

/// Serializable pin-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinRecord {
    pub name: String,
    pub port: String,
    pub pin: String,
    /// Presence flag for every tag in the vocabulary
    pub usage: BTreeMap<String, bool>,
    pub direction: DirectionFlags,
    /// Register writes in init order
    pub registers: Vec<RegisterAssignment>,
}

impl From<&ResolvedPin> for PinRecord {
    fn from(pin: &ResolvedPin) -> Self {
        let usage = Tag::ALL
            .iter()
            .map(|tag| (tag.name().to_string(), pin.tags.has(*tag)))
            .collect();

        let registers = pin
            .writes
            .iter()
            .map(|w| RegisterAssignment {
                register: w.register.prefix().to_string(),
                value: w.value.clone(),
            })
            .collect();

        Self {
            name: pin.name.as_str().to_string(),
            port: pin.location.port().to_string(),
            pin: pin.location.index().to_string(),
            usage,
            direction: DirectionFlags {
                input: pin.direction == Some(Direction::Input),
                output: pin.direction == Some(Direction::Output),
            },
            registers,
        }
    }
}

impl PinRecord {
    /// Rebuild the resolved pin this record describes
    ///
    /// Name, location and tags are validated like layout entries. Direction
    /// flags must agree with the `input`/`output` usage. Register writes are
    /// taken verbatim; accessor, peripheral-select and analog-channel
    /// obligations are derived from the tags again.
    pub fn resolve(&self, channels: &dyn AnalogChannelTable) -> Result<ResolvedPin> {
        let invalid = |reason: &'static str| PinmapError::InvalidRecord {
            name: self.name.clone(),
            reason,
        };

        let location = self.location()?;

        let mut tags = TagSet::empty();
        for (tag, &present) in &self.usage {
            let tag: Tag = tag.parse()?;
            if present {
                tags |= tag.flag();
            }
        }
        let assignment = Assignment::new(&self.name, tags)?;

        let direction = match (self.direction.input, self.direction.output) {
            (true, true) => return Err(invalid("direction is both input and output")),
            (true, false) => Some(Direction::Input),
            (false, true) => Some(Direction::Output),
            (false, false) => None,
        };
        if direction != direction_of(tags) {
            return Err(invalid("direction flags disagree with input/output usage"));
        }

        let mut writes = RegisterWrites::new();
        for entry in &self.registers {
            let register = Register::from_prefix(&entry.register).ok_or_else(|| {
                PinmapError::UnknownRegister {
                    register: entry.register.clone(),
                }
            })?;

            let value = entry.value.as_str();
            if value.trim().is_empty() || value.chars().any(char::is_control) {
                return Err(invalid("register value must be a one-line expression"));
            }
            if writes.iter().any(|w| w.register == register) {
                return Err(invalid("register assigned twice"));
            }
            writes
                .push(RegisterWrite::new(register, value))
                .map_err(|_| invalid("too many register writes"))?;
        }

        resolve_recorded(location, &assignment, writes, channels)
    }

    fn location(&self) -> Result<PinLocation> {
        let text = format!("{}{}", self.port, self.pin);
        if self.port.chars().count() != 1 {
            return Err(PinmapError::InvalidLocation { text });
        }
        text.parse()
    }
}
