//! Configuration errors
//!
//! Every failure is discovered while the layout is being resolved. Emission
//! never fails, so nothing here is produced after output has started.

use alloc::string::String;
use core::fmt;

use crate::location::PinLocation;
use crate::map::Name;

/// Errors raised while resolving a pin layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinmapError {
    /// Tag outside the closed vocabulary
    UnknownTag { tag: String },
    /// Role shortcut that does not exist
    UnknownShortcut { name: String },
    /// Role with neither a shortcut nor literal tags
    EmptyRole,
    /// Pin location text that is not `<port letter><0-7>`
    InvalidLocation { text: String },
    /// Symbolic name that is not a C identifier or is too long
    InvalidName { name: String },
    /// Same location declared twice within one map
    DuplicateLocation { location: PinLocation },
    /// Two locations share a symbolic name after resolution
    DuplicateSymbolicName {
        name: Name,
        first: PinLocation,
        second: PinLocation,
    },
    /// Analog pin with no entry in the channel table
    UnmappedAnalogChannel { name: Name, location: PinLocation },
    /// Tags that imply contradictory register obligations
    InvalidTagCombination {
        name: Name,
        location: PinLocation,
        reason: &'static str,
    },
    /// Pin needs a direction but has neither `input` nor `output`
    MissingDirectionFlag { name: Name, location: PinLocation },
    /// Variant name not declared in the layout
    UnknownVariant { name: String },
    /// Pin-list register prefix that is not a known register
    UnknownRegister { register: String },
    /// Pin-list record that does not describe a consistent pin
    InvalidRecord { name: String, reason: &'static str },
}

impl fmt::Display for PinmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinmapError::UnknownTag { tag } => write!(f, "unknown tag '{}'", tag),
            PinmapError::UnknownShortcut { name } => write!(f, "unknown role shortcut '{}'", name),
            PinmapError::EmptyRole => write!(f, "role has no shortcut and no tags"),
            PinmapError::InvalidLocation { text } => {
                write!(f, "invalid pin location '{}' (expected e.g. 'B4')", text)
            }
            PinmapError::InvalidName { name } => {
                write!(f, "invalid symbolic name '{}' (must be a C identifier)", name)
            }
            PinmapError::DuplicateLocation { location } => {
                write!(f, "{} declared more than once in the same map", location)
            }
            PinmapError::DuplicateSymbolicName {
                name,
                first,
                second,
            } => write!(f, "{} assigned to both {} and {}", name, first, second),
            PinmapError::UnmappedAnalogChannel { name, location } => {
                write!(f, "{} at {}: no analog channel for this pin", name, location)
            }
            PinmapError::InvalidTagCombination {
                name,
                location,
                reason,
            } => write!(f, "{} at {}: {}", name, location, reason),
            PinmapError::MissingDirectionFlag { name, location } => {
                write!(f, "{} at {}: needs 'input' or 'output'", name, location)
            }
            PinmapError::UnknownVariant { name } => write!(f, "unknown build variant '{}'", name),
            PinmapError::UnknownRegister { register } => {
                write!(f, "unknown register prefix '{}'", register)
            }
            PinmapError::InvalidRecord { name, reason } => write!(f, "{}: {}", name, reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PinmapError {}
