//! Physical pin locations

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::PinmapError;
use crate::Result;

/// Highest pin index within a port
pub const MAX_PIN_INDEX: u8 = 7;

/// A (port, index) pair such as `B4`
///
/// This is the stable identity used for register addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinLocation {
    port: char,
    index: u8,
}

impl PinLocation {
    /// Create a location, checking the port letter and index range
    pub fn new(port: char, index: u8) -> Option<Self> {
        if port.is_ascii_uppercase() && index <= MAX_PIN_INDEX {
            Some(Self { port, index })
        } else {
            None
        }
    }

    /// Port letter
    pub const fn port(&self) -> char {
        self.port
    }

    /// Bit index within the port
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Parse a location with an optional leading modifier
    ///
    /// `^` requests the weak pull-up. Returns the location and whether the
    /// pull-up was requested.
    pub fn parse_with_modifiers(text: &str) -> Result<(Self, bool)> {
        let (s, pull_up) = match text.strip_prefix('^') {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        let location = s.parse::<Self>().map_err(|_| PinmapError::InvalidLocation {
            text: text.to_string(),
        })?;
        Ok((location, pull_up))
    }
}

impl FromStr for PinLocation {
    type Err = PinmapError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PinmapError::InvalidLocation {
            text: s.to_string(),
        };

        // Exactly one port letter and one octal digit
        let mut chars = s.chars();
        let (Some(port), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let index = digit.to_digit(8).ok_or_else(invalid)?;

        PinLocation::new(port, index as u8).ok_or_else(invalid)
    }
}

impl fmt::Display for PinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.port, self.index)
    }
}
