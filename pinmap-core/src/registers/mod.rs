//! Register resolution
//!
//! Turns one assigned pin into the register writes its init code needs and
//! the accessor/macro obligations it puts on the generated header.

pub mod channels;
pub mod rules;

pub use channels::{AnalogChannelTable, Pic18Channels};
pub use rules::resolve_registers;
pub(crate) use rules::{direction_of, resolve_recorded};

use alloc::string::String;

use crate::capability::TagSet;
use crate::location::PinLocation;
use crate::map::Name;

/// Maximum register writes one pin can need
pub const MAX_REGISTER_WRITES: usize = 3;

/// Per-port registers touched by pin init
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Tri-state control; 1 = input/high impedance, 0 = output
    Direction,
    /// Analog select; 1 = analog mode
    AnalogSelect,
    /// Weak pull-up enable
    PullUp,
}

impl Register {
    pub const ALL: [Register; 3] = [Register::Direction, Register::AnalogSelect, Register::PullUp];

    /// Register for a name prefix such as `TRIS`
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.prefix() == prefix)
    }

    /// Register name prefix, completed by the port letter (e.g., `TRISB`)
    pub const fn prefix(self) -> &'static str {
        match self {
            Register::Direction => "TRIS",
            Register::AnalogSelect => "ANSEL",
            Register::PullUp => "WPU",
        }
    }
}

/// One bit assignment executed at init time
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    pub register: Register,
    /// Value expression, emitted verbatim
    pub value: String,
}

impl RegisterWrite {
    pub fn new(register: Register, value: impl Into<String>) -> Self {
        Self {
            register,
            value: value.into(),
        }
    }

    /// Set (`1`) or clear (`0`) the pin's bit
    pub fn bit(register: Register, set: bool) -> Self {
        Self::new(register, if set { "1" } else { "0" })
    }
}

/// Register writes of one pin, in init order
pub type RegisterWrites = heapless::Vec<RegisterWrite, MAX_REGISTER_WRITES>;

/// Logical I/O direction of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Accessor function generated for a gpio pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Accessor {
    /// `read_<NAME>()` reading the input-state bit
    Read,
    /// `set_<NAME>(value)` writing the output-latch bit
    Write,
}

/// Which peripheral-select macro a pps pin gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PpsDirection {
    Input,
    Output,
}

/// Everything the emitters need to know about one pin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolvedPin {
    pub name: Name,
    pub location: PinLocation,
    pub tags: TagSet,
    pub direction: Option<Direction>,
    /// Init-time writes in rule order
    pub writes: RegisterWrites,
    pub accessor: Option<Accessor>,
    pub pps: Option<PpsDirection>,
    /// Looked-up ADC channel, present for analog pins
    pub adc_channel: Option<u8>,
}

impl ResolvedPin {
    /// Value written to `register`, if this pin writes it
    pub fn write_for(&self, register: Register) -> Option<&str> {
        self.writes
            .iter()
            .find(|w| w.register == register)
            .map(|w| w.value.as_str())
    }
}
