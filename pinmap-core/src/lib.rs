//! Board-agnostic core of the pin initialization code generator
//!
//! This crate turns a declarative pin layout into the C source that
//! configures those pins at boot:
//!
//! - Capability model (closed tag vocabulary and role shortcuts)
//! - Layered pin maps (shared baseline plus per-variant overlays)
//! - Register resolution (tags to register writes and accessor obligations)
//! - Emitters for the declarations, definitions and init-sequence artifacts
//!
//! # Pipeline
//!
//! ```text
//! Layout ──resolve──▶ FlatPinMap ──resolve_registers──▶ [ResolvedPin] ──emit──▶ Artifacts
//! ```
//!
//! Every stage is a pure function of its inputs. All validation happens
//! before the first byte of output is rendered.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod capability;
pub mod emit;
pub mod error;
pub mod location;
pub mod map;
pub mod pipeline;
pub mod record;
pub mod registers;

pub use capability::{expand, RoleSpec, Shortcut, Tag, TagSet};
pub use emit::Artifacts;
pub use error::PinmapError;
pub use location::PinLocation;
pub use map::{resolve, Assignment, FlatPinMap, Layout, Name, PinEntry, PinMap, MAX_NAME_LEN};
pub use pipeline::{generate, resolve_all, resolve_records};
pub use record::{DirectionFlags, PinRecord, RegisterAssignment};
pub use registers::{
    resolve_registers, Accessor, AnalogChannelTable, Direction, Pic18Channels, PpsDirection,
    Register, RegisterWrite, RegisterWrites, ResolvedPin,
};

/// Result type used throughout the crate
pub type Result<T> = core::result::Result<T, PinmapError>;
