//! Pin maps and variant resolution
//!
//! A [`Layout`] holds the shared `common` map plus one overlay per build
//! variant. Resolving a variant merges the two into a [`FlatPinMap`].

pub mod entry;
pub mod resolve;

pub use entry::{Assignment, Name, PinEntry, PinMap, MAX_NAME_LEN};
pub use resolve::{resolve, FlatPinMap, Layout};
