//! Accessor function bodies

use alloc::format;
use alloc::string::String;

use super::{read_signature, write_signature, READ_HEADER, WRITE_HEADER};
use crate::registers::{Accessor, ResolvedPin};

/// Render `read_*` and `set_*` bodies wired to the pin's port bits
pub fn emit_definitions(pins: &[ResolvedPin]) -> String {
    let mut text = String::from("\n");

    text.push_str(READ_HEADER);
    for pin in pins.iter().filter(|p| p.accessor == Some(Accessor::Read)) {
        let (port, index) = (pin.location.port(), pin.location.index());
        text.push_str(&format!(
            "{} {{ return PORT{}bits.R{}{}; }}\n",
            read_signature(pin),
            port,
            port,
            index
        ));
    }
    text.push('\n');

    text.push_str(WRITE_HEADER);
    for pin in pins.iter().filter(|p| p.accessor == Some(Accessor::Write)) {
        let (port, index) = (pin.location.port(), pin.location.index());
        text.push_str(&format!(
            "{} {{ LAT{}bits.LAT{}{} = value; }}\n",
            write_signature(pin),
            port,
            port,
            index
        ));
    }
    text.push('\n');

    text
}
