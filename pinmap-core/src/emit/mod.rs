//! Text emitters
//!
//! Pure formatting over resolved pins. Nothing here filters, reorders or
//! validates; every decision was made during register resolution.

pub mod declarations;
pub mod definitions;
pub mod init;

use alloc::format;
use alloc::string::String;

use crate::registers::ResolvedPin;

pub use declarations::emit_declarations;
pub use definitions::emit_definitions;
pub use init::emit_init_sequence;

pub(crate) const READ_HEADER: &str = "// GPIO read functions\n";
pub(crate) const WRITE_HEADER: &str = "// GPIO write functions\n";

/// The three generated text artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Header content: prototypes and macros
    pub declarations: String,
    /// Accessor function bodies
    pub definitions: String,
    /// `pins_init()` routine
    pub init_sequence: String,
}

impl Artifacts {
    /// Render all three artifacts from the same pin list
    pub fn render(pins: &[ResolvedPin]) -> Self {
        Self {
            declarations: emit_declarations(pins),
            definitions: emit_definitions(pins),
            init_sequence: emit_init_sequence(pins),
        }
    }
}

pub(crate) fn read_signature(pin: &ResolvedPin) -> String {
    format!("bool read_{}(void)", pin.name)
}

pub(crate) fn write_signature(pin: &ResolvedPin) -> String {
    format!("void set_{}(bool value)", pin.name)
}
