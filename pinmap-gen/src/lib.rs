//! Host side of the pin init code generator
//!
//! Loads a TOML pin layout (or a pin list kept by an earlier run), runs the
//! core pipeline for one build variant and writes the generated C sources,
//! either as standalone files or spliced between markers in existing
//! sources.

pub mod config;
pub mod error;
pub mod output;
pub mod pin_list;
pub mod splice;

pub use config::{load_layout, parse_layout, ConfigError};
pub use error::GenError;
pub use output::{GenerateRequest, OutputMode, OutputPlan};
pub use pin_list::{load_pin_list, parse_pin_list};
pub use splice::{splice, SpliceError};
