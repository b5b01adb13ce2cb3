//! Header declarations: accessor prototypes, PPS and ADC macros

use alloc::format;
use alloc::string::String;

use super::{read_signature, write_signature, READ_HEADER, WRITE_HEADER};
use crate::registers::{Accessor, PpsDirection, ResolvedPin};

/// Render prototypes and macros, grouped reads, writes, pps, adc
pub fn emit_declarations(pins: &[ResolvedPin]) -> String {
    let mut text = String::from("\n");

    text.push_str(READ_HEADER);
    for pin in pins.iter().filter(|p| p.accessor == Some(Accessor::Read)) {
        text.push_str(&format!("extern {};\n", read_signature(pin)));
    }
    text.push('\n');

    text.push_str(WRITE_HEADER);
    for pin in pins.iter().filter(|p| p.accessor == Some(Accessor::Write)) {
        text.push_str(&format!("extern {};\n", write_signature(pin)));
    }
    text.push('\n');

    text.push_str("// PPS initialization macros\n");
    for pin in pins {
        let macro_name = match pin.pps {
            Some(PpsDirection::Input) => "PPS_INPUT",
            Some(PpsDirection::Output) => "PPS_OUTPUT",
            None => continue,
        };
        text.push_str(&format!(
            "#define PPS_{} {}({}, {})\n",
            pin.name,
            macro_name,
            pin.location.port(),
            pin.location.index()
        ));
    }
    text.push('\n');

    text.push_str("// ADC Channel Select macros\n");
    for pin in pins {
        if let Some(channel) = pin.adc_channel {
            text.push_str(&format!("#define ADC_{} {}\n", pin.name, channel));
        }
    }
    text.push('\n');

    text
}
