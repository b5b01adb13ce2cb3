//! `pins_init()` routine

use alloc::format;
use alloc::string::String;

use crate::capability::Tag;
use crate::registers::ResolvedPin;

/// Render one commented block of register writes per pin
pub fn emit_init_sequence(pins: &[ResolvedPin]) -> String {
    let mut text = String::from("\nvoid pins_init(void) {\n");

    for pin in pins {
        let category = if pin.tags.has(Tag::Button) {
            " (button)"
        } else {
            ""
        };
        text.push_str(&format!("    // {}{}\n", pin.name, category));

        let (port, index) = (pin.location.port(), pin.location.index());
        for write in &pin.writes {
            let prefix = write.register.prefix();
            text.push_str(&format!(
                "    {}{}bits.{}{}{} = {};\n",
                prefix, port, prefix, port, index, write.value
            ));
        }
        text.push('\n');
    }

    text.push_str("}\n");
    text
}
