//! The shipped layout must generate for every variant

use std::path::Path;

use pinmap_core::{generate, resolve_all, resolve_records, Artifacts, Pic18Channels, PinRecord};
use pinmap_gen::pin_list::to_toml;
use pinmap_gen::{load_layout, parse_pin_list};

fn shipped_layout() -> pinmap_core::Layout {
    load_layout(&Path::new(env!("CARGO_MANIFEST_DIR")).join("pinmap.toml")).unwrap()
}

#[test]
fn test_every_variant_generates() {
    let layout = shipped_layout();
    let variants: Vec<Option<&str>> = std::iter::once(None)
        .chain(layout.variant_names().map(Some))
        .collect();
    assert_eq!(variants.len(), 3);

    for variant in variants {
        generate(&layout, variant, &Pic18Channels).unwrap();
    }
}

#[test]
fn test_pin_list_replays_every_variant() {
    let layout = shipped_layout();
    let variants: Vec<Option<&str>> = std::iter::once(None)
        .chain(layout.variant_names().map(Some))
        .collect();

    for variant in variants {
        let flat = layout.resolve(variant).unwrap();
        let pins = resolve_all(&flat, &Pic18Channels).unwrap();
        let records: Vec<PinRecord> = pins.iter().map(PinRecord::from).collect();

        let text = to_toml(&records).unwrap();
        let replayed = resolve_records(&parse_pin_list(&text).unwrap(), &Pic18Channels).unwrap();

        assert_eq!(
            Artifacts::render(&replayed),
            generate(&layout, variant, &Pic18Channels).unwrap(),
            "{:?}",
            variant
        );
    }
}

#[test]
fn test_variants_listed_in_file_order() {
    assert_eq!(
        shipped_layout().variant_names().collect::<Vec<_>>(),
        ["development", "release"]
    );
}

#[test]
fn test_development_buttons_move_to_port_e() {
    let artifacts = generate(&shipped_layout(), Some("development"), &Pic18Channels).unwrap();
    assert!(artifacts
        .definitions
        .contains("bool read_TUNE_BUTTON_PIN(void) { return PORTEbits.RE1; }"));
    assert!(artifacts.init_sequence.contains("    WPUEbits.WPUE1 = 1;\n"));
    assert!(artifacts
        .declarations
        .contains("#define PPS_DEBUG_RX_PIN PPS_INPUT(D, 3)\n"));
}

#[test]
fn test_release_buttons_on_port_b() {
    let artifacts = generate(&shipped_layout(), Some("release"), &Pic18Channels).unwrap();
    assert!(artifacts
        .definitions
        .contains("bool read_ANT_BUTTON_PIN(void) { return PORTBbits.RB7; }"));
    assert!(!artifacts.declarations.contains("DEBUG_TX_PIN"));
}

#[test]
fn test_common_only_has_no_variant_pins() {
    let artifacts = generate(&shipped_layout(), None, &Pic18Channels).unwrap();
    assert!(!artifacts.declarations.contains("TUNE_BUTTON_PIN"));
    assert!(artifacts.declarations.contains("#define ADC_REV_PIN 1\n"));
    assert!(artifacts
        .init_sequence
        .contains("    // POWER_BUTTON_PIN (button)\n    TRISAbits.TRISA3 = 1;\n    WPUAbits.WPUA3 = 1;\n"));
}
