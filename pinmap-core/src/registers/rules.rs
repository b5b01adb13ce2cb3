//! Rule table mapping tags to register obligations
//!
//! Each rule is keyed by tag presence and contributes at most one register
//! write plus at most one emission obligation. Rules never look at each
//! other's output; overlapping contributions are rejected when merged.

use crate::capability::{Tag, TagSet};
use crate::error::PinmapError;
use crate::location::PinLocation;
use crate::map::{Assignment, Name};
use crate::Result;

use super::channels::AnalogChannelTable;
use super::{
    Accessor, Direction, PpsDirection, Register, RegisterWrite, RegisterWrites, ResolvedPin,
};

/// Inputs every rule sees
struct PinContext<'a> {
    name: &'a Name,
    location: PinLocation,
    tags: TagSet,
    direction: Option<Direction>,
    channels: &'a dyn AnalogChannelTable,
}

impl PinContext<'_> {
    fn missing_direction(&self) -> PinmapError {
        PinmapError::MissingDirectionFlag {
            name: self.name.clone(),
            location: self.location,
        }
    }

    fn invalid(&self, reason: &'static str) -> PinmapError {
        PinmapError::InvalidTagCombination {
            name: self.name.clone(),
            location: self.location,
            reason,
        }
    }
}

/// What one rule adds to a pin
#[derive(Default)]
struct Contribution {
    write: Option<RegisterWrite>,
    accessor: Option<Accessor>,
    pps: Option<PpsDirection>,
    adc_channel: Option<u8>,
}

struct Rule {
    /// Rule applies when any of these tags is present
    trigger: TagSet,
    apply: fn(&PinContext) -> Result<Contribution>,
}

/// Evaluated top to bottom; write order follows this table
const RULES: [Rule; 5] = [
    Rule {
        trigger: TagSet::GPIO
            .union(TagSet::TRISTATE)
            .union(TagSet::ANALOG)
            .union(TagSet::PPS),
        apply: direction_rule,
    },
    Rule {
        trigger: TagSet::GPIO,
        apply: gpio_rule,
    },
    Rule {
        trigger: TagSet::ANALOG,
        apply: analog_rule,
    },
    Rule {
        trigger: TagSet::PULLUP,
        apply: pullup_rule,
    },
    Rule {
        trigger: TagSet::PPS,
        apply: pps_rule,
    },
];

/// Tag combinations with contradictory hardware requirements
///
/// `(all of, unless any of, reason)`
const CONFLICTS: [(TagSet, TagSet, &str); 5] = [
    (
        TagSet::INPUT.union(TagSet::OUTPUT),
        TagSet::empty(),
        "tagged both input and output",
    ),
    (
        TagSet::ANALOG.union(TagSet::OUTPUT),
        TagSet::empty(),
        "analog pins cannot drive an output",
    ),
    (
        TagSet::ANALOG.union(TagSet::GPIO),
        TagSet::empty(),
        "analog mode disables the digital input buffer gpio needs",
    ),
    (
        TagSet::ANALOG.union(TagSet::PPS),
        TagSet::empty(),
        "analog mode disables the digital input buffer pps needs",
    ),
    (
        TagSet::PULLUP.union(TagSet::OUTPUT),
        TagSet::TRISTATE,
        "pull-up on a driven output",
    ),
];

/// Direction register; tristate pins stay high impedance at power-up
fn direction_rule(ctx: &PinContext) -> Result<Contribution> {
    let high_impedance = if ctx.tags.intersects(TagSet::TRISTATE | TagSet::ANALOG) {
        true
    } else {
        match ctx.direction {
            Some(Direction::Input) => true,
            Some(Direction::Output) => false,
            None => return Err(ctx.missing_direction()),
        }
    };

    Ok(Contribution {
        write: Some(RegisterWrite::bit(Register::Direction, high_impedance)),
        ..Default::default()
    })
}

fn gpio_rule(ctx: &PinContext) -> Result<Contribution> {
    let accessor = match ctx.direction {
        Some(Direction::Input) => Accessor::Read,
        Some(Direction::Output) => Accessor::Write,
        None => return Err(ctx.missing_direction()),
    };

    Ok(Contribution {
        accessor: Some(accessor),
        ..Default::default()
    })
}

fn analog_rule(ctx: &PinContext) -> Result<Contribution> {
    let channel =
        ctx.channels
            .channel(ctx.location)
            .ok_or_else(|| PinmapError::UnmappedAnalogChannel {
                name: ctx.name.clone(),
                location: ctx.location,
            })?;

    Ok(Contribution {
        write: Some(RegisterWrite::bit(Register::AnalogSelect, true)),
        adc_channel: Some(channel),
        ..Default::default()
    })
}

fn pullup_rule(_ctx: &PinContext) -> Result<Contribution> {
    Ok(Contribution {
        write: Some(RegisterWrite::bit(Register::PullUp, true)),
        ..Default::default()
    })
}

fn pps_rule(ctx: &PinContext) -> Result<Contribution> {
    let pps = match ctx.direction {
        Some(Direction::Input) => PpsDirection::Input,
        Some(Direction::Output) => PpsDirection::Output,
        None => return Err(ctx.missing_direction()),
    };

    Ok(Contribution {
        pps: Some(pps),
        ..Default::default()
    })
}

/// Logical direction implied by the `input`/`output` tags
pub(crate) fn direction_of(tags: TagSet) -> Option<Direction> {
    match (tags.has(Tag::Input), tags.has(Tag::Output)) {
        (true, false) => Some(Direction::Input),
        (false, true) => Some(Direction::Output),
        _ => None,
    }
}

/// Resolve the register writes and obligations for one assigned pin
pub fn resolve_registers(
    location: PinLocation,
    assignment: &Assignment,
    channels: &dyn AnalogChannelTable,
) -> Result<ResolvedPin> {
    apply_rules(location, assignment, channels, None)
}

/// Resolve a pin whose register writes were decided by an earlier run
///
/// Tag conflicts and obligations are checked as usual; `writes` replaces
/// whatever the rules would have written.
pub(crate) fn resolve_recorded(
    location: PinLocation,
    assignment: &Assignment,
    writes: RegisterWrites,
    channels: &dyn AnalogChannelTable,
) -> Result<ResolvedPin> {
    apply_rules(location, assignment, channels, Some(writes))
}

fn apply_rules(
    location: PinLocation,
    assignment: &Assignment,
    channels: &dyn AnalogChannelTable,
    recorded: Option<RegisterWrites>,
) -> Result<ResolvedPin> {
    let tags = assignment.tags;
    let direction = direction_of(tags);

    let ctx = PinContext {
        name: &assignment.name,
        location,
        tags,
        direction,
        channels,
    };

    for (all, unless, reason) in CONFLICTS {
        if tags.contains(all) && !tags.intersects(unless) {
            return Err(ctx.invalid(reason));
        }
    }

    let mut pin = ResolvedPin {
        name: assignment.name.clone(),
        location,
        tags,
        direction,
        writes: heapless::Vec::new(),
        accessor: None,
        pps: None,
        adc_channel: None,
    };

    for rule in RULES.iter().filter(|rule| tags.intersects(rule.trigger)) {
        let mut contribution = (rule.apply)(&ctx)?;
        if recorded.is_some() {
            contribution.write = None;
        }
        merge(&ctx, &mut pin, contribution)?;
    }

    if let Some(writes) = recorded {
        pin.writes = writes;
    }

    Ok(pin)
}

fn merge(ctx: &PinContext, pin: &mut ResolvedPin, c: Contribution) -> Result<()> {
    if let Some(write) = c.write {
        if pin.write_for(write.register).is_some() {
            return Err(ctx.invalid("two rules write the same register"));
        }
        pin.writes
            .push(write)
            .map_err(|_| ctx.invalid("too many register writes"))?;
    }

    if c.accessor.is_some() {
        if pin.accessor.is_some() {
            return Err(ctx.invalid("conflicting accessors"));
        }
        pin.accessor = c.accessor;
    }

    if c.pps.is_some() {
        if pin.pps.is_some() {
            return Err(ctx.invalid("conflicting peripheral selects"));
        }
        pin.pps = c.pps;
    }

    if c.adc_channel.is_some() {
        if pin.adc_channel.is_some() {
            return Err(ctx.invalid("conflicting analog channels"));
        }
        pin.adc_channel = c.adc_channel;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::RoleSpec;
    use crate::registers::channels::Pic18Channels;

    fn resolve(location: &str, name: &str, role: RoleSpec) -> Result<ResolvedPin> {
        let assignment = Assignment::from_role(name, &role).unwrap();
        resolve_registers(location.parse().unwrap(), &assignment, &Pic18Channels)
    }

    fn writes(pin: &ResolvedPin) -> alloc::vec::Vec<(&'static str, &str)> {
        pin.writes
            .iter()
            .map(|w| (w.register.prefix(), w.value.as_str()))
            .collect()
    }

    #[test]
    fn test_button_reads_input() {
        let pin = resolve("A3", "POWER_BUTTON_PIN", RoleSpec::shortcut("button")).unwrap();
        assert_eq!(pin.direction, Some(Direction::Input));
        assert_eq!(pin.accessor, Some(Accessor::Read));
        assert_eq!(writes(&pin), [("TRIS", "1")]);
        assert_eq!(pin.pps, None);
        assert_eq!(pin.adc_channel, None);
    }

    #[test]
    fn test_led_writes_output() {
        let pin = resolve("C0", "LED_PIN", RoleSpec::shortcut("led")).unwrap();
        assert_eq!(pin.accessor, Some(Accessor::Write));
        assert_eq!(writes(&pin), [("TRIS", "0")]);
    }

    #[test]
    fn test_relay_floats_at_power_up() {
        let pin = resolve("C3", "BYPASS_LED_PIN", RoleSpec::shortcut("relay")).unwrap();
        assert_eq!(pin.direction, Some(Direction::Output));
        assert_eq!(pin.accessor, Some(Accessor::Write));
        assert_eq!(writes(&pin), [("TRIS", "1")]);
    }

    #[test]
    fn test_analog_in() {
        let pin = resolve("A1", "REV_PIN", RoleSpec::shortcut("analog_in")).unwrap();
        assert_eq!(pin.accessor, None);
        assert_eq!(pin.adc_channel, Some(1));
        assert_eq!(writes(&pin), [("TRIS", "1"), ("ANSEL", "1")]);
    }

    #[test]
    fn test_pullup_button() {
        let role = RoleSpec::shortcut("button").with_tag("pullup");
        let pin = resolve("B4", "FUNC_BUTTON_PIN", role).unwrap();
        assert_eq!(writes(&pin), [("TRIS", "1"), ("WPU", "1")]);
    }

    #[test]
    fn test_uart_pps_direction() {
        let tx = resolve("C6", "USB_TX_PIN", RoleSpec::shortcut("uart_tx")).unwrap();
        assert_eq!(tx.pps, Some(PpsDirection::Output));
        assert_eq!(tx.accessor, None);
        assert_eq!(writes(&tx), [("TRIS", "0")]);

        let rx = resolve("C7", "USB_RX_PIN", RoleSpec::shortcut("uart_rx")).unwrap();
        assert_eq!(rx.pps, Some(PpsDirection::Input));
        assert_eq!(writes(&rx), [("TRIS", "1")]);
    }

    #[test]
    fn test_freq_gets_accessor_and_pps() {
        let pin = resolve("E0", "FREQ_PIN", RoleSpec::shortcut("freq")).unwrap();
        assert_eq!(pin.accessor, Some(Accessor::Read));
        assert_eq!(pin.pps, Some(PpsDirection::Input));
    }

    #[test]
    fn test_gpio_without_direction() {
        let err = resolve("A6", "FP_CLOCK_PIN", RoleSpec::tags(&["gpio"])).unwrap_err();
        assert!(matches!(err, PinmapError::MissingDirectionFlag { .. }));
    }

    #[test]
    fn test_pps_without_direction() {
        let err = resolve("C6", "TX_PIN", RoleSpec::tags(&["pps"])).unwrap_err();
        assert!(matches!(err, PinmapError::MissingDirectionFlag { .. }));
    }

    #[test]
    fn test_unmapped_analog_channel() {
        let err = resolve("E3", "SENSE_PIN", RoleSpec::shortcut("analog_in")).unwrap_err();
        assert_eq!(
            err,
            PinmapError::UnmappedAnalogChannel {
                name: "SENSE_PIN".try_into().unwrap(),
                location: "E3".parse().unwrap(),
            }
        );
    }

    #[test]
    fn test_contradictory_tags() {
        let cases = [
            RoleSpec::tags(&["input", "output", "gpio"]),
            RoleSpec::tags(&["output", "analog"]),
            RoleSpec::shortcut("analog_in").with_tag("gpio"),
            RoleSpec::shortcut("uart_rx").with_tag("analog"),
            RoleSpec::shortcut("led").with_tag("pullup"),
        ];

        for role in cases {
            let err = resolve("A0", "BAD_PIN", role).unwrap_err();
            assert!(
                matches!(err, PinmapError::InvalidTagCombination { .. }),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_pullup_allowed_on_tristate_output() {
        let role = RoleSpec::shortcut("relay").with_tag("pullup");
        let pin = resolve("C4", "FP_STROBE_PIN", role).unwrap();
        assert_eq!(writes(&pin), [("TRIS", "1"), ("WPU", "1")]);
    }

    #[test]
    fn test_button_tag_alone_has_no_obligation() {
        let pin = resolve("B2", "NOTE_PIN", RoleSpec::tags(&["button"])).unwrap();
        assert!(pin.writes.is_empty());
        assert_eq!(pin.accessor, None);
    }
}
