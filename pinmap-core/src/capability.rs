//! Capability model
//!
//! The closed vocabulary of pin tags and the fixed role shortcuts built
//! from them. Shortcuts are plain aliases: they are expanded into a
//! [`TagSet`] before any register logic runs.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

use crate::error::PinmapError;
use crate::Result;

/// A single pin capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    Input,
    Output,
    Tristate,
    Gpio,
    Analog,
    Pullup,
    Button,
    Pps,
}

impl Tag {
    /// Every tag, in vocabulary order
    pub const ALL: [Tag; 8] = [
        Tag::Input,
        Tag::Output,
        Tag::Tristate,
        Tag::Gpio,
        Tag::Analog,
        Tag::Pullup,
        Tag::Button,
        Tag::Pps,
    ];

    /// Name used in layout files and pin-list records
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Input => "input",
            Tag::Output => "output",
            Tag::Tristate => "tristate",
            Tag::Gpio => "gpio",
            Tag::Analog => "analog",
            Tag::Pullup => "pullup",
            Tag::Button => "button",
            Tag::Pps => "pps",
        }
    }

    /// Single-bit set holding only this tag
    pub const fn flag(self) -> TagSet {
        match self {
            Tag::Input => TagSet::INPUT,
            Tag::Output => TagSet::OUTPUT,
            Tag::Tristate => TagSet::TRISTATE,
            Tag::Gpio => TagSet::GPIO,
            Tag::Analog => TagSet::ANALOG,
            Tag::Pullup => TagSet::PULLUP,
            Tag::Button => TagSet::BUTTON,
            Tag::Pps => TagSet::PPS,
        }
    }
}

impl FromStr for Tag {
    type Err = PinmapError;

    fn from_str(s: &str) -> Result<Self> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| PinmapError::UnknownTag { tag: s.to_string() })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of tags carried by one pin
    ///
    /// Bit positions follow the vocabulary order of [`Tag::ALL`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TagSet: u8 {
        const INPUT = 1 << 0;
        const OUTPUT = 1 << 1;
        const TRISTATE = 1 << 2;
        const GPIO = 1 << 3;
        const ANALOG = 1 << 4;
        const PULLUP = 1 << 5;
        const BUTTON = 1 << 6;
        const PPS = 1 << 7;
    }
}

impl TagSet {
    /// Build a set from a list of tags
    pub fn of(tags: &[Tag]) -> Self {
        tags.iter().fold(TagSet::empty(), |set, tag| set | tag.flag())
    }

    /// Check for a single tag
    pub fn has(self, tag: Tag) -> bool {
        self.contains(tag.flag())
    }

    /// Tags in this set, in vocabulary order
    pub fn tags(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |tag| self.has(*tag))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TagSet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TagSet({=u8:#04x})", self.bits())
    }
}

/// Named role shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shortcut {
    Button,
    Relay,
    UartTx,
    UartRx,
    AnalogIn,
    Led,
    Freq,
}

impl Shortcut {
    pub const ALL: [Shortcut; 7] = [
        Shortcut::Button,
        Shortcut::Relay,
        Shortcut::UartTx,
        Shortcut::UartRx,
        Shortcut::AnalogIn,
        Shortcut::Led,
        Shortcut::Freq,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Shortcut::Button => "button",
            Shortcut::Relay => "relay",
            Shortcut::UartTx => "uart_tx",
            Shortcut::UartRx => "uart_rx",
            Shortcut::AnalogIn => "analog_in",
            Shortcut::Led => "led",
            Shortcut::Freq => "freq",
        }
    }

    /// Tags this shortcut stands for, in declared order
    pub const fn tags(self) -> &'static [Tag] {
        match self {
            Shortcut::Button => &[Tag::Input, Tag::Gpio, Tag::Button],
            Shortcut::Relay => &[Tag::Output, Tag::Gpio, Tag::Tristate],
            Shortcut::UartTx => &[Tag::Output, Tag::Pps],
            Shortcut::UartRx => &[Tag::Input, Tag::Pps],
            Shortcut::AnalogIn => &[Tag::Input, Tag::Analog],
            Shortcut::Led => &[Tag::Output, Tag::Gpio],
            Shortcut::Freq => &[Tag::Input, Tag::Gpio, Tag::Pps],
        }
    }
}

impl FromStr for Shortcut {
    type Err = PinmapError;

    fn from_str(s: &str) -> Result<Self> {
        Shortcut::ALL
            .iter()
            .copied()
            .find(|shortcut| shortcut.name() == s)
            .ok_or_else(|| PinmapError::UnknownShortcut {
                name: s.to_string(),
            })
    }
}

/// A role as written by the layout author
///
/// Either a shortcut, a literal tag list, or both (the result is the union).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleSpec {
    pub shortcut: Option<String>,
    pub tags: Vec<String>,
}

impl RoleSpec {
    /// Role given by a shortcut name
    pub fn shortcut(name: &str) -> Self {
        Self {
            shortcut: Some(name.to_string()),
            tags: Vec::new(),
        }
    }

    /// Role given by literal tag names
    pub fn tags(tags: &[&str]) -> Self {
        Self {
            shortcut: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Add one more literal tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }
}

/// Expand a role into its tag set
///
/// Fails on the first tag or shortcut outside the vocabulary.
pub fn expand(role: &RoleSpec) -> Result<TagSet> {
    if role.shortcut.is_none() && role.tags.is_empty() {
        return Err(PinmapError::EmptyRole);
    }

    let mut set = match &role.shortcut {
        Some(name) => TagSet::of(name.parse::<Shortcut>()?.tags()),
        None => TagSet::empty(),
    };

    for tag in &role.tags {
        set |= tag.parse::<Tag>()?.flag();
    }

    Ok(set)
}
