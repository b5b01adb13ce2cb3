//! Analog channel lookup

use alloc::collections::BTreeMap;

use crate::location::PinLocation;

/// Maps a physical pin to the ADC channel that samples it
pub trait AnalogChannelTable {
    /// Channel number, or `None` if the pin has no analog function
    fn channel(&self, location: PinLocation) -> Option<u8>;
}

/// ADC channel numbering of the PIC18 K42 family
///
/// Ports A-D and F map eight channels each; port E only exposes E0-E2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pic18Channels;

impl AnalogChannelTable for Pic18Channels {
    fn channel(&self, location: PinLocation) -> Option<u8> {
        let index = location.index();
        match location.port() {
            'A' => Some(index),
            'B' => Some(8 + index),
            'C' => Some(16 + index),
            'D' => Some(24 + index),
            'E' if index <= 2 => Some(32 + index),
            'F' => Some(40 + index),
            _ => None,
        }
    }
}

impl AnalogChannelTable for BTreeMap<PinLocation, u8> {
    fn channel(&self, location: PinLocation) -> Option<u8> {
        self.get(&location).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> PinLocation {
        s.parse().unwrap()
    }

    #[test]
    fn test_pic18_channels() {
        let table = Pic18Channels;
        assert_eq!(table.channel(loc("A0")), Some(0));
        assert_eq!(table.channel(loc("B7")), Some(15));
        assert_eq!(table.channel(loc("D3")), Some(27));
        assert_eq!(table.channel(loc("E2")), Some(34));
        assert_eq!(table.channel(loc("F0")), Some(40));
        assert_eq!(table.channel(loc("F7")), Some(47));
    }

    #[test]
    fn test_pic18_unmapped_pins() {
        let table = Pic18Channels;
        assert_eq!(table.channel(loc("E3")), None);
        assert_eq!(table.channel(loc("G0")), None);
    }

    #[test]
    fn test_map_table() {
        let mut table = BTreeMap::new();
        table.insert(loc("A0"), 0);
        assert_eq!(table.channel(loc("A0")), Some(0));
        assert_eq!(table.channel(loc("A1")), None);
    }
}
