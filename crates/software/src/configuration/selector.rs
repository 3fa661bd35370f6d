use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Describes how the electrical level of a configuration input maps to a logical bit.
///
/// The DIP switches are wired between the input pins and ground, with the pins pulled high, so a closed (i.e., "on")
/// switch reads low. [`Polarity::ActiveLow`] inverts the raw reading so that the switch labels and the selected
/// window agree; all switches off selects channels 1-4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// A low pin reads as a set bit.
    #[default]
    ActiveLow,
    /// A high pin reads as a set bit. For boards where the switches pull the inputs up rather than down.
    ActiveHigh,
}

impl Polarity {
    /// Interprets a single pin reading as a bit.
    pub fn is_set(&self, is_high: bool) -> bool {
        match self {
            Self::ActiveLow => !is_high,
            Self::ActiveHigh => is_high,
        }
    }
}

/// The 2-bit value read from the DIP switches, which determines which block of four consecutive MIDI channels is
/// routed to the output ports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selector {
    /// Ports 1-4 receive channels 1-4.
    #[default]
    Channels1To4,
    /// Ports 1-4 receive channels 5-8.
    Channels5To8,
    /// Ports 1-4 receive channels 9-12.
    Channels9To12,
    /// Ports 1-4 receive channels 13-16.
    Channels13To16,
}

impl Selector {
    /// Constructs a [`Selector`] from the two least significant bits of `bits`; higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        <Self as FromPrimitive>::from_u8(bits & 0b11).unwrap_or_default()
    }

    /// Constructs a [`Selector`] from raw pin readings.
    ///
    /// The first input supplies the most significant bit and the second input the least significant bit.
    pub fn from_pins(first_is_high: bool, second_is_high: bool, polarity: Polarity) -> Self {
        let msb = u8::from(polarity.is_set(first_is_high));
        let lsb = u8::from(polarity.is_set(second_is_high));
        Self::from_bits((msb << 1) | lsb)
    }

    /// Returns the zero-based index of the lowest channel in the selected block.
    pub fn base_channel_index(&self) -> u8 {
        *self as u8 * 4
    }

    /// Returns the one-based position of the selected block among the four, e.g., `3` for channels 9-12.
    pub fn position(&self) -> u8 {
        *self as u8 + 1
    }
}
