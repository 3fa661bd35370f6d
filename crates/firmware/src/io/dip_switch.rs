//! Reads the channel window selection from the DIP switches.

use embassy_stm32::gpio::Input;
use midi_port_router_lib::configuration::{Polarity, Selector};

/// The switches short the inputs to ground against the internal pull-ups, so "on" reads low.
const POLARITY: Polarity = Polarity::ActiveLow;

/// The pair of switches which select the [`ChannelWindow`][`midi_port_router_lib::configuration::ChannelWindow`].
///
/// There is no debouncing. The switches are sampled once per byte; a reading taken mid-bounce only affects the
/// byte in flight, and the next byte sees the settled value.
pub struct DipSwitch {
    /// Supplies the most significant bit.
    first: Input<'static>,
    /// Supplies the least significant bit.
    second: Input<'static>,
}

impl DipSwitch {
    /// Constructs a [`DipSwitch`]. Both inputs should be configured with pull-ups.
    pub fn new(first: Input<'static>, second: Input<'static>) -> Self {
        Self { first, second }
    }

    /// Samples both switches.
    pub fn read(&self) -> Selector {
        Selector::from_pins(self.first.is_high(), self.second.is_high(), POLARITY)
    }
}
