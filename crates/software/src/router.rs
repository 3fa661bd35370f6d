//! Ties the [`ConfigResolver`] and [`RunningStatus`] together behind a single state object which the firmware drives
//! one byte at a time.

use crate::{
    configuration::{ChannelWindow, ConfigResolver, Selector},
    midi_state::RunningStatus,
    routing::PortEnables,
};

/// All of the state which must outlive the processing of a single byte.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Router {
    config: ConfigResolver,
    running_status: RunningStatus,
}

impl Router {
    /// Constructs a [`Router`] which starts out on the given [`Selector`] and broadcasts until the first status byte.
    pub fn new(selector: Selector) -> Self {
        Self {
            config: ConfigResolver::new(selector),
            running_status: RunningStatus::new(),
        }
    }

    /// Feeds the latest switch reading to the router. Returns the new [`ChannelWindow`] if it changed.
    ///
    /// Should be called before each byte is routed. Running status is unaffected by a change of window: data bytes
    /// which follow will be routed according to the new window.
    pub fn configure(&mut self, selector: Selector) -> Option<ChannelWindow> {
        self.config.update(selector)
    }

    /// Advances the running status by one byte and decides which ports should receive it.
    pub fn route(&mut self, byte: u8) -> PortEnables {
        let destination = self.running_status.update(byte);
        PortEnables::decide(destination, &self.config.window())
    }

    /// Returns the [`Selector`] the current window was resolved from.
    pub fn selector(&self) -> Selector {
        self.config.selector()
    }

    /// Returns the [`ChannelWindow`] currently mapped onto the ports.
    pub fn window(&self) -> ChannelWindow {
        self.config.window()
    }
}
