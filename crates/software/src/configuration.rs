//! This module contains the hardware-selected settings of the router (implemented as enums) along with the state
//! needed to resolve them into a [`ChannelWindow`].

mod channel_window;
pub use channel_window::*;

mod selector;
pub use selector::*;

/// Tracks the most recently seen [`Selector`] along with the [`ChannelWindow`] derived from it.
///
/// The DIP switches are sampled on every pass through the main loop, but the window only needs to be recomputed
/// when the switches actually move.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigResolver {
    selector: Selector,
    window: ChannelWindow,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(Selector::default())
    }
}

impl ConfigResolver {
    /// Constructs a [`ConfigResolver`] which starts out on the given [`Selector`].
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            window: ChannelWindow::resolve(selector),
        }
    }

    /// Feeds the latest switch reading to the resolver.
    ///
    /// Returns the new [`ChannelWindow`] if the selection changed; returns `None` if it didn't, in which case the
    /// stored window is left untouched.
    pub fn update(&mut self, selector: Selector) -> Option<ChannelWindow> {
        if selector == self.selector {
            return None;
        }

        self.selector = selector;
        self.window = ChannelWindow::resolve(selector);
        Some(self.window)
    }

    /// Returns the [`Selector`] the current window was resolved from.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Returns the [`ChannelWindow`] currently mapped onto the ports.
    pub fn window(&self) -> ChannelWindow {
        self.window
    }
}
