//! Decides which output ports listen to each byte.
//!
//! The decision is always made from scratch: every port's enable signal is recomputed for every byte, so a port
//! enabled for the previous byte can never stay enabled by accident.

use crate::{configuration::ChannelWindow, midi_state::Destination};

/// One of the router's physical MIDI output ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// The first port; receives the lowest channel of the window.
    One,
    /// The second port.
    Two,
    /// The third port.
    Three,
    /// The fourth port; receives the highest channel of the window.
    Four,
}

impl Port {
    /// The number of physical output ports.
    pub const COUNT: usize = 4;

    /// Every [`Port`], in order.
    pub const ALL: [Port; Port::COUNT] = [Port::One, Port::Two, Port::Three, Port::Four];
}

/// The enable state of every output port for a single byte. `true` means the port receives the byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortEnables {
    enabled: [bool; Port::COUNT],
}

impl PortEnables {
    /// Every port listens.
    pub fn all() -> Self {
        Self {
            enabled: [true; Port::COUNT],
        }
    }

    /// No port listens.
    pub fn none() -> Self {
        Self {
            enabled: [false; Port::COUNT],
        }
    }

    /// Only `port` listens.
    pub fn only(port: Port) -> Self {
        let mut enables = Self::none();
        enables.enabled[port as usize] = true;
        enables
    }

    /// Decides which ports receive a byte bound for `destination`, given the current [`ChannelWindow`].
    ///
    /// Broadcasts enable every port. A channel enables just the port it is assigned to; a channel outside the window
    /// enables nothing, though the byte still travels on the shared line.
    pub fn decide(destination: Destination, window: &ChannelWindow) -> Self {
        match destination {
            Destination::Broadcast => Self::all(),
            Destination::Channel(channel) => match window.port_for(channel) {
                Some(port) => Self::only(port),
                None => Self::none(),
            },
        }
    }

    /// Returns `true` if `port` receives the byte.
    pub fn is_enabled(&self, port: Port) -> bool {
        self.enabled[port as usize]
    }

    /// Returns an [`Iterator`] over each [`Port`] and whether it is enabled, in port order.
    pub fn iter(&self) -> impl Iterator<Item = (Port, bool)> + '_ {
        Port::ALL
            .into_iter()
            .map(|port| (port, self.is_enabled(port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Selector;
    use wmidi::Channel;

    fn window() -> ChannelWindow {
        ChannelWindow::resolve(Selector::Channels5To8)
    }

    fn enabled_count(enables: &PortEnables) -> usize {
        enables.iter().filter(|&(_, enabled)| enabled).count()
    }

    #[test]
    fn only() {
        let enables = PortEnables::only(Port::Two);
        assert!(!enables.is_enabled(Port::One));
        assert!(enables.is_enabled(Port::Two));
        assert!(!enables.is_enabled(Port::Three));
        assert!(!enables.is_enabled(Port::Four));
        assert_eq!(1, enabled_count(&enables));
    }

    #[test]
    fn broadcast_enables_all() {
        assert_eq!(
            PortEnables::all(),
            PortEnables::decide(Destination::Broadcast, &window()),
            "Expected left but got right"
        );
    }

    #[test]
    fn channel_in_window_enables_its_port() {
        let enables = PortEnables::decide(Destination::Channel(Channel::Ch7), &window());
        assert_eq!(
            PortEnables::only(Port::Three),
            enables,
            "Expected left but got right"
        );
        assert_eq!(
            Some(2),
            enables.iter().position(|(_, enabled)| enabled),
            "Expected port index 2 to be the enabled one"
        );
    }

    #[test]
    fn channel_outside_window_disables_all() {
        assert_eq!(
            PortEnables::none(),
            PortEnables::decide(Destination::Channel(Channel::Ch10), &window()),
            "Expected left but got right"
        );
        assert_eq!(
            PortEnables::none(),
            PortEnables::decide(Destination::Channel(Channel::Ch4), &window()),
            "Expected left but got right"
        );
    }

    #[test]
    fn every_channel_enables_at_most_one_port() {
        for selector in [
            Selector::Channels1To4,
            Selector::Channels5To8,
            Selector::Channels9To12,
            Selector::Channels13To16,
        ] {
            let window = ChannelWindow::resolve(selector);
            for index in 0..16 {
                let channel = crate::midi_state::channel_from_index(index);
                let enables = PortEnables::decide(Destination::Channel(channel), &window);
                let expected = usize::from(window.port_for(channel).is_some());
                assert_eq!(
                    expected,
                    enabled_count(&enables),
                    "Channel {} under {:?} enabled the wrong number of ports",
                    channel.number(),
                    selector
                );
            }
        }
    }
}
