use super::Selector;
use crate::{midi_state::channel_from_index, routing::Port};
use wmidi::Channel;

/// The four consecutive MIDI channels currently assigned to the output ports, in port order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelWindow {
    channels: [Channel; Port::COUNT],
}

impl ChannelWindow {
    /// Derives the window for a [`Selector`]: port `i` is assigned the channel with index `selector * 4 + i`.
    pub fn resolve(selector: Selector) -> Self {
        let base = selector.base_channel_index();
        Self {
            channels: Port::ALL.map(|port| channel_from_index(base + port as u8)),
        }
    }

    /// Returns the [`Channel`] assigned to a [`Port`].
    pub fn channel(&self, port: Port) -> Channel {
        self.channels[port as usize]
    }

    /// Returns the [`Port`] assigned to a [`Channel`], or `None` if the channel falls outside the window.
    pub fn port_for(&self, channel: Channel) -> Option<Port> {
        Port::ALL
            .into_iter()
            .find(|&port| self.channel(port) == channel)
    }

    /// Returns the assigned channels in port order.
    pub fn channels(&self) -> [Channel; Port::COUNT] {
        self.channels
    }
}

impl Default for ChannelWindow {
    fn default() -> Self {
        Self::resolve(Selector::default())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelWindow {
    fn format(&self, fmt: defmt::Formatter) {
        let [a, b, c, d] = self.channels();
        defmt::write!(
            fmt,
            "ChannelWindow {{ channels: [{}, {}, {}, {}] }}",
            a.number(),
            b.number(),
            c.number(),
            d.number()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(window: ChannelWindow) -> [u8; Port::COUNT] {
        window.channels().map(Channel::index)
    }

    #[test]
    fn resolve() {
        assert_eq!([0, 1, 2, 3], indices(ChannelWindow::resolve(Selector::Channels1To4)));
        assert_eq!([4, 5, 6, 7], indices(ChannelWindow::resolve(Selector::Channels5To8)));
        assert_eq!(
            [8, 9, 10, 11],
            indices(ChannelWindow::resolve(Selector::Channels9To12))
        );
        assert_eq!(
            [12, 13, 14, 15],
            indices(ChannelWindow::resolve(Selector::Channels13To16))
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        assert_eq!(
            ChannelWindow::resolve(Selector::Channels9To12),
            ChannelWindow::resolve(Selector::Channels9To12),
            "Expected left but got right"
        );
    }

    #[test]
    fn port_for() {
        let window = ChannelWindow::resolve(Selector::Channels5To8);
        assert_eq!(Some(Port::One), window.port_for(Channel::Ch5));
        assert_eq!(Some(Port::Three), window.port_for(Channel::Ch7));
        assert_eq!(Some(Port::Four), window.port_for(Channel::Ch8));
        assert_eq!(None, window.port_for(Channel::Ch4));
        assert_eq!(None, window.port_for(Channel::Ch9));
    }

    #[test]
    fn channel() {
        let window = ChannelWindow::resolve(Selector::Channels13To16);
        assert_eq!(Channel::Ch13, window.channel(Port::One));
        assert_eq!(Channel::Ch14, window.channel(Port::Two));
        assert_eq!(Channel::Ch15, window.channel(Port::Three));
        assert_eq!(Channel::Ch16, window.channel(Port::Four));
    }
}
