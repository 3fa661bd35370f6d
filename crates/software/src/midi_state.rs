use wmidi::Channel;

/// Every [`Channel`], ordered by index, so that a status byte's low nibble maps onto a channel without a fallible
/// conversion.
const CHANNELS: [Channel; 16] = [
    Channel::Ch1,
    Channel::Ch2,
    Channel::Ch3,
    Channel::Ch4,
    Channel::Ch5,
    Channel::Ch6,
    Channel::Ch7,
    Channel::Ch8,
    Channel::Ch9,
    Channel::Ch10,
    Channel::Ch11,
    Channel::Ch12,
    Channel::Ch13,
    Channel::Ch14,
    Channel::Ch15,
    Channel::Ch16,
];

/// Returns the [`Channel`] at the given zero-based index. Only the low nibble is considered.
pub fn channel_from_index(index: u8) -> Channel {
    CHANNELS[usize::from(index & 0x0F)]
}

/// The class of a single byte on the wire, determined solely by its numeric range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteClass {
    /// 0xF8-0xFF: timing clock, start, continue, stop, active sensing, reset. May be interleaved anywhere,
    /// including between the data bytes of another message.
    SystemRealtime,
    /// 0xF0-0xF7: system exclusive, song position, song select, tune request, etc. Cancels running status.
    SystemCommon,
    /// 0x80-0xEF: the status byte of a channel message, addressed to the channel in its low nibble.
    ChannelStatus(Channel),
    /// 0x00-0x7F: a data byte, belonging to whichever message most recently established running status.
    Data,
}

impl ByteClass {
    /// Classifies a byte. Every `u8` belongs to exactly one class.
    pub fn of(byte: u8) -> Self {
        match byte {
            0xF8..=0xFF => Self::SystemRealtime,
            0xF0..=0xF7 => Self::SystemCommon,
            0x80..=0xEF => Self::ChannelStatus(channel_from_index(byte)),
            0x00..=0x7F => Self::Data,
        }
    }
}

/// Where a byte should go: to the port listening on a single channel, or to every port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Destination {
    /// The byte belongs to a channel message on this [`Channel`].
    Channel(Channel),
    /// The byte is not tied to a channel (or no channel has been established yet) and must reach every port.
    #[default]
    Broadcast,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Destination {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Channel(channel) => defmt::write!(fmt, "Channel({})", channel.number()),
            Self::Broadcast => defmt::write!(fmt, "Broadcast"),
        }
    }
}

/// Remembers the channel of the most recent channel status byte, so that data bytes sent under MIDI running status
/// can be attributed to it.
///
/// Starts out as [`Destination::Broadcast`]: until the first status byte arrives, nothing is known about the
/// stream, so every port listens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunningStatus {
    destination: Destination,
}

impl RunningStatus {
    /// Constructs a [`RunningStatus`] in its power-on state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the destination data bytes would currently be routed to.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Advances the state machine by one byte, returning the byte's [`Destination`]. See [`classify`].
    pub fn update(&mut self, byte: u8) -> Destination {
        let (destination, next) = classify(byte, *self);
        *self = next;
        destination
    }
}

impl From<Destination> for RunningStatus {
    fn from(destination: Destination) -> Self {
        Self { destination }
    }
}

/// The transition function of the running status state machine.
///
/// Given a byte and the current state, returns the byte's [`Destination`] and the state to carry into the next call:
/// - System Realtime bytes are broadcast and are transparent to running status, so the state is returned as-is.
/// - System Common bytes are broadcast and cancel running status.
/// - Channel status bytes are routed to their own channel, which becomes the running status.
/// - Data bytes follow the running status.
pub fn classify(byte: u8, state: RunningStatus) -> (Destination, RunningStatus) {
    match ByteClass::of(byte) {
        ByteClass::SystemRealtime => (Destination::Broadcast, state),
        ByteClass::SystemCommon => (Destination::Broadcast, Destination::Broadcast.into()),
        ByteClass::ChannelStatus(channel) => {
            let destination = Destination::Channel(channel);
            (destination, destination.into())
        }
        ByteClass::Data => (state.destination(), state),
    }
}
