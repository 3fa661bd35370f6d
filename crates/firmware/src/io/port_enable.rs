//! Drives the enable lines which gate each output port's access to the shared MIDI line.

use embassy_stm32::gpio::{Level, Output};
use midi_port_router_lib::{
    forwarding::EnableGate,
    routing::{Port, PortEnables},
};

/// The four active-low enable lines, in port order.
pub struct EnableLines {
    lines: [Output<'static>; Port::COUNT],
}

impl EnableLines {
    /// Constructs [`EnableLines`]. Each line should start out low so that every port listens at power-on, matching the
    /// router's initial broadcast state.
    pub fn new(lines: [Output<'static>; Port::COUNT]) -> Self {
        Self { lines }
    }
}

impl EnableGate for EnableLines {
    /// Sets every line according to `enables`. A port is enabled by pulling its line low.
    ///
    /// Every line is written, whether or not its state changed. GPIO writes take effect before this returns.
    fn apply(&mut self, enables: &PortEnables) {
        for (port, enabled) in enables.iter() {
            let level = if enabled { Level::Low } else { Level::High };
            self.lines[port as usize].set_level(level);
        }
    }
}
