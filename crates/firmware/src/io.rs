//! This module wraps the board's peripherals: the DIP switches (input), the port enable lines (output), and the
//! shared MIDI line (both).

pub mod dip_switch;
pub mod port_enable;
pub mod serial;
