//! This crate contains architecture-agnostic logic for the MIDI Port Router, a device which splits a single
//! [MIDI](https://midi.org/midi-1-0) stream across four physical output ports by channel.
//!
//! All four ports share the same serial line; each port is gated by an active-low enable signal. For every byte
//! received, the router decides which ports should listen before the byte is echoed downstream. Channel messages
//! reach only the port assigned to their channel, while system messages reach every port. A pair of DIP switches
//! selects which four consecutive channels are assigned to the ports.

#![deny(missing_docs)]
#![no_std]

pub mod configuration;
pub mod forwarding;

/// Data structures for tracking the MIDI byte stream the device has received.
pub mod midi_state;

pub mod router;
pub mod routing;
