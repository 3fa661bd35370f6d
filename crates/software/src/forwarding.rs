//! Forwards a routed byte downstream.
//!
//! All four ports listen to the same line, so the enable lines for a byte must hold for as long as that byte is on
//! the wire. [`forward`] applies the enables, writes the byte, and returns only once the line reports the byte fully
//! transmitted; the caller may not touch the enables for the next byte until then.

use crate::routing::PortEnables;

/// Drives the enable lines which gate each port's access to the shared line.
pub trait EnableGate {
    /// Sets every enable line according to `enables`. Must take effect before returning.
    fn apply(&mut self, enables: &PortEnables);
}

/// The transmitting side of the shared MIDI line.
#[allow(async_fn_in_trait)]
pub trait Downstream {
    /// Raised when the line fails to accept or transmit a byte.
    type Error;

    /// Hands a byte to the line. May return before the byte has left the transmitter.
    async fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Waits until every byte handed to the line has been fully transmitted.
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Gates the ports per `enables`, then sends `byte` and waits for its last bit to leave the line.
pub async fn forward<G: EnableGate, D: Downstream>(
    gate: &mut G,
    downstream: &mut D,
    enables: &PortEnables,
    byte: u8,
) -> Result<(), D::Error> {
    gate.apply(enables);
    downstream.write(byte).await?;
    downstream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Port;
    use embassy_futures::block_on;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Event {
        Apply(PortEnables),
        Write(u8),
        Flush,
    }

    /// Logs gate and line activity in the order it happens.
    struct Recorder {
        events: [Option<Event>; 8],
        len: usize,
        fail_writes: bool,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                events: [None; 8],
                len: 0,
                fail_writes: false,
            }
        }

        fn record(&mut self, event: Event) {
            self.events[self.len] = Some(event);
            self.len += 1;
        }

        fn events(&self) -> &[Option<Event>] {
            &self.events[..self.len]
        }
    }

    struct Gate<'a>(&'a core::cell::RefCell<Recorder>);
    struct Line<'a>(&'a core::cell::RefCell<Recorder>);

    impl EnableGate for Gate<'_> {
        fn apply(&mut self, enables: &PortEnables) {
            self.0.borrow_mut().record(Event::Apply(*enables));
        }
    }

    impl Downstream for Line<'_> {
        type Error = ();

        async fn write(&mut self, byte: u8) -> Result<(), ()> {
            let mut recorder = self.0.borrow_mut();
            if recorder.fail_writes {
                return Err(());
            }
            recorder.record(Event::Write(byte));
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), ()> {
            self.0.borrow_mut().record(Event::Flush);
            Ok(())
        }
    }

    #[test]
    fn enables_change_only_after_previous_byte_is_flushed() {
        let recorder = core::cell::RefCell::new(Recorder::new());
        let mut gate = Gate(&recorder);
        let mut line = Line(&recorder);

        // data byte for port 2 followed immediately by a status byte for port 1
        block_on(forward(&mut gate, &mut line, &PortEnables::only(Port::Two), 0x3C))
            .expect("Recorder should accept the write");
        block_on(forward(&mut gate, &mut line, &PortEnables::only(Port::One), 0x90))
            .expect("Recorder should accept the write");

        assert_eq!(
            &[
                Some(Event::Apply(PortEnables::only(Port::Two))),
                Some(Event::Write(0x3C)),
                Some(Event::Flush),
                Some(Event::Apply(PortEnables::only(Port::One))),
                Some(Event::Write(0x90)),
                Some(Event::Flush),
            ],
            recorder.borrow().events(),
            "Expected left but got right"
        );
    }

    #[test]
    fn failed_write_is_not_flushed() {
        let recorder = core::cell::RefCell::new(Recorder::new());
        recorder.borrow_mut().fail_writes = true;
        let mut gate = Gate(&recorder);
        let mut line = Line(&recorder);

        assert_eq!(
            Err(()),
            block_on(forward(&mut gate, &mut line, &PortEnables::all(), 0xF8))
        );
        assert_eq!(
            &[Some(Event::Apply(PortEnables::all()))],
            recorder.borrow().events(),
            "Expected left but got right"
        );
    }
}
