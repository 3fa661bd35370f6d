//! The shared MIDI line: a single UART running at the MIDI baud rate, read and echoed one byte at a time.

use defmt::Format;
use embassy_stm32::{
    mode::Async,
    usart::{self, RingBufferedUartRx, UartTx},
};
use midi_port_router_lib::forwarding::Downstream;

/// The MIDI 1.0 DIN baud rate.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Returns the UART configuration for MIDI: 31250 baud, 8 data bits, no parity, 1 stop bit.
pub fn config() -> usart::Config {
    let mut config = usart::Config::default();
    config.baudrate = MIDI_BAUD_RATE;
    config
}

/// Raised when the UART reports a framing, noise, overrun, or parity error.
///
/// None of these are fatal: the byte in question is lost, but the line recovers on its own.
#[derive(Debug, Format)]
pub struct LineError(usart::Error);

impl From<usart::Error> for LineError {
    fn from(val: usart::Error) -> Self {
        LineError(val)
    }
}

/// The receiving and transmitting halves of the MIDI line.
///
/// The receiver is ring-buffered by DMA, so bytes which arrive while the previous byte is being echoed are held
/// until they are read rather than overrunning the UART.
pub struct MidiLine {
    rx: RingBufferedUartRx<'static>,
    tx: UartTx<'static, Async>,
}

impl MidiLine {
    /// Constructs a [`MidiLine`].
    pub fn new(rx: RingBufferedUartRx<'static>, tx: UartTx<'static, Async>) -> Self {
        Self { rx, tx }
    }

    /// Waits for the next byte.
    pub async fn read_byte(&mut self) -> Result<u8, LineError> {
        let mut buf = [0_u8; 1];
        loop {
            if self.rx.read(&mut buf).await? == 1 {
                return Ok(buf[0]);
            }
        }
    }
}

impl Downstream for MidiLine {
    type Error = LineError;

    /// Hands a byte to the UART. Returns once DMA has moved it into the transmit data register, which may be well
    /// before it has been shifted out.
    async fn write(&mut self, byte: u8) -> Result<(), LineError> {
        self.tx.write(&[byte]).await?;
        Ok(())
    }

    /// Waits for the UART's transmission complete flag, i.e., for the stop bit of the last byte to leave the line.
    async fn flush(&mut self) -> Result<(), LineError> {
        self.tx.flush().await?;
        Ok(())
    }
}
