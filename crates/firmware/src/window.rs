//! Tasks and types related to the channel window selected by the DIP switches.

use embassy_stm32::gpio::Output;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use embassy_time::{Duration, Timer};
use midi_port_router_lib::configuration::Selector;

const WINDOW_RECEIVER_CNT: usize = 1;
/// Shares the current window selection with tasks other than the one doing the routing.
pub static WINDOW_SYNC: Watch<CriticalSectionRawMutex, Selector, WINDOW_RECEIVER_CNT> =
    Watch::new_with(Selector::Channels1To4);
pub type WindowSender<'a> = Sender<'a, CriticalSectionRawMutex, Selector, WINDOW_RECEIVER_CNT>;
pub type WindowReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, Selector, WINDOW_RECEIVER_CNT>;

/// Blinks the selected window's position on the LED.
///
/// Each cycle has a dark half followed by a half in which the LED pulses once per [`Selector::position`]: once for
/// channels 1-4, four times for channels 13-16.
#[embassy_executor::task]
pub async fn display_window(mut led: Output<'static>, mut window: WindowReceiver<'static>) -> ! {
    const HALF_CYCLE: Duration = Duration::from_secs(1);

    loop {
        led.set_low();
        Timer::after(HALF_CYCLE).await;

        // n pulses need n lit frames and the n - 1 dark gaps between them
        let frames = u32::from(window.get().await.position()) * 2 - 1;
        let frame = HALF_CYCLE / frames;
        for _ in 0..frames {
            led.toggle();
            Timer::after(frame).await;
        }
    }
}
