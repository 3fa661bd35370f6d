//! MIDI Port Router is [Embassy](https://embassy.dev)-based firmware for a MIDI splitter which routes each channel
//! message to exactly one of four output ports. The firmware runs on the [Nucleo-F767ZI development
//! board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an F7-series
//! STM32 microcontroller.
//!
//! All four ports hang off the same UART transmit line; each is gated by an active-low enable signal. For every byte
//! received, the firmware decides which ports should listen, sets the enable lines, and only then echoes the byte.
//! Two DIP switches select which block of four consecutive channels maps onto the ports
//! (see [`Selector`][`midi_port_router_lib::configuration::Selector`]).

#![no_std]
#![no_main]

mod io;
mod window;

use crate::{
    io::{
        dip_switch::DipSwitch,
        port_enable::EnableLines,
        serial::{self, LineError, MidiLine},
    },
    window::{WINDOW_SYNC, WindowSender, display_window},
};
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    Config, bind_interrupts,
    gpio::{Input, Level, Output, Pull, Speed},
    peripherals,
    time::Hertz,
    usart::{self, Uart},
};
use midi_port_router_lib::{forwarding::forward, router::Router};
use static_cell::StaticCell;

use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        USART2 => usart::InterruptHandler<peripherals::USART2>;
    }
);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing MIDI Port Router");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        // USART2 sits on APB1: 216Mhz / 4 = 54Mhz, which divides evenly into 31250 baud
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    let p = embassy_stm32::init(config);

    // the enable lines start low so that every port listens until the first status byte arrives
    let enable_lines = EnableLines::new([
        Output::new(p.PE9, Level::Low, Speed::VeryHigh),
        Output::new(p.PE11, Level::Low, Speed::VeryHigh),
        Output::new(p.PE13, Level::Low, Speed::VeryHigh),
        Output::new(p.PE14, Level::Low, Speed::VeryHigh),
    ]);

    let dip_switch = DipSwitch::new(Input::new(p.PF12, Pull::Up), Input::new(p.PF13, Pull::Up));

    // per UM1974, USART2 is routed to PD5 (TX) and PD6 (RX) on the ST Zio connector; per RM0410, its DMA requests are
    // served by DMA1 streams 6 (TX) and 5 (RX)
    let uart = unwrap!(Uart::new(
        p.USART2,
        p.PD6,
        p.PD5,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH5,
        serial::config(),
    ));
    let (tx, rx) = uart.split();
    static RX_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();
    let rx = rx.into_ring_buffered(RX_BUFFER.init([0; 64]));
    let midi_line = MidiLine::new(rx, tx);

    let blue_led = Output::new(p.PB7, Level::Low, Speed::Low);
    let window_sender = WINDOW_SYNC.sender();
    unwrap!(spawner.spawn(route_task(
        midi_line,
        dip_switch,
        enable_lines,
        blue_led,
        window_sender
    )));

    let red_led = Output::new(p.PB14, Level::Low, Speed::Low);
    let window_receiver = WINDOW_SYNC
        .receiver()
        .expect("Window synchronizer should have a receiver available");
    unwrap!(spawner.spawn(display_window(red_led, window_receiver)));
}

/// Task responsible for routing the MIDI stream. All routing state lives here.
///
/// The blue LED doubles as the activity indicator: it is lit while a byte is being processed.
#[embassy_executor::task]
async fn route_task(
    mut midi_line: MidiLine,
    dip_switch: DipSwitch,
    mut enable_lines: EnableLines,
    mut activity_led: Output<'static>,
    window: WindowSender<'static>,
) -> ! {
    let mut router = Router::new(dip_switch.read());
    info!("Routing {}", router.window());
    window.send(router.selector());

    loop {
        if let Err(e) = process_midi(
            &mut router,
            &mut midi_line,
            &dip_switch,
            &mut enable_lines,
            &mut activity_led,
            &window,
        )
        .await
        {
            warn!("MIDI line error, byte dropped: {}", e);
        }
        activity_led.set_low();
    }
}

/// Helper function which routes bytes until the line reports an error.
///
/// For each byte: samples the DIP switches, decides which ports should listen, drives the enable lines, and only then
/// echoes the byte. Nothing is read until the previous byte has been fully transmitted, so the enable lines never
/// change while a byte is on the wire.
async fn process_midi(
    router: &mut Router,
    midi_line: &mut MidiLine,
    dip_switch: &DipSwitch,
    enable_lines: &mut EnableLines,
    activity_led: &mut Output<'static>,
    window: &WindowSender<'static>,
) -> Result<(), LineError> {
    loop {
        let byte = midi_line.read_byte().await?;
        activity_led.set_high();

        if let Some(new_window) = router.configure(dip_switch.read()) {
            info!("DIP switches changed, now routing {}", new_window);
            window.send(router.selector());
        }

        let enables = router.route(byte);
        debug!("Routing {=u8:#x} to {}", byte, enables);
        forward(enable_lines, midi_line, &enables, byte).await?;
        activity_led.set_low();
    }
}
