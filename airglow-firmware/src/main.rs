//! Airglow - air-quality LED matrix firmware
//!
//! Shows the latest AQI and temperature on a 16x10 one-wire RGB matrix
//! driven from an RP2040 PIO state machine. Readings and the time arrive
//! as text lines from a host on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::{Common, Pio};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use airglow_core::app::{paint, AppContext, DisplayItem};
use airglow_core::Matrix;
use airglow_hal_rp2040::PioPulseEmitter;

use crate::display::{Display, DISPLAY};

mod boards;
mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// The loaded program must outlive the state machine
static PIO_COMMON: StaticCell<Common<'static, PIO0>> = StaticCell::new();

/// Pause after the boot frame so a debugger can attach before the first sync
const BOOT_PAUSE_SECS: u64 = 3;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Airglow firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut config = config::load();
    boards::check_pins(&mut config.matrix);

    // Host feed link
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for host feed");

    // Matrix data line on PIO0 SM0
    let Pio { common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let common = PIO_COMMON.init(common);
    let emitter = unwrap!(PioPulseEmitter::new(
        common,
        sm0,
        p.PIN_6,
        config.wire.slot_clock_hz
    ));
    let mut matrix = unwrap!(Matrix::new(&config.matrix, config.wire, emitter, Delay));
    info!(
        "Matrix {}x{} on GPIO{}, {} ns/slot",
        matrix.width(),
        matrix.height(),
        matrix.data_pin(),
        config.wire.slot_ns()
    );

    paint(matrix.framebuffer_mut(), &DisplayItem::smile());
    if let Err(e) = matrix.transmit().await {
        error!("Boot frame failed: {:?}", e);
    }
    Timer::after_secs(BOOT_PAUSE_SECS).await;

    *DISPLAY.lock().await = Some(Display {
        matrix,
        ctx: AppContext::new(config.schedule),
    });

    unwrap!(spawner.spawn(tasks::tick_task(config.schedule.frame_interval_s)));
    unwrap!(spawner.spawn(tasks::frame_task()));
    unwrap!(spawner.spawn(tasks::feed_rx_task(rx)));
    unwrap!(spawner.spawn(tasks::feed_tx_task(tx)));

    info!("All tasks spawned");
}
