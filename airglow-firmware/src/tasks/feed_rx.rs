//! Host feed receive task
//!
//! Assembles lines from UART0 and applies readings and clock syncs to the
//! shared application context.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Instant;
use embedded_io_async::Read;
use portable_atomic::Ordering;

use airglow_core::app::{FeedMessage, LineParser};

use crate::channels::FEED_ERRORS;
use crate::display::DISPLAY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Feed RX task - parses host lines and updates the context
#[embassy_executor::task]
pub async fn feed_rx_task(mut rx: BufferedUartRx) {
    info!("Feed RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(message)) => apply(message).await,
                        Ok(None) => {}
                        Err(e) => {
                            let total = FEED_ERRORS.fetch_add(1, Ordering::Relaxed) + 1;
                            warn!("Feed line rejected: {:?} ({} so far)", e, total);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn apply(message: FeedMessage) {
    let now_ms = Instant::now().as_millis();
    let mut guard = DISPLAY.lock().await;
    let Some(display) = guard.as_mut() else {
        return;
    };

    match message {
        FeedMessage::Reading(reading) => {
            info!("Reading: aqi={} temp={}", reading.aqi, reading.temperature);
            display.ctx.update_reading(reading, now_ms);
        }
        FeedMessage::Clock { epoch_secs } => {
            info!("Clock synced to {}", epoch_secs);
            display.ctx.set_clock(epoch_secs, now_ms);
        }
    }
}
