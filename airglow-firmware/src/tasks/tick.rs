//! Frame tick task
//!
//! Fires once right away and then every frame interval, carrying the
//! uptime the frame task uses for scheduling.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::FRAME_TICK;

/// Tick task - signals the frame task with the current uptime
#[embassy_executor::task]
pub async fn tick_task(interval_s: u32) {
    info!("Tick task started, every {} s", interval_s);

    let mut ticker = Ticker::every(Duration::from_secs(interval_s.max(1) as u64));

    loop {
        FRAME_TICK.signal(Instant::now().as_millis());
        ticker.next().await;
    }
}
