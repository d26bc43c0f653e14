//! Frame task
//!
//! On every tick: advance the application context, queue any sync
//! requests, then paint and transmit whatever the context asks for.

use defmt::*;

use airglow_core::app::{paint, DisplayItem, FrameAction, Painted};

use crate::channels::{FRAME_TICK, REQUEST_CHANNEL};
use crate::display::{Display, DISPLAY};

/// Frame task - renders one frame per tick
#[embassy_executor::task]
pub async fn frame_task() {
    info!("Frame task started");

    loop {
        let now_ms = FRAME_TICK.wait().await;

        // A feed update still holding the display means we skip this cycle
        let Ok(mut guard) = DISPLAY.try_lock() else {
            warn!("Display busy, skipping frame");
            continue;
        };
        let Some(display) = guard.as_mut() else {
            continue;
        };

        run_frame(display, now_ms).await;
    }
}

async fn run_frame(display: &mut Display, now_ms: u64) {
    let was_sleeping = display.ctx.is_sleeping();
    let step = display.ctx.step(now_ms);
    if was_sleeping && !display.ctx.is_sleeping() {
        info!("Waking up");
    }

    for request in step.requests() {
        debug!("Requesting {:?} sync", request);
        if REQUEST_CHANNEL.try_send(request).is_err() {
            warn!("Request channel full, dropping {:?}", request);
        }
    }

    let matrix = &mut display.matrix;
    match step.action {
        FrameAction::Show(item) => {
            if paint(matrix.framebuffer_mut(), &item) == Painted::Fallback {
                warn!("Could not render {:?}, showing frown", item.value);
            }
        }
        FrameAction::Waiting { attempt } => {
            debug!("No reading yet, attempt {}", attempt);
            let attempt = i32::try_from(attempt).unwrap_or(i32::MAX);
            paint(matrix.framebuffer_mut(), &DisplayItem::progress(attempt));
        }
        FrameAction::Blank => {
            info!("Entering sleep window");
            matrix.clear();
        }
        FrameAction::Asleep => {
            trace!("Sleeping");
            return;
        }
    }

    if let Err(e) = matrix.transmit().await {
        error!("Transmit failed: {:?}", e);
    }
}
