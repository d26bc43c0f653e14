//! Host feed transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::REQUEST_CHANNEL;

/// Feed TX task - writes queued sync requests to the host
#[embassy_executor::task]
pub async fn feed_tx_task(mut tx: BufferedUartTx) {
    info!("Feed TX task started");

    loop {
        let request = REQUEST_CHANNEL.receive().await;
        if let Err(e) = tx.write_all(request.line().as_bytes()).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
