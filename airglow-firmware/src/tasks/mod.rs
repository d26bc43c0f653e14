//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod feed_rx;
pub mod feed_tx;
pub mod frame;
pub mod tick;

pub use feed_rx::feed_rx_task;
pub use feed_tx::feed_tx_task;
pub use frame::frame_task;
pub use tick::tick_task;
