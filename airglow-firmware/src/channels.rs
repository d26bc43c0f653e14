//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use airglow_core::app::SyncRequest;

/// Channel capacity for outgoing sync requests
const REQUEST_CHANNEL_SIZE: usize = 4;

/// Frame tick carrying uptime in milliseconds; coalesces if the frame task lags
pub static FRAME_TICK: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Requests for the host, written out by the feed TX task
pub static REQUEST_CHANNEL: Channel<CriticalSectionRawMutex, SyncRequest, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Feed lines rejected since boot
pub static FEED_ERRORS: AtomicU32 = AtomicU32::new(0);
