//! Shared display state
//!
//! The matrix and the application context live behind one async mutex.
//! The frame task paints and transmits while holding it; the feed task
//! takes it briefly to record readings and clock syncs.

use embassy_rp::peripherals::PIO0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;

use airglow_core::app::AppContext;
use airglow_core::Matrix;
use airglow_hal_rp2040::PioPulseEmitter;

/// Concrete matrix type for this board
pub type FirmwareMatrix = Matrix<PioPulseEmitter<'static, PIO0, 0>, Delay>;

pub struct Display {
    pub matrix: FirmwareMatrix,
    pub ctx: AppContext,
}

/// Filled in by `main` once the boot frame is out
pub static DISPLAY: Mutex<CriticalSectionRawMutex, Option<Display>> = Mutex::new(None);
