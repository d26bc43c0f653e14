//! Application policy
//!
//! Everything above the matrix that decides *what* to show: which reading,
//! in which color, whether the display should be asleep, and when fresh
//! data or a clock sync is due. All of it is plain state owned by
//! [`AppContext`] so the firmware task can drive it and host tests can
//! exercise it without hardware.

pub mod clock;
pub mod context;
pub mod feed;
pub mod policy;

pub use clock::WallClock;
pub use context::{AppContext, FrameAction, Step, SyncRequest, SyncTracker};
pub use feed::{parse_line, FeedError, FeedMessage, LineParser};
pub use policy::{paint, paint_value, DisplayItem, DisplayValue, Painted, Reading};
