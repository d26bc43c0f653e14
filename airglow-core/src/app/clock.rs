//! Wall clock anchored to uptime
//!
//! The board has no battery-backed RTC. A time sync records the epoch
//! seconds alongside the uptime at which it arrived, and later reads
//! extrapolate from there.

/// 2022-01-01T00:00:00Z; earlier local times mean the clock was never set
pub const CLOCK_VALID_AFTER: i64 = 1_640_995_200;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Anchor {
    epoch_secs: u64,
    uptime_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    anchor: Option<Anchor>,
    utc_offset_s: i32,
}

impl WallClock {
    pub const fn new(utc_offset_s: i32) -> Self {
        Self {
            anchor: None,
            utc_offset_s,
        }
    }

    /// Record that it is `epoch_secs` UTC at `uptime_ms`
    pub fn set(&mut self, epoch_secs: u64, uptime_ms: u64) {
        self.anchor = Some(Anchor {
            epoch_secs,
            uptime_ms,
        });
    }

    pub fn utc_offset_s(&self) -> i32 {
        self.utc_offset_s
    }

    /// UTC seconds at `uptime_ms`, if a sync has happened
    pub fn now_utc(&self, uptime_ms: u64) -> Option<u64> {
        let anchor = self.anchor?;
        let elapsed = uptime_ms.saturating_sub(anchor.uptime_ms) / 1000;
        Some(anchor.epoch_secs.saturating_add(elapsed))
    }

    /// Local seconds at `uptime_ms`
    pub fn now_local(&self, uptime_ms: u64) -> Option<i64> {
        let utc = i64::try_from(self.now_utc(uptime_ms)?).ok()?;
        Some(utc.saturating_add(self.utc_offset_s as i64))
    }

    /// True once the local time is past 2022
    pub fn is_valid(&self, uptime_ms: u64) -> bool {
        self.now_local(uptime_ms)
            .is_some_and(|t| t >= CLOCK_VALID_AFTER)
    }

    /// Local hour of day, only when the clock is valid
    pub fn local_hour(&self, uptime_ms: u64) -> Option<u8> {
        let local = self.now_local(uptime_ms)?;
        if local < CLOCK_VALID_AFTER {
            return None;
        }
        Some(hour_of_day(local))
    }
}

/// Hour of day (0..24) for a local timestamp
pub fn hour_of_day(local_secs: i64) -> u8 {
    (local_secs.rem_euclid(SECS_PER_DAY) / SECS_PER_HOUR) as u8
}
