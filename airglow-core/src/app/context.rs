//! Frame-to-frame application state

use crate::config::ScheduleConfig;

use super::clock::WallClock;
use super::policy::{DisplayItem, Reading};

const MS_PER_MIN: u64 = 60_000;

/// Tracks when something was last refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncTracker {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl SyncTracker {
    pub const fn new(interval_min: u32) -> Self {
        Self {
            interval_ms: interval_min as u64 * MS_PER_MIN,
            last_ms: None,
        }
    }

    pub fn mark(&mut self, uptime_ms: u64) {
        self.last_ms = Some(uptime_ms);
    }

    pub fn last(&self) -> Option<u64> {
        self.last_ms
    }

    /// Due when never synced, or once the interval has strictly elapsed
    pub fn is_due(&self, uptime_ms: u64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => last.saturating_add(self.interval_ms) < uptime_ms,
        }
    }

    /// Uptime at which the next sync falls due
    pub fn next_due(&self) -> u64 {
        self.last_ms
            .map_or(0, |last| last.saturating_add(self.interval_ms))
    }
}

/// Something the host should send us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncRequest {
    Time,
    Data,
}

impl SyncRequest {
    /// Request line written to the feed link
    pub const fn line(self) -> &'static str {
        match self {
            SyncRequest::Time => "? T\n",
            SyncRequest::Data => "? R\n",
        }
    }
}

/// What the frame task should do with the matrix this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameAction {
    /// Paint and transmit an item
    Show(DisplayItem),
    /// Just entered the off window; send one black frame
    Blank,
    /// Inside the off window; leave the line alone
    Asleep,
    /// No reading yet; show how many times we have asked
    Waiting { attempt: u32 },
}

/// Result of one scheduler step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub action: FrameAction,
    pub request_time: bool,
    pub request_data: bool,
}

impl Step {
    pub fn requests(&self) -> impl Iterator<Item = SyncRequest> {
        let time = self.request_time.then_some(SyncRequest::Time);
        let data = self.request_data.then_some(SyncRequest::Data);
        time.into_iter().chain(data)
    }
}

/// All state carried between frames
#[derive(Debug, Clone)]
pub struct AppContext {
    schedule: ScheduleConfig,
    clock: WallClock,
    time_sync: SyncTracker,
    data_sync: SyncTracker,
    reading: Option<Reading>,
    show_temp: bool,
    sleeping: bool,
    attempts: u32,
}

impl AppContext {
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self {
            clock: WallClock::new(schedule.utc_offset_s),
            time_sync: SyncTracker::new(schedule.time_sync_min),
            data_sync: SyncTracker::new(schedule.data_sync_min),
            schedule,
            reading: None,
            show_temp: false,
            sleeping: false,
            attempts: 0,
        }
    }

    pub fn clock(&self) -> &WallClock {
        &self.clock
    }

    pub fn reading(&self) -> Option<Reading> {
        self.reading
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn time_sync(&self) -> &SyncTracker {
        &self.time_sync
    }

    pub fn data_sync(&self) -> &SyncTracker {
        &self.data_sync
    }

    /// A clock sync arrived
    pub fn set_clock(&mut self, epoch_secs: u64, uptime_ms: u64) {
        self.clock.set(epoch_secs, uptime_ms);
        self.time_sync.mark(uptime_ms);
    }

    /// A fresh reading arrived
    pub fn update_reading(&mut self, reading: Reading, uptime_ms: u64) {
        self.reading = Some(reading);
        self.data_sync.mark(uptime_ms);
        self.attempts = 0;
    }

    /// True when `hour` falls in `[on_hour, off_hour)`
    pub fn in_show_window(&self, hour: u8) -> bool {
        hour >= self.schedule.on_hour && hour < self.schedule.off_hour
    }

    /// Advance one frame
    ///
    /// The sleep window only applies once the clock is valid. While asleep
    /// no syncs are requested. The AQI/temperature alternation flips every
    /// time an item is shown, starting with AQI.
    pub fn step(&mut self, uptime_ms: u64) -> Step {
        if let Some(hour) = self.clock.local_hour(uptime_ms) {
            if self.in_show_window(hour) {
                self.sleeping = false;
            } else if !self.sleeping {
                self.sleeping = true;
                return Step {
                    action: FrameAction::Blank,
                    request_time: false,
                    request_data: false,
                };
            }
        }

        if self.sleeping {
            return Step {
                action: FrameAction::Asleep,
                request_time: false,
                request_data: false,
            };
        }

        let request_time = self.time_sync.is_due(uptime_ms);
        let request_data = self.data_sync.is_due(uptime_ms);

        let action = match self.reading {
            Some(reading) => {
                let item = if self.show_temp {
                    DisplayItem::temperature(reading.temperature)
                } else {
                    DisplayItem::aqi(reading.aqi)
                };
                self.show_temp = !self.show_temp;
                FrameAction::Show(item)
            }
            None => {
                if request_data {
                    self.attempts = self.attempts.saturating_add(1);
                }
                FrameAction::Waiting {
                    attempt: self.attempts,
                }
            }
        };

        Step {
            action,
            request_time,
            request_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::policy::DisplayValue;
    use crate::color::palette;

    // 2024-06-01T12:00:00Z
    const NOON: u64 = 1_717_243_200;
    const HOUR_MS: u64 = 3_600_000;

    fn ctx() -> AppContext {
        AppContext::new(ScheduleConfig::default())
    }

    fn reading() -> Reading {
        Reading {
            aqi: 42,
            temperature: 21,
        }
    }

    #[test]
    fn test_sync_tracker() {
        let mut t = SyncTracker::new(30);
        assert!(t.is_due(0));
        assert_eq!(t.next_due(), 0);

        t.mark(1_000);
        assert!(!t.is_due(1_000));
        assert!(!t.is_due(1_000 + 30 * MS_PER_MIN));
        assert!(t.is_due(1_001 + 30 * MS_PER_MIN));
        assert_eq!(t.next_due(), 1_000 + 30 * MS_PER_MIN);
    }

    #[test]
    fn test_waits_without_reading() {
        let mut c = ctx();
        let step = c.step(0);
        assert_eq!(step.action, FrameAction::Waiting { attempt: 1 });
        assert!(step.request_time);
        assert!(step.request_data);

        let step = c.step(20_000);
        assert_eq!(step.action, FrameAction::Waiting { attempt: 2 });

        let mut requests = step.requests();
        assert_eq!(requests.next(), Some(SyncRequest::Time));
        assert_eq!(requests.next(), Some(SyncRequest::Data));
        assert_eq!(requests.next(), None);
    }

    #[test]
    fn test_alternates_aqi_first() {
        let mut c = ctx();
        c.set_clock(NOON, 0);
        c.update_reading(reading(), 0);

        let first = c.step(1_000).action;
        let second = c.step(2_000).action;
        let third = c.step(3_000).action;
        assert_eq!(first, FrameAction::Show(DisplayItem::aqi(42)));
        assert_eq!(second, FrameAction::Show(DisplayItem::temperature(21)));
        assert_eq!(third, first);
    }

    #[test]
    fn test_no_requests_while_fresh() {
        let mut c = ctx();
        c.set_clock(NOON, 0);
        c.update_reading(reading(), 0);

        let step = c.step(60_000);
        assert_eq!(step.requests().count(), 0);

        let step = c.step(31 * MS_PER_MIN);
        assert!(step.request_data);
        assert!(!step.request_time);
    }

    #[test]
    fn test_sleep_window() {
        let mut c = ctx();
        // 21:00 UTC, one hour before off
        c.set_clock(NOON + 9 * 3600, 0);
        c.update_reading(reading(), 0);
        assert!(matches!(c.step(0).action, FrameAction::Show(_)));

        // 22:00 blanks exactly once
        let step = c.step(HOUR_MS);
        assert_eq!(step.action, FrameAction::Blank);
        assert!(c.is_sleeping());
        assert_eq!(c.step(HOUR_MS + 1_000).action, FrameAction::Asleep);
        assert_eq!(c.step(HOUR_MS + 1_000).requests().count(), 0);

        // 07:00 next day wakes
        let step = c.step(10 * HOUR_MS);
        assert!(matches!(step.action, FrameAction::Show(_)));
        assert!(!c.is_sleeping());
    }

    #[test]
    fn test_unset_clock_never_sleeps() {
        let mut c = ctx();
        c.update_reading(reading(), 0);
        for i in 0..48 {
            let action = c.step(i * HOUR_MS).action;
            assert!(matches!(action, FrameAction::Show(_)));
        }
    }

    #[test]
    fn test_stale_clock_before_2022_is_ignored() {
        let mut c = ctx();
        // 2021-01-01T03:00:00Z would be in the off window
        c.set_clock(1_609_459_200 + 3 * 3600, 0);
        c.update_reading(reading(), 0);
        assert!(matches!(c.step(0).action, FrameAction::Show(_)));
    }

    #[test]
    fn test_show_window_bounds() {
        let c = ctx();
        assert!(!c.in_show_window(6));
        assert!(c.in_show_window(7));
        assert!(c.in_show_window(21));
        assert!(!c.in_show_window(22));
    }

    #[test]
    fn test_reading_resets_attempts() {
        let mut c = ctx();
        c.step(0);
        c.step(1);
        c.update_reading(reading(), 2);
        assert!(matches!(c.step(3).action, FrameAction::Show(_)));
    }

    #[test]
    fn test_progress_item() {
        assert_eq!(
            DisplayItem::progress(3),
            DisplayItem::new(DisplayValue::Number(3), palette::WHITE, false)
        );
        assert_eq!(DisplayItem::progress(-1), DisplayItem::frown(palette::YELLOW));
    }
}
