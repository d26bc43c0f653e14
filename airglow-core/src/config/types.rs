//! Configuration type definitions

use crate::framebuffer::MAX_PIXELS;
use crate::wire::WireTiming;

use super::parser::ConfigError;

/// Number of GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Physical matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
    /// GPIO driving the chain's data input
    pub data_pin: u8,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 10,
            data_pin: 6,
        }
    }
}

/// When and how often the display updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleConfig {
    /// First local hour the display is on
    pub on_hour: u8,
    /// First local hour the display is off again
    pub off_hour: u8,
    /// Local time offset from UTC in seconds
    pub utc_offset_s: i32,
    /// Seconds between frames
    pub frame_interval_s: u32,
    /// Minutes between data refreshes
    pub data_sync_min: u32,
    /// Minutes between clock syncs
    pub time_sync_min: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            on_hour: 7,
            off_hour: 22,
            utc_offset_s: 0,
            frame_interval_s: 20,
            data_sync_min: 30,
            time_sync_min: 24 * 60,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub matrix: MatrixConfig,
    pub wire: WireTiming,
    pub schedule: ScheduleConfig,
}

impl DisplayConfig {
    /// Check cross-field limits the parser cannot see line by line
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matrix;
        if m.width == 0 || m.height == 0 {
            return Err(ConfigError::OutOfRange);
        }
        if m.width as usize * m.height as usize > MAX_PIXELS {
            return Err(ConfigError::OutOfRange);
        }
        if m.data_pin >= GPIO_COUNT {
            return Err(ConfigError::OutOfRange);
        }

        self.wire.validate().map_err(|_| ConfigError::OutOfRange)?;

        let s = &self.schedule;
        if s.on_hour > 24 || s.off_hour > 24 {
            return Err(ConfigError::OutOfRange);
        }
        if s.frame_interval_s == 0 {
            return Err(ConfigError::OutOfRange);
        }

        Ok(())
    }
}
