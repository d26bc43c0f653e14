//! Timed line-level abstractions
//!
//! A one-wire LED chain is driven by holding a single data line high or low
//! for precise multiples of a slot unit. These types describe that waveform
//! without committing to how it is produced.

/// Logic level of the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Check if this level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// One timed segment of the waveform
///
/// `slots` is a duration in slot units. The slot length itself (e.g.
/// 125 ns at an 8 MHz slot clock) belongs to the emitter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    /// Line level held for the duration
    pub level: Level,
    /// Duration in slot units
    pub slots: u8,
}

impl Pulse {
    /// Create a low pulse
    pub const fn low(slots: u8) -> Self {
        Self {
            level: Level::Low,
            slots,
        }
    }

    /// Create a high pulse
    pub const fn high(slots: u8) -> Self {
        Self {
            level: Level::High,
            slots,
        }
    }
}

/// Pulse emitter
///
/// Implementations put a pulse train on the physical line (or record it).
/// A call emits one complete frame and returns once the last slot has been
/// shifted out; the line is left low afterwards.
///
/// Emission must not be interleaved with another emission on the same line.
/// Taking `&mut self` enforces that for a single owner; shared owners need a
/// mutex around the whole paint-then-emit sequence.
pub trait PulseEmitter {
    /// Error reported by the underlying peripheral
    type Error;

    /// Emit every pulse of `pulses`, in order, without gaps
    fn emit<I>(&mut self, pulses: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pulse>;

    /// Slot unit length in nanoseconds
    fn slot_ns(&self) -> u32;
}
