//! Bit timing parameters

/// Timing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// A phase length is zero
    ZeroPhase,
    /// Slot clock is zero or faster than 1 GHz
    InvalidSlotClock,
}

/// Phase lengths and slot clock of the one-wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireTiming {
    /// High phase shared by both bit values (slots)
    pub t1: u8,
    /// Phase that is high for a 1 and low for a 0 (slots)
    pub t2: u8,
    /// Leading low phase (slots)
    pub t3: u8,
    /// Slot clock in Hz
    pub slot_clock_hz: u32,
    /// Minimum low time after a frame before the next one (ms)
    pub settle_ms: u32,
}

impl WireTiming {
    /// 8 MHz slot clock, 2/5/3 phases: 1.25 µs per bit
    pub const REFERENCE: WireTiming = WireTiming {
        t1: 2,
        t2: 5,
        t3: 3,
        slot_clock_hz: 8_000_000,
        settle_ms: 10,
    };

    /// Check that every phase and the slot clock are usable
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.t1 == 0 || self.t2 == 0 || self.t3 == 0 {
            return Err(TimingError::ZeroPhase);
        }
        if self.slot_clock_hz == 0 || self.slot_clock_hz > 1_000_000_000 {
            return Err(TimingError::InvalidSlotClock);
        }
        Ok(())
    }

    /// Slots per transmitted bit
    pub fn bit_slots(&self) -> u32 {
        self.t1 as u32 + self.t2 as u32 + self.t3 as u32
    }

    /// Length of one slot in nanoseconds
    pub fn slot_ns(&self) -> u32 {
        1_000_000_000 / self.slot_clock_hz.max(1)
    }

    /// Length of one bit in nanoseconds
    pub fn bit_ns(&self) -> u32 {
        self.bit_slots() * self.slot_ns()
    }

    /// Slots needed to send `pixels` 24-bit words
    pub fn frame_slots(&self, pixels: usize) -> u32 {
        pixels as u32 * 24 * self.bit_slots()
    }

    /// Wire time of a frame of `pixels` words, excluding the settle
    pub fn frame_us(&self, pixels: usize) -> u32 {
        (self.frame_slots(pixels) as u64 * self.slot_ns() as u64 / 1000) as u32
    }
}

impl Default for WireTiming {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_timing() {
        let t = WireTiming::REFERENCE;
        assert_eq!(t.bit_slots(), 10);
        assert_eq!(t.slot_ns(), 125);
        assert_eq!(t.bit_ns(), 1250);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_frame_duration() {
        // 16x10 matrix: 160 * 24 bits * 1.25 µs = 4.8 ms
        let t = WireTiming::REFERENCE;
        assert_eq!(t.frame_slots(160), 38_400);
        assert_eq!(t.frame_us(160), 4_800);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let mut t = WireTiming::REFERENCE;
        t.t2 = 0;
        assert_eq!(t.validate(), Err(TimingError::ZeroPhase));

        let mut t = WireTiming::REFERENCE;
        t.slot_clock_hz = 0;
        assert_eq!(t.validate(), Err(TimingError::InvalidSlotClock));
    }
}
