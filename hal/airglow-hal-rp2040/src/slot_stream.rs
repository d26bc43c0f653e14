//! Slot-stream PIO program
//!
//! The state machine runs a single `out pins, 1` in a loop with autopull,
//! so every PIO clock moves one slot level from the OSR to the data pin.
//! Pulse lengths are decided entirely by the words the CPU pushes (see
//! [`airglow_core::wire::SlotWords`]); the program itself knows nothing
//! about bits or pixels.

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// PIO instructions executed per slot
pub const INSTRUCTIONS_PER_SLOT: u32 = 1;

/// Fastest slot clock the divider can express (divider 1.0)
pub const MAX_SLOT_CLOCK_HZ: u32 = SYS_CLK_HZ / INSTRUCTIONS_PER_SLOT;

/// Calculate the clock divider for a target slot rate
///
/// The program executes one instruction per slot, so:
/// divider = SYS_CLK / slot_hz
///
/// Returns (integer_part, fractional_part) for the 16.8 fixed-point divider.
pub fn calc_clock_divider(slot_hz: u32) -> (u16, u8) {
    if slot_hz == 0 {
        return (0xFFFF, 0xFF);
    }

    let divisor = slot_hz as u64 * INSTRUCTIONS_PER_SLOT as u64;
    let divider_x256 = (SYS_CLK_HZ as u64 * 256) / divisor;

    let int_part = (divider_x256 / 256).clamp(1, 0xFFFF) as u16;
    let frac_part = if divider_x256 / 256 == 0 {
        0
    } else {
        (divider_x256 % 256) as u8
    };

    (int_part, frac_part)
}

/// Divider as the raw bits of a `U24F8`
pub fn divider_bits(slot_hz: u32) -> u32 {
    let (int_part, frac_part) = calc_clock_divider(slot_hz);
    ((int_part as u32) << 8) | frac_part as u32
}

/// Slot rate the state machine actually runs at for a requested rate
pub fn effective_slot_hz(slot_hz: u32) -> u32 {
    let bits = divider_bits(slot_hz) as u64;
    ((SYS_CLK_HZ as u64 * 256) / (bits * INSTRUCTIONS_PER_SLOT as u64)) as u32
}

/// CPU cycles for the OSR to drain one full word at `slot_hz`
pub fn word_drain_cycles(slot_hz: u32, slots_per_word: u32) -> u32 {
    let bits = divider_bits(slot_hz) as u64;
    let cycles = (bits * slots_per_word as u64 * INSTRUCTIONS_PER_SLOT as u64).div_ceil(256);
    cycles.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_divider() {
        // 125 MHz / 8 MHz = 15.625
        assert_eq!(calc_clock_divider(8_000_000), (15, 160));

        // 125 MHz / 1 MHz = 125
        assert_eq!(calc_clock_divider(1_000_000), (125, 0));
    }

    #[test]
    fn test_clock_divider_limits() {
        assert_eq!(calc_clock_divider(0), (0xFFFF, 0xFF));
        // Faster than the system clock clamps to 1.0
        assert_eq!(calc_clock_divider(SYS_CLK_HZ * 2), (1, 0));
        assert_eq!(calc_clock_divider(1), (0xFFFF, 0));
    }

    #[test]
    fn test_effective_rate() {
        assert_eq!(effective_slot_hz(8_000_000), 8_000_000);
        assert_eq!(effective_slot_hz(1_000_000), 1_000_000);
    }

    #[test]
    fn test_word_drain() {
        // 32 slots at 15.625 cycles each
        assert_eq!(word_drain_cycles(8_000_000, 32), 500);
    }
}
