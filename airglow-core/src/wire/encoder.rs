//! Framebuffer to pulse train
//!
//! Every bit becomes exactly three pulses: low for T3, high for T1, then
//! high (bit 1) or low (bit 0) for T2. A 1 therefore reads on the wire as
//! low T3 followed by a single high stretch of T1 + T2.

use airglow_hal::Pulse;

use crate::color::PackedColor;
use crate::wire::timing::WireTiming;

/// Pulses emitted per transmitted bit
pub const PULSES_PER_BIT: usize = 3;

/// Pulses for a single bit
pub fn encode_bit(bit: bool, timing: &WireTiming) -> [Pulse; PULSES_PER_BIT] {
    let tail = if bit {
        Pulse::high(timing.t2)
    } else {
        Pulse::low(timing.t2)
    };
    [Pulse::low(timing.t3), Pulse::high(timing.t1), tail]
}

/// The 24 bits of a packed color, most significant first
pub fn pixel_bits(color: PackedColor) -> impl Iterator<Item = bool> {
    let word = color.bits();
    (0..PackedColor::BITS).rev().map(move |i| (word >> i) & 1 == 1)
}

/// Pulse train for a whole frame, pixel 0 first
///
/// Lazily walks `pixels`; the caller must keep the buffer untouched until
/// the iterator is exhausted.
pub fn pulse_train(
    pixels: &[PackedColor],
    timing: WireTiming,
) -> impl Iterator<Item = Pulse> + '_ {
    pixels
        .iter()
        .flat_map(|&pixel| pixel_bits(pixel))
        .flat_map(move |bit| encode_bit(bit, &timing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use airglow_hal::Level;

    #[test]
    fn test_encode_zero() {
        let t = WireTiming::REFERENCE;
        assert_eq!(
            encode_bit(false, &t),
            [Pulse::low(3), Pulse::high(2), Pulse::low(5)]
        );
    }

    #[test]
    fn test_encode_one() {
        let t = WireTiming::REFERENCE;
        let pulses = encode_bit(true, &t);
        assert_eq!(pulses, [Pulse::low(3), Pulse::high(2), Pulse::high(5)]);

        // High for T1 + T2 without a break
        let high: u32 = pulses
            .iter()
            .filter(|p| p.level == Level::High)
            .map(|p| p.slots as u32)
            .sum();
        assert_eq!(high, 7);
    }

    #[test]
    fn test_bit_durations_equal() {
        let t = WireTiming::REFERENCE;
        for bit in [false, true] {
            let total: u32 = encode_bit(bit, &t).iter().map(|p| p.slots as u32).sum();
            assert_eq!(total, t.bit_slots());
        }
    }

    #[test]
    fn test_pixel_bits_msb_first() {
        let mut bits = [false; 24];
        for (i, bit) in pixel_bits(PackedColor::from_bits(0x80_00_01)).enumerate() {
            bits[i] = bit;
        }
        assert!(bits[0]);
        assert!(bits[1..23].iter().all(|&b| !b));
        assert!(bits[23]);
    }

    #[test]
    fn test_pulse_train_order() {
        // Green high byte first: 0x01_00_00 has its only 1 at bit index 7
        let pixels = [PackedColor::from_bits(0x01_00_00), PackedColor::BLACK];
        let t = WireTiming::REFERENCE;

        let mut count = 0;
        for (i, pulse) in pulse_train(&pixels, t).enumerate() {
            let bit = i / PULSES_PER_BIT;
            if i % PULSES_PER_BIT == 2 {
                let expect = if bit == 7 { Level::High } else { Level::Low };
                assert_eq!(pulse.level, expect, "bit {bit}");
            }
            count += 1;
        }
        assert_eq!(count, 2 * 24 * PULSES_PER_BIT);
    }
}
