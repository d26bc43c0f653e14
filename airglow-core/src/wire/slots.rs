//! Slot packing
//!
//! A slot-stream peripheral shifts one slot level per clock out of 32-bit
//! words, most significant bit first. [`SlotWords`] turns a pulse train into
//! those words. The last word is padded with low slots so the line ends in
//! the reset state; when the train fills its last word exactly and that
//! word ends high, one extra all-low word follows.

use airglow_hal::{Level, Pulse};

/// Slots carried by one packed word
pub const SLOTS_PER_WORD: u32 = 32;

/// Iterator adapter packing pulses into MSB-first slot words
#[derive(Debug, Clone)]
pub struct SlotWords<I> {
    pulses: I,
    level: Level,
    remaining: u32,
    /// Last slot handed out was high
    ended_high: bool,
}

impl<I> SlotWords<I>
where
    I: Iterator<Item = Pulse>,
{
    pub fn new(pulses: I) -> Self {
        Self {
            pulses,
            level: Level::Low,
            remaining: 0,
            ended_high: false,
        }
    }
}

/// Bits `filled .. filled + take` of a word, counted from the MSB
fn run_mask(filled: u32, take: u32) -> u32 {
    let head = u32::MAX >> filled;
    let tail = u32::MAX.checked_shr(filled + take).unwrap_or(0);
    head & !tail
}

impl<I> Iterator for SlotWords<I>
where
    I: Iterator<Item = Pulse>,
{
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let mut word = 0u32;
        let mut filled = 0u32;

        while filled < SLOTS_PER_WORD {
            if self.remaining == 0 {
                match self.pulses.next() {
                    Some(pulse) => {
                        self.level = pulse.level;
                        self.remaining = pulse.slots as u32;
                        continue;
                    }
                    None => break,
                }
            }

            let take = self.remaining.min(SLOTS_PER_WORD - filled);
            if self.level.is_high() {
                word |= run_mask(filled, take);
            }
            filled += take;
            self.remaining -= take;
        }

        if filled == 0 {
            // The peripheral holds the last slot level while stalled
            return core::mem::take(&mut self.ended_high).then_some(0);
        }

        self.ended_high = word & 1 == 1;
        Some(word)
    }
}

/// Words needed for `slots` slots, not counting a trailing low word
pub fn words_for_slots(slots: u32) -> u32 {
    slots.div_ceil(SLOTS_PER_WORD)
}
