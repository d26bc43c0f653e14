//! Software pulse emitter
//!
//! Stands in for the PIO on the host. It checks every bit against the
//! three-phase shape, counts slots, and decodes the words back so tests
//! can compare what went out with what was in the framebuffer. Pulses are
//! packed into slot words on the way through, exactly as the hardware
//! emitter does, so the trace also shows where the line rests afterwards.

use airglow_hal::{Level, Pulse, PulseEmitter};
use heapless::Vec;

use crate::framebuffer::MAX_PIXELS;
use crate::wire::encoder::PULSES_PER_BIT;
use crate::wire::slots::SlotWords;
use crate::wire::timing::WireTiming;

/// Simulation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// More words than any framebuffer can hold
    Overflow,
}

/// What the simulator saw during the last emission
#[derive(Debug, Clone)]
pub struct FrameTrace {
    /// Pulses received
    pub pulses: u32,
    /// Complete bits decoded
    pub bits: u32,
    /// Total line time in slots
    pub slots: u32,
    /// Bits whose phases did not match the timing
    pub malformed: u32,
    /// Decoded 24-bit words
    pub words: Vec<u32, MAX_PIXELS>,
    /// Packed slot words pushed to the line
    pub slot_words: u32,
    /// Level of the last slot, held while the line idles
    pub idle_level: Level,
}

impl Default for FrameTrace {
    fn default() -> Self {
        Self {
            pulses: 0,
            bits: 0,
            slots: 0,
            malformed: 0,
            words: Vec::new(),
            slot_words: 0,
            idle_level: Level::Low,
        }
    }
}

/// Reassembles bits and pixel words from a pulse stream
struct BitDecoder {
    timing: WireTiming,
    trace: FrameTrace,
    group: [Pulse; PULSES_PER_BIT],
    filled: usize,
    word: u32,
    word_bits: u32,
    overflow: bool,
}

impl BitDecoder {
    fn new(timing: WireTiming) -> Self {
        Self {
            timing,
            trace: FrameTrace::default(),
            group: [Pulse::low(0); PULSES_PER_BIT],
            filled: 0,
            word: 0,
            word_bits: 0,
            overflow: false,
        }
    }

    fn decode_bit(&self) -> Option<bool> {
        let t = &self.timing;
        let [lead, mark, tail] = &self.group;
        let shape_ok = lead.level == Level::Low
            && lead.slots == t.t3
            && mark.level == Level::High
            && mark.slots == t.t1
            && tail.slots == t.t2;
        shape_ok.then_some(tail.level.is_high())
    }

    fn push(&mut self, pulse: Pulse) {
        self.trace.pulses += 1;
        self.trace.slots += pulse.slots as u32;
        self.group[self.filled] = pulse;
        self.filled += 1;
        if self.filled < PULSES_PER_BIT {
            return;
        }
        self.filled = 0;

        let bit = match self.decode_bit() {
            Some(bit) => bit,
            None => {
                self.trace.malformed += 1;
                self.group[2].level.is_high()
            }
        };
        self.trace.bits += 1;
        self.word = (self.word << 1) | bit as u32;
        self.word_bits += 1;
        if self.word_bits == 24 {
            self.overflow |= self.trace.words.push(self.word).is_err();
            self.word = 0;
            self.word_bits = 0;
        }
    }

    fn finish(mut self) -> Result<FrameTrace, SimError> {
        if self.overflow {
            return Err(SimError::Overflow);
        }
        // Trailing partial bit or partial word
        if self.filled != 0 || self.word_bits != 0 {
            self.trace.malformed += 1;
        }
        Ok(self.trace)
    }
}

/// Recording emitter for host tests
#[derive(Debug, Clone)]
pub struct SimulatedEmitter {
    timing: WireTiming,
    last: FrameTrace,
    frames: u32,
}

impl SimulatedEmitter {
    pub fn new(timing: WireTiming) -> Self {
        Self {
            timing,
            last: FrameTrace::default(),
            frames: 0,
        }
    }

    /// Trace of the most recent frame
    pub fn last_frame(&self) -> &FrameTrace {
        &self.last
    }

    /// Number of frames emitted so far
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl PulseEmitter for SimulatedEmitter {
    type Error = SimError;

    fn emit<I>(&mut self, pulses: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = Pulse>,
    {
        let mut decoder = BitDecoder::new(self.timing);
        let mut slot_words = 0u32;
        let mut last_word = 0u32;

        let packed = SlotWords::new(pulses.into_iter().inspect(|&p| decoder.push(p)));
        for word in packed {
            slot_words += 1;
            last_word = word;
        }

        let mut trace = decoder.finish()?;
        trace.slot_words = slot_words;
        trace.idle_level = if last_word & 1 == 1 {
            Level::High
        } else {
            Level::Low
        };

        self.last = trace;
        self.frames += 1;
        Ok(())
    }

    fn slot_ns(&self) -> u32 {
        self.timing.slot_ns()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, PackedColor};
    use crate::wire::pulse_train;

    #[test]
    fn test_decodes_words() {
        let t = WireTiming::REFERENCE;
        let pixels = [
            Color::new(1, 2, 3).pack(),
            PackedColor::BLACK,
            PackedColor::from_bits(0xFF_FF_FF),
        ];
        let mut sim = SimulatedEmitter::new(t);
        sim.emit(pulse_train(&pixels, t)).unwrap();

        let trace = sim.last_frame();
        assert_eq!(trace.malformed, 0);
        assert_eq!(trace.bits, 72);
        assert_eq!(trace.pulses, 216);
        assert_eq!(trace.slots, 720);
        assert_eq!(trace.words.as_slice(), &[0x02_01_03, 0, 0xFF_FF_FF]);
        assert_eq!(trace.slot_words, 23);
        assert_eq!(trace.idle_level, Level::Low);
        assert_eq!(sim.frames(), 1);
    }

    #[test]
    fn test_white_frame_rests_low() {
        // 160 pixels fill exactly 1200 words and end on a high slot
        let t = WireTiming::REFERENCE;
        let pixels = [Color::new(255, 255, 255).pack(); 160];
        let mut sim = SimulatedEmitter::new(t);
        sim.emit(pulse_train(&pixels, t)).unwrap();

        let trace = sim.last_frame();
        assert_eq!(trace.malformed, 0);
        assert_eq!(trace.slot_words, 1201);
        assert_eq!(trace.idle_level, Level::Low);
    }

    #[test]
    fn test_flags_wrong_phase() {
        let t = WireTiming::REFERENCE;
        let mut sim = SimulatedEmitter::new(t);
        sim.emit([Pulse::low(3), Pulse::high(3), Pulse::low(4)])
            .unwrap();
        assert_eq!(sim.last_frame().malformed, 2); // bad shape + partial word
    }

    #[test]
    fn test_flags_truncated_bit() {
        let t = WireTiming::REFERENCE;
        let mut sim = SimulatedEmitter::new(t);
        sim.emit([Pulse::low(3), Pulse::high(2)]).unwrap();
        assert_eq!(sim.last_frame().bits, 0);
        assert_eq!(sim.last_frame().malformed, 1);
    }
}
