//! PIO pulse emitter
//!
//! Drives the matrix data pin from one PIO state machine running the
//! slot-stream program. Pulses are packed into 32-slot words on the fly
//! and pushed with interrupts masked so the FIFO never runs dry mid-frame;
//! a stall in a low phase would look like a latch to the chain. The state
//! machine holds its last output while stalled, so a frame whose final
//! word ends high is followed by one all-low word from `SlotWords`.

use airglow_core::wire::slots::SLOTS_PER_WORD;
use airglow_core::wire::SlotWords;
use airglow_hal::{Pulse, PulseEmitter};
use embassy_rp::gpio::Level;
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use fixed::types::U24F8;

use crate::slot_stream::{divider_bits, effective_slot_hz, word_drain_cycles, MAX_SLOT_CLOCK_HZ};

/// Spins allowed waiting for FIFO room before giving up
const PUSH_SPIN_LIMIT: u32 = 1_000_000;

/// Emitter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PioEmitterError {
    /// Slot clock is zero or above the system clock
    InvalidSlotClock,
    /// The state machine stopped taking words
    FifoStalled,
}

/// One-wire emitter on a PIO state machine
pub struct PioPulseEmitter<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
    slot_ns: u32,
    drain_cycles: u32,
}

impl<'d, PIO: Instance, const SM: usize> PioPulseEmitter<'d, PIO, SM> {
    /// Load the slot-stream program and claim `data_pin`
    ///
    /// The pin is driven low before the state machine starts, which is the
    /// idle level the chain expects.
    pub fn new<DATA: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data_pin: Peri<'d, DATA>,
        slot_clock_hz: u32,
    ) -> Result<Self, PioEmitterError> {
        if slot_clock_hz == 0 || slot_clock_hz > MAX_SLOT_CLOCK_HZ {
            return Err(PioEmitterError::InvalidSlotClock);
        }

        // One slot per PIO clock, 32 slots per autopulled word
        let prg = pio::pio_asm!(".wrap_target", "out pins, 1", ".wrap");
        let installed = common.load_program(&prg.program);

        let data = common.make_pio_pin(data_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[]);
        cfg.set_out_pins(&[&data]);
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: SLOTS_PER_WORD as u8,
            direction: ShiftDirection::Left,
        };
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.clock_divider = U24F8::from_bits(divider_bits(slot_clock_hz));

        sm.set_config(&cfg);
        sm.set_pins(Level::Low, &[&data]);
        sm.set_pin_dirs(PioDirection::Out, &[&data]);
        sm.set_enable(true);

        Ok(Self {
            sm,
            slot_ns: 1_000_000_000 / effective_slot_hz(slot_clock_hz),
            drain_cycles: word_drain_cycles(slot_clock_hz, SLOTS_PER_WORD),
        })
    }

    fn push(&mut self, word: u32) -> Result<(), PioEmitterError> {
        for _ in 0..PUSH_SPIN_LIMIT {
            if self.sm.tx().try_push(word) {
                return Ok(());
            }
        }
        Err(PioEmitterError::FifoStalled)
    }

    fn wait_drained(&mut self) -> Result<(), PioEmitterError> {
        let mut spins = 0;
        while !self.sm.tx().empty() {
            spins += 1;
            if spins > PUSH_SPIN_LIMIT {
                return Err(PioEmitterError::FifoStalled);
            }
        }
        // The last word is still shifting out of the OSR
        cortex_m::asm::delay(self.drain_cycles);
        Ok(())
    }
}

impl<PIO: Instance, const SM: usize> PulseEmitter for PioPulseEmitter<'_, PIO, SM> {
    type Error = PioEmitterError;

    fn emit<I>(&mut self, pulses: I) -> Result<(), PioEmitterError>
    where
        I: IntoIterator<Item = Pulse>,
    {
        let words = SlotWords::new(pulses.into_iter());
        cortex_m::interrupt::free(|_| {
            for word in words {
                self.push(word)?;
            }
            self.wait_drained()
        })
    }

    fn slot_ns(&self) -> u32 {
        self.slot_ns
    }
}
