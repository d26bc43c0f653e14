//! RP2040 HAL for the Airglow LED matrix
//!
//! Implements [`airglow_hal::PulseEmitter`] on a PIO state machine:
//!
//! - [`slot_stream`]: clock divider math and the one-instruction program
//! - [`emitter`]: the state machine driver fed with packed slot words

#![no_std]

pub mod emitter;
pub mod slot_stream;

pub use emitter::{PioEmitterError, PioPulseEmitter};
