//! One-wire bit-stream encoding
//!
//! The LED driver chips read a self-clocked NRZ-like signal: every bit is
//! a fixed-length frame of three phases, and the length of the middle high
//! phase decides between 0 and 1.
//!
//! ```text
//!            T3      T1        T2
//! bit 1:  ______|‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|
//! bit 0:  ______|‾‾‾‾‾‾|____________|
//! ```
//!
//! Pixels go out as 24-bit GRB words, most significant bit first, in
//! framebuffer order. After the last pixel the line must rest low for the
//! settling interval before the chain accepts the next frame.

pub mod encoder;
pub mod sim;
pub mod slots;
pub mod timing;

pub use encoder::{encode_bit, pixel_bits, pulse_train, PULSES_PER_BIT};
pub use sim::{FrameTrace, SimError, SimulatedEmitter};
pub use slots::SlotWords;
pub use timing::{TimingError, WireTiming};
