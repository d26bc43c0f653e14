//! Airglow Hardware Abstraction Layer
//!
//! This crate defines the seam between the board-agnostic matrix logic and
//! whatever actually drives the LED data line. The core produces a pulse
//! train; an emitter puts it on the wire.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  airglow-core (framebuffer, encoder)    │
//! └─────────────────────────────────────────┘
//!                     │  Iterator<Item = Pulse>
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  airglow-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ airglow-hal-  │       │  simulated    │
//! │ rp2040 (PIO)  │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pulse::PulseEmitter`] - Emit a sequence of timed line levels

#![no_std]
#![deny(unsafe_code)]

pub mod pulse;

pub use pulse::{Level, Pulse, PulseEmitter};
