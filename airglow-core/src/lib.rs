//! Board-agnostic core logic for the Airglow LED matrix
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Packed colors and the display palette
//! - The numeric glyph font
//! - Framebuffer and glyph renderer
//! - Bit-stream encoder for one-wire RGB driver chips
//! - The `Matrix` facade tying framebuffer and emitter together
//! - Configuration parsing
//! - Application policy (color thresholds, show window, sync tracking)

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod color;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod matrix;
pub mod render;
pub mod wire;

pub use color::{Color, PackedColor};
pub use font::Glyph;
pub use framebuffer::{Framebuffer, FramebufferError};
pub use matrix::{Matrix, MatrixError};
pub use render::{Align, RenderError, Value};
