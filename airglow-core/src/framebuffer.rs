//! Pixel framebuffer
//!
//! Row-major grid of packed colors mirroring the physical matrix. Sized
//! once at construction and mutated in place.
//!
//! Writes outside the buffer are dropped instead of reported. Glyph layout
//! legitimately walks off the edges when a value overflows the matrix, and
//! a partially visible value is preferable to a failed frame.

use heapless::Vec;

use crate::color::{Color, PackedColor};

/// Largest matrix the framebuffer can hold (e.g. 32x32)
pub const MAX_PIXELS: usize = 1024;

/// Framebuffer construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramebufferError {
    /// Width or height is zero
    ZeroSize,
    /// width * height exceeds [`MAX_PIXELS`]
    TooLarge,
}

/// Row-major packed color buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    pixels: Vec<PackedColor, MAX_PIXELS>,
}

impl Framebuffer {
    /// Allocate a black framebuffer of `width` x `height`
    pub fn new(width: u16, height: u16) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::ZeroSize);
        }
        let len = width as usize * height as usize;
        if len > MAX_PIXELS {
            return Err(FramebufferError::TooLarge);
        }

        let mut pixels = Vec::new();
        pixels
            .resize(len, PackedColor::BLACK)
            .map_err(|_| FramebufferError::TooLarge)?;

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels (width * height)
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Store `color` at linear `index`; out-of-range indices are ignored
    pub fn set(&mut self, index: i32, color: Color) {
        if index < 0 {
            return;
        }
        if let Some(pixel) = self.pixels.get_mut(index as usize) {
            *pixel = color.pack();
        }
    }

    /// Store `color` at column `x`, row `y`
    ///
    /// This is plain `set(y * width + x)`: an `x` past the right edge lands
    /// on the next row, exactly like the linear index it computes.
    pub fn set_xy(&mut self, x: i32, y: i32, color: Color) {
        let index = y
            .saturating_mul(self.width as i32)
            .saturating_add(x);
        self.set(index, color);
    }

    /// Packed color at linear `index`
    pub fn get(&self, index: i32) -> Option<PackedColor> {
        if index < 0 {
            return None;
        }
        self.pixels.get(index as usize).copied()
    }

    /// Packed color at column `x`, row `y`, if both are inside the matrix
    pub fn get_xy(&self, x: i32, y: i32) -> Option<PackedColor> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.get(y * self.width as i32 + x)
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let packed = color.pack();
        for pixel in self.pixels.iter_mut() {
            *pixel = packed;
        }
    }

    /// Fill with black
    pub fn clear(&mut self) {
        self.fill(Color::default());
    }

    /// All pixels in transmission order
    pub fn pixels(&self) -> &[PackedColor] {
        &self.pixels
    }
}
