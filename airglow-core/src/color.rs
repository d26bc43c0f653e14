//! Pixel colors and their wire packing
//!
//! The driver chips expect each pixel as a 24-bit word with green in the
//! high byte, red in the middle byte and blue in the low byte.

/// RGB intensity triple
///
/// Channels are opaque intensity levels. The palette below uses very small,
/// deliberately non-linear values, so nothing here assumes a linear scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the wire word (GRB, green in bits 16..24)
    pub const fn pack(self) -> PackedColor {
        PackedColor(((self.g as u32) << 16) | ((self.r as u32) << 8) | self.b as u32)
    }
}

impl From<PackedColor> for Color {
    fn from(packed: PackedColor) -> Self {
        packed.unpack()
    }
}

/// A color in wire order, as stored in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedColor(u32);

impl PackedColor {
    /// Packed black
    pub const BLACK: PackedColor = PackedColor(0);

    /// Number of significant bits in a packed word
    pub const BITS: u32 = 24;

    /// Wrap a raw GRB word, discarding anything above bit 23
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0x00FF_FFFF)
    }

    /// Raw 24-bit GRB word
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn unpack(self) -> Color {
        Color {
            r: (self.0 >> 8) as u8,
            g: (self.0 >> 16) as u8,
            b: self.0 as u8,
        }
    }
}

impl From<Color> for PackedColor {
    fn from(color: Color) -> Self {
        color.pack()
    }
}

/// Low-intensity colors that stay distinguishable on the matrix
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(1, 0, 0);
    pub const GREEN: Color = Color::new(0, 1, 0);
    pub const BLUE: Color = Color::new(0, 0, 1);
    pub const YELLOW: Color = Color::new(1, 1, 0);
    // Red at 3 reads as orange next to green at 1
    pub const ORANGE: Color = Color::new(3, 1, 0);
    pub const AZURE: Color = Color::new(0, 1, 1);
    pub const MAGENTA: Color = Color::new(1, 0, 1);
    pub const VIOLET: Color = Color::new(1, 0, 2);
    pub const WHITE: Color = Color::new(1, 1, 1);
    pub const CYAN: Color = Color::new(0, 1, 2);
}
