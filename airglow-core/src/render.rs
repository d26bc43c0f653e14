//! Glyph renderer
//!
//! Lays out a short value (number or glyph string) horizontally and paints
//! it into a [`Framebuffer`]. Glyphs are separated by exactly one blank
//! column and always start at the top row.

use core::fmt::Write;

use heapless::String;

use crate::color::Color;
use crate::font::{self, Glyph};
use crate::framebuffer::Framebuffer;

/// Longest formatted integer: sign plus ten digits
const INT_TEXT_LEN: usize = 11;

/// Horizontal alignment of a rendered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Left,
    /// Centered; overflowing values fall back to right alignment
    #[default]
    Center,
    Right,
}

/// Something the caller would like to show
///
/// Only text and integers are renderable kinds. Fractional readings must be
/// rounded by the caller first; they are accepted here so that the check is
/// a runtime answer rather than a type error at every call site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value<'a> {
    Text(&'a str),
    Int(i32),
    Float(f32),
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(text: &'a str) -> Self {
        Value::Text(text)
    }
}

impl From<i32> for Value<'_> {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f32> for Value<'_> {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

/// Renderer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Value kind or one of its characters has no glyph
    Unrenderable,
}

/// Character form of a value, ready for layout
enum Text<'a> {
    Borrowed(&'a str),
    Formatted(String<INT_TEXT_LEN>),
}

impl Text<'_> {
    fn as_str(&self) -> &str {
        match self {
            Text::Borrowed(s) => s,
            Text::Formatted(s) => s.as_str(),
        }
    }
}

/// Build the character form of `value`
///
/// Non-negative integers get a leading `+` when `show_sign` is set.
fn to_text(value: Value<'_>, show_sign: bool) -> Result<Text<'_>, RenderError> {
    match value {
        Value::Text(s) => Ok(Text::Borrowed(s)),
        Value::Int(n) => {
            let mut s = String::new();
            let written = if show_sign && n >= 0 {
                write!(s, "+{}", n)
            } else {
                write!(s, "{}", n)
            };
            written.map_err(|_| RenderError::Unrenderable)?;
            Ok(Text::Formatted(s))
        }
        Value::Float(_) => Err(RenderError::Unrenderable),
    }
}

/// Width of `glyph` in columns (highest set bit + 1 over all rows)
pub fn glyph_width(glyph: &Glyph) -> u8 {
    glyph.width()
}

/// Check that `value` is a renderable kind made only of font characters
pub fn can_render(value: Value<'_>) -> bool {
    match to_text(value, false) {
        Ok(text) => text.as_str().chars().all(font::is_supported),
        Err(_) => false,
    }
}

/// Total width of `text`: glyph widths plus one spacing column between
/// neighbours. Characters without a glyph count as zero width.
pub fn measure(text: &str) -> i32 {
    let glyphs: i32 = text
        .chars()
        .filter_map(font::lookup)
        .map(|g| g.width() as i32)
        .sum();
    let spacing = text.chars().count().saturating_sub(1) as i32;
    glyphs + spacing
}

/// Leftmost column for a value `total_width` wide on a `matrix_width` matrix
///
/// May be negative when the value does not fit; leading glyphs then fall
/// off the left edge.
pub fn start_x(total_width: i32, matrix_width: i32, align: Align) -> i32 {
    let slack = matrix_width - total_width;
    match align {
        Align::Left => 0,
        Align::Right => slack,
        Align::Center if slack < 0 => slack,
        // ceil(slack / 2) for non-negative slack
        Align::Center => (slack + 1) / 2,
    }
}

impl Framebuffer {
    /// Paint `glyph` with its left edge at column `x`, top at row 0
    ///
    /// Lit bits get `color`; unlit bits keep whatever is underneath. A
    /// negative `x` skips the glyph entirely rather than clipping it.
    /// Columns are not checked against the width: they run through the
    /// linear index, so the framebuffer's own range check is the only guard.
    pub fn draw_glyph(&mut self, glyph: &Glyph, x: i32, color: Color) {
        if x < 0 {
            return;
        }
        let width = glyph.width();
        for (y, &bits) in glyph.rows().iter().enumerate() {
            let mut offset = y as i32 * self.width() as i32 + x;
            for col in 0..width {
                if (bits >> (width - 1 - col)) & 1 == 1 {
                    self.set(offset, color);
                }
                offset += 1;
            }
        }
    }

    /// Render `value` as a row of glyphs
    ///
    /// Fails with [`RenderError::Unrenderable`] when [`can_render`] is
    /// false; nothing is painted in that case.
    pub fn draw_value(
        &mut self,
        value: Value<'_>,
        color: Color,
        align: Align,
        show_sign: bool,
    ) -> Result<(), RenderError> {
        if !can_render(value) {
            return Err(RenderError::Unrenderable);
        }

        let text = to_text(value, show_sign)?;
        let text = text.as_str();

        let mut x = start_x(measure(text), self.width() as i32, align);
        for glyph in text.chars().filter_map(font::lookup) {
            self.draw_glyph(glyph, x, color);
            x += glyph.width() as i32 + 1;
        }

        Ok(())
    }
}
