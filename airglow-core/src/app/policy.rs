//! Reading to display item mapping

use crate::color::{palette, Color};
use crate::framebuffer::Framebuffer;
use crate::render::{Align, Value};

/// Glyph string shown when a value cannot be displayed
pub const FROWN: &str = ":(";

/// Glyph string shown at boot
pub const SMILE: &str = ":)";

/// Highest AQI shown as a number
pub const AQI_DISPLAY_MAX: i32 = 199;

/// Latest air-quality reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub aqi: i32,
    /// Whole degrees Celsius
    pub temperature: i32,
}

/// What goes on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayValue {
    Number(i32),
    Frown,
    Smile,
}

impl DisplayValue {
    pub fn as_value(&self) -> Value<'static> {
        match *self {
            DisplayValue::Number(n) => Value::Int(n),
            DisplayValue::Frown => Value::Text(FROWN),
            DisplayValue::Smile => Value::Text(SMILE),
        }
    }
}

/// A value with its color and sign handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayItem {
    pub value: DisplayValue,
    pub color: Color,
    pub show_sign: bool,
}

impl DisplayItem {
    pub const fn new(value: DisplayValue, color: Color, show_sign: bool) -> Self {
        Self {
            value,
            color,
            show_sign,
        }
    }

    /// Boot greeting
    pub const fn smile() -> Self {
        Self::new(DisplayValue::Smile, palette::WHITE, false)
    }

    /// Error face
    pub const fn frown(color: Color) -> Self {
        Self::new(DisplayValue::Frown, color, false)
    }

    /// Attempt counter shown while waiting for the first reading
    pub fn progress(attempt: i32) -> Self {
        if attempt >= 0 {
            Self::new(DisplayValue::Number(attempt), palette::WHITE, false)
        } else {
            Self::frown(palette::YELLOW)
        }
    }

    /// Temperature, always signed, colored from cold to hot
    pub fn temperature(celsius: i32) -> Self {
        let color = match celsius {
            c if c < 0 => palette::BLUE,
            c if c < 5 => palette::CYAN,
            c if c < 15 => palette::WHITE,
            c if c < 25 => palette::YELLOW,
            c if c < 35 => palette::ORANGE,
            _ => palette::RED,
        };
        Self::new(DisplayValue::Number(celsius), color, true)
    }

    /// AQI, capped at 199 in red; anything at 200 or above is a violet frown
    pub fn aqi(aqi: i32) -> Self {
        match aqi {
            a if a < 50 => Self::new(DisplayValue::Number(a), palette::GREEN, false),
            a if a < 100 => Self::new(DisplayValue::Number(a), palette::YELLOW, false),
            a if a < 150 => Self::new(DisplayValue::Number(a), palette::ORANGE, false),
            a if a < 200 => Self::new(
                DisplayValue::Number(a.min(AQI_DISPLAY_MAX)),
                palette::RED,
                false,
            ),
            _ => Self::frown(palette::VIOLET),
        }
    }
}

/// How a paint request ended up on the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Painted {
    /// The requested item
    Item,
    /// The red frown, because the item could not be rendered
    Fallback,
}

/// Clear `fb` and draw `item` centered, falling back to a red frown
pub fn paint(fb: &mut Framebuffer, item: &DisplayItem) -> Painted {
    paint_value(fb, item.value.as_value(), item.color, item.show_sign)
}

/// Clear `fb` and draw any value centered, falling back to a red frown
pub fn paint_value(fb: &mut Framebuffer, value: Value<'_>, color: Color, show_sign: bool) -> Painted {
    fb.clear();
    if fb.draw_value(value, color, Align::Center, show_sign).is_ok() {
        return Painted::Item;
    }

    fb.clear();
    // The frown only uses font glyphs
    let drawn = fb.draw_value(Value::Text(FROWN), palette::RED, Align::Center, false);
    debug_assert!(drawn.is_ok());
    Painted::Fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;

    #[test]
    fn test_temperature_colors() {
        assert_eq!(DisplayItem::temperature(-3).color, palette::BLUE);
        assert_eq!(DisplayItem::temperature(0).color, palette::CYAN);
        assert_eq!(DisplayItem::temperature(4).color, palette::CYAN);
        assert_eq!(DisplayItem::temperature(5).color, palette::WHITE);
        assert_eq!(DisplayItem::temperature(15).color, palette::YELLOW);
        assert_eq!(DisplayItem::temperature(25).color, palette::ORANGE);
        assert_eq!(DisplayItem::temperature(35).color, palette::RED);
        assert!(DisplayItem::temperature(21).show_sign);
    }

    #[test]
    fn test_aqi_colors() {
        assert_eq!(DisplayItem::aqi(12).color, palette::GREEN);
        assert_eq!(DisplayItem::aqi(50).color, palette::YELLOW);
        assert_eq!(DisplayItem::aqi(100).color, palette::ORANGE);
        assert_eq!(DisplayItem::aqi(150).color, palette::RED);
        assert!(!DisplayItem::aqi(42).show_sign);
    }

    #[test]
    fn test_aqi_hazardous_is_frown() {
        assert_eq!(DisplayItem::aqi(199).value, DisplayValue::Number(199));
        assert_eq!(DisplayItem::aqi(200), DisplayItem::frown(palette::VIOLET));
        assert_eq!(DisplayItem::aqi(500).value, DisplayValue::Frown);
    }

    #[test]
    fn test_paint_item() {
        let mut fb = Framebuffer::new(16, 10).unwrap();
        fb.fill(palette::WHITE);
        let painted = paint(&mut fb, &DisplayItem::aqi(42));
        assert_eq!(painted, Painted::Item);
        assert!(fb.pixels().iter().any(|&p| p == palette::GREEN.pack()));
        assert!(fb.pixels().iter().all(|&p| {
            p == palette::GREEN.pack() || p == PackedColor::BLACK
        }));
    }

    #[test]
    fn test_paint_overflowing_number_still_renders() {
        // Overflow is a layout matter, not a render failure
        let mut fb = Framebuffer::new(16, 10).unwrap();
        assert_eq!(paint(&mut fb, &DisplayItem::temperature(-40)), Painted::Item);
    }

    #[test]
    fn test_paint_fallback_on_unrenderable() {
        let mut fb = Framebuffer::new(16, 10).unwrap();
        let painted = paint_value(&mut fb, Value::Float(21.5), palette::GREEN, false);
        assert_eq!(painted, Painted::Fallback);
        assert!(fb.pixels().iter().any(|&p| p == palette::RED.pack()));
        assert!(!fb.pixels().iter().any(|&p| p == palette::GREEN.pack()));

        let painted = paint_value(&mut fb, Value::Text("abc"), palette::GREEN, false);
        assert_eq!(painted, Painted::Fallback);
    }

    #[test]
    fn test_smile() {
        let mut fb = Framebuffer::new(16, 10).unwrap();
        assert_eq!(paint(&mut fb, &DisplayItem::smile()), Painted::Item);
        assert!(fb.pixels().iter().any(|&p| p == palette::WHITE.pack()));
    }
}
