//! Numeric glyph font
//!
//! 5x10 bitmap font covering the digits and the handful of punctuation
//! marks the display needs for signed values and the smiley faces.
//! Each row is a bitmask; the most significant occupied bit of the widest
//! row is the leftmost column.

/// Height of every glyph in pixel rows
pub const FONT_HEIGHT: usize = 10;

/// Characters the font can draw, in table order
pub const SUPPORTED: &str = "0123456789-+:)(";

/// Fixed-height glyph bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    rows: [u8; FONT_HEIGHT],
}

impl Glyph {
    pub const fn new(rows: [u8; FONT_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Row bitmasks, top to bottom
    pub fn rows(&self) -> &[u8; FONT_HEIGHT] {
        &self.rows
    }

    /// Width in columns: highest set bit + 1 across all rows
    pub fn width(&self) -> u8 {
        self.rows
            .iter()
            .map(|&row| (u8::BITS - row.leading_zeros()) as u8)
            .max()
            .unwrap_or(0)
    }

    /// Check whether column `col` (0 = leftmost) of `row` is lit
    ///
    /// Columns are counted from the glyph's own width, so narrow rows of a
    /// wide glyph stay right-aligned as drawn in the table.
    pub fn is_lit(&self, row: usize, col: u8) -> bool {
        let width = self.width();
        match self.rows.get(row) {
            Some(&bits) if col < width => (bits >> (width - 1 - col)) & 1 == 1,
            _ => false,
        }
    }
}

#[rustfmt::skip]
mod table {
    use super::Glyph;

    pub const DIGIT_0: Glyph = Glyph::new([0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]);
    pub const DIGIT_1: Glyph = Glyph::new([0x01, 0x03, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01]);
    pub const DIGIT_2: Glyph = Glyph::new([0x0E, 0x11, 0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10, 0x1F]);
    pub const DIGIT_3: Glyph = Glyph::new([0x0E, 0x11, 0x01, 0x01, 0x0E, 0x01, 0x01, 0x01, 0x11, 0x0E]);
    pub const DIGIT_4: Glyph = Glyph::new([0x11, 0x11, 0x11, 0x11, 0x11, 0x0F, 0x01, 0x01, 0x01, 0x01]);
    pub const DIGIT_5: Glyph = Glyph::new([0x1F, 0x10, 0x10, 0x10, 0x1E, 0x01, 0x01, 0x01, 0x11, 0x0E]);
    pub const DIGIT_6: Glyph = Glyph::new([0x0E, 0x11, 0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x11, 0x0E]);
    pub const DIGIT_7: Glyph = Glyph::new([0x1F, 0x01, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08, 0x08, 0x08]);
    pub const DIGIT_8: Glyph = Glyph::new([0x0E, 0x11, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x11, 0x11, 0x0E]);
    pub const DIGIT_9: Glyph = Glyph::new([0x0E, 0x11, 0x11, 0x11, 0x11, 0x0F, 0x01, 0x01, 0x11, 0x0E]);
    pub const MINUS: Glyph   = Glyph::new([0x00, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00]);
    pub const PLUS: Glyph    = Glyph::new([0x00, 0x00, 0x00, 0x02, 0x07, 0x02, 0x00, 0x00, 0x00, 0x00]);
    pub const COLON: Glyph   = Glyph::new([0x00, 0x00, 0x06, 0x06, 0x00, 0x00, 0x06, 0x06, 0x00, 0x00]);
    pub const RPAREN: Glyph  = Glyph::new([0x00, 0x18, 0x04, 0x02, 0x02, 0x02, 0x02, 0x04, 0x18, 0x00]);
    pub const LPAREN: Glyph  = Glyph::new([0x03, 0x04, 0x04, 0x08, 0x08, 0x08, 0x08, 0x04, 0x04, 0x03]);
}

/// Look up the glyph for `c`
///
/// Returns `None` for anything outside [`SUPPORTED`].
pub fn lookup(c: char) -> Option<&'static Glyph> {
    use table::*;

    let glyph = match c {
        '0' => &DIGIT_0,
        '1' => &DIGIT_1,
        '2' => &DIGIT_2,
        '3' => &DIGIT_3,
        '4' => &DIGIT_4,
        '5' => &DIGIT_5,
        '6' => &DIGIT_6,
        '7' => &DIGIT_7,
        '8' => &DIGIT_8,
        '9' => &DIGIT_9,
        '-' => &MINUS,
        '+' => &PLUS,
        ':' => &COLON,
        ')' => &RPAREN,
        '(' => &LPAREN,
        _ => return None,
    };
    Some(glyph)
}

/// Check if the font has a glyph for `c`
pub fn is_supported(c: char) -> bool {
    lookup(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_char_has_glyph() {
        for c in SUPPORTED.chars() {
            assert!(lookup(c).is_some(), "missing glyph for {c:?}");
        }
    }

    #[test]
    fn test_unsupported_chars() {
        for c in ['a', ' ', '.', '%', '/', 'é'] {
            assert!(lookup(c).is_none());
            assert!(!is_supported(c));
        }
    }

    #[test]
    fn test_glyph_widths() {
        let width = |c| lookup(c).unwrap().width();
        assert_eq!(width('0'), 5);
        assert_eq!(width('1'), 3);
        assert_eq!(width('4'), 5);
        assert_eq!(width('-'), 3);
        assert_eq!(width('+'), 3);
        assert_eq!(width(':'), 3);
        assert_eq!(width(')'), 5);
        assert_eq!(width('('), 4);
    }

    #[test]
    fn test_width_of_every_supported_glyph() {
        let expected = [5, 3, 5, 5, 5, 5, 5, 5, 5, 5, 3, 3, 3, 5, 4];
        assert_eq!(SUPPORTED.chars().count(), expected.len());

        for (c, &want) in SUPPORTED.chars().zip(expected.iter()) {
            let glyph = lookup(c).unwrap();
            let widest_row = glyph
                .rows()
                .iter()
                .map(|r| 8 - r.leading_zeros())
                .max()
                .unwrap();
            assert_eq!(glyph.width(), want, "width of {c:?}");
            assert_eq!(glyph.width() as u32, widest_row, "width of {c:?}");
            // Repeated calls give the same answer
            assert_eq!(glyph.width(), glyph.width());
            assert_eq!(crate::render::glyph_width(glyph), want);
        }
    }

    #[test]
    fn test_is_lit_msb_is_left() {
        let one = lookup('1').unwrap();
        // 0x01 in a 3-wide glyph lights only the rightmost column
        assert!(!one.is_lit(0, 0));
        assert!(!one.is_lit(0, 1));
        assert!(one.is_lit(0, 2));
        // 0x05 = 101
        assert!(one.is_lit(2, 0));
        assert!(!one.is_lit(2, 1));
        assert!(one.is_lit(2, 2));
    }

    #[test]
    fn test_is_lit_out_of_bounds() {
        let zero = lookup('0').unwrap();
        assert!(!zero.is_lit(FONT_HEIGHT, 0));
        assert!(!zero.is_lit(0, 5));
    }
}
