//! Bundled bitmap fonts.
//!
//! Glyphs come from the `font8x8` tables: 8 rows of 8 bits, bit 0 is the
//! leftmost column. Nothing is loaded from disk, so the only way to miss a
//! resource is to ask for a font or a character the tables do not have.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

use crate::error::{EditError, EditResult};

/// Height and width of one glyph cell, in font pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Name of the font used when none is configured.
pub const DEFAULT_FONT: &str = "basic";

/// One 8x8 glyph bitmap.
pub type Glyph = [u8; 8];

/// A resolved bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFont {
    /// ASCII plus the Latin-1 supplement (accented Latin letters).
    Basic,
}

impl BitmapFont {
    /// Look a font up by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `EditError::MissingResource` for an unknown name.
    pub fn resolve(name: &str) -> EditResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" | "default" => Ok(BitmapFont::Basic),
            _ => Err(EditError::MissingResource(format!("font '{name}'"))),
        }
    }

    /// Glyph for `ch`, if the font has one.
    pub fn glyph(self, ch: char) -> Option<Glyph> {
        match self {
            BitmapFont::Basic => BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch)),
        }
    }

    /// Glyphs for every character of `text`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::MissingResource` naming the first character the
    /// font cannot draw.
    pub fn glyphs(self, text: &str) -> EditResult<Vec<Glyph>> {
        text.chars()
            .map(|ch| {
                self.glyph(ch).ok_or_else(|| {
                    EditError::MissingResource(format!(
                        "glyph for '{ch}' (U+{:04X})",
                        ch as u32
                    ))
                })
            })
            .collect()
    }
}

/// Whether the glyph has ink at `(col, row)`.
#[inline]
pub fn glyph_bit(glyph: &Glyph, col: u32, row: u32) -> bool {
    (glyph[row as usize] >> col) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_font() {
        assert_eq!(BitmapFont::resolve("basic").unwrap(), BitmapFont::Basic);
        assert_eq!(BitmapFont::resolve(" Basic ").unwrap(), BitmapFont::Basic);
    }

    #[test]
    fn test_resolve_unknown_font() {
        let err = BitmapFont::resolve("Arial.ttf").unwrap_err();
        assert!(matches!(err, EditError::MissingResource(_)));
        assert_eq!(err.to_string(), "Missing resource: font 'Arial.ttf'");
    }

    #[test]
    fn test_ascii_and_latin_glyphs() {
        let font = BitmapFont::Basic;
        assert!(font.glyph('A').is_some());
        assert!(font.glyph('í').is_some());
        assert!(font.glyph('Ñ').is_some());
        assert_eq!(font.glyph(' '), Some([0; 8]));
    }

    #[test]
    fn test_missing_glyph() {
        let err = BitmapFont::Basic.glyphs("ok 漢").unwrap_err();
        assert!(matches!(err, EditError::MissingResource(_)));
        assert!(err.to_string().contains("U+6F22"));
    }

    #[test]
    fn test_glyph_bit_leftmost_is_bit_zero() {
        let glyph: Glyph = [0b0000_0001, 0b1000_0000, 0, 0, 0, 0, 0, 0];
        assert!(glyph_bit(&glyph, 0, 0));
        assert!(!glyph_bit(&glyph, 7, 0));
        assert!(glyph_bit(&glyph, 7, 1));
    }
}
