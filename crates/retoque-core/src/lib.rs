//! Retoque Core - single-image transformation engine
//!
//! This crate provides the pixel-level operations behind the Retoque editor:
//! photometric adjustments, shadow lifting, color-keyed background removal,
//! geometric transforms, pixel probing, text overlay, and the size-bounding
//! and encoding steps that bracket every edit.
//!
//! Every operation reads a [`RasterImage`] and returns a new one; a failed
//! operation leaves the caller's image untouched.

pub mod adjustments;
pub mod blur;
pub mod colorspace;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod luminance;
pub mod mask;
pub mod operation;
pub mod probe;
pub mod raster;
pub mod segment;
pub mod session;
pub mod shadows;
pub mod text;
pub mod transform;

pub use config::EngineConfig;
pub use encode::{EncodedImage, OutputFormat};
pub use error::{EditError, EditResult};
pub use operation::{Operation, Outcome};
pub use probe::{probe, Sample};
pub use raster::{ColorSpace, RasterImage};
pub use session::EditSession;

use serde::{Deserialize, Serialize};

/// An 8-bit color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for any other shape or a
    /// non-hex digit.
    pub fn from_hex(input: &str) -> EditResult<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let bad = || EditError::invalid("color", format!("'{input}' is not a hex color"));

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }

    /// Format as `#RRGGBB`, appending alpha only when it is not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Channel values laid out for `space`, using luminance for gray.
    pub fn channels_for(&self, space: ColorSpace) -> Vec<u8> {
        match space {
            ColorSpace::Gray => vec![luminance::calculate_luminance_u8(self.r, self.g, self.b)],
            ColorSpace::Rgba => vec![self.r, self.g, self.b, self.a],
            _ => vec![self.r, self.g, self.b],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_six_digits() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hex("00ff7f").unwrap(), Color::rgb(0, 255, 127));
    }

    #[test]
    fn test_color_from_hex_short_and_alpha() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::from_hex("#10203040").unwrap(),
            Color::rgba(0x10, 0x20, 0x30, 0x40)
        );
    }

    #[test]
    fn test_color_from_hex_rejects_garbage() {
        for bad in ["", "#", "#12345", "#GGGGGG", "red", "#1234567", "#ñññ"] {
            assert!(
                matches!(Color::from_hex(bad), Err(EditError::InvalidParameter { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(255, 16, 0).to_hex(), "#FF1000");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_color_channels_for_space() {
        let c = Color::rgba(10, 20, 30, 40);
        assert_eq!(c.channels_for(ColorSpace::Rgb), vec![10, 20, 30]);
        assert_eq!(c.channels_for(ColorSpace::Rgba), vec![10, 20, 30, 40]);
        assert_eq!(Color::WHITE.channels_for(ColorSpace::Gray), vec![255]);
    }
}
