//! Color keying by HSV range.
//!
//! A pixel is inside the band when each of its hue, saturation and value
//! lies within the inclusive bounds. The default band selects near-white,
//! low-saturation pixels: a light studio or paper background.

use serde::{Deserialize, Serialize};

use super::Mask;
use crate::error::{EditError, EditResult};
use crate::raster::{ColorSpace, RasterImage};

/// Inclusive HSV bounds in the 8-bit encoding (hue 0-180).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HsvBand {
    /// Lower bound for (hue, saturation, value).
    pub lower: [u8; 3],
    /// Upper bound for (hue, saturation, value).
    pub upper: [u8; 3],
}

impl Default for HsvBand {
    fn default() -> Self {
        Self {
            lower: [0, 0, 200],
            upper: [180, 25, 255],
        }
    }
}

impl HsvBand {
    /// Whether an HSV triple lies inside the band.
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }

    /// Select every pixel of an HSV raster that lies inside the band.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if `image` is not tagged HSV.
    pub fn select(&self, image: &RasterImage) -> EditResult<Mask> {
        if image.color_space() != ColorSpace::Hsv {
            return Err(EditError::invalid(
                "image",
                format!("HSV keying needs an HSV image, got {:?}", image.color_space()),
            ));
        }
        Ok(Mask::from_fn(image.width(), image.height(), |x, y| {
            let px = image.pixel(x, y);
            self.contains([px[0], px[1], px[2]])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::convert;

    #[test]
    fn test_default_band_bounds() {
        let band = HsvBand::default();
        assert!(band.contains([0, 0, 255]));
        assert!(band.contains([180, 25, 200]));
        assert!(!band.contains([90, 26, 255]));
        assert!(!band.contains([90, 0, 199]));
    }

    #[test]
    fn test_select_white_and_color() {
        let rgb = RasterImage::new(2, 1, ColorSpace::Rgb, vec![255, 255, 255, 200, 20, 20])
            .unwrap();
        let hsv = convert(&rgb, ColorSpace::Hsv);
        let mask = HsvBand::default().select(&hsv).unwrap();
        assert!(mask.is_set(0, 0));
        assert!(!mask.is_set(1, 0));
    }

    #[test]
    fn test_select_requires_hsv() {
        let rgb = RasterImage::filled(2, 2, ColorSpace::Rgb, &[1, 2, 3]).unwrap();
        assert!(HsvBand::default().select(&rgb).is_err());
    }

    #[test]
    fn test_band_deserializes() {
        let band: HsvBand = toml::from_str("lower = [0, 0, 180]\nupper = [180, 40, 255]").unwrap();
        assert_eq!(band.lower, [0, 0, 180]);
        assert_eq!(band.upper, [180, 40, 255]);
    }
}
