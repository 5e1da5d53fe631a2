//! The raster buffer every operation consumes and produces.
//!
//! A [`RasterImage`] is a row-major, interleaved 8-bit pixel grid tagged with
//! the [`ColorSpace`] its bytes are encoded in. The channel count is implied
//! by the tag: 1 for gray, 3 for RGB/HSV/Lab, 4 for RGBA.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};

/// Color space tag carried by a [`RasterImage`].
///
/// `Hsv` and `Lab` use the common 8-bit encodings: hue halved into 0-180,
/// saturation and value in 0-255; L scaled to 0-255, a/b offset by 128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Single luminance channel.
    Gray,
    /// Opaque red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
    /// Hue, saturation, value (8-bit encoding).
    Hsv,
    /// CIE L*a*b* under D65 (8-bit encoding).
    Lab,
}

impl ColorSpace {
    /// Number of interleaved channels per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::Rgb | ColorSpace::Hsv | ColorSpace::Lab => 3,
            ColorSpace::Rgba => 4,
        }
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorSpace::Rgba)
    }
}

/// In-memory pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image, validating dimensions and buffer length.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for a zero dimension or a pixel
    /// buffer whose length is not `width * height * channels`.
    pub fn new(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        pixels: Vec<u8>,
    ) -> EditResult<Self> {
        if width == 0 || height == 0 {
            return Err(EditError::invalid(
                "dimensions",
                format!("width ({width}) and height ({height}) must be non-zero"),
            ));
        }
        let expected = width as usize * height as usize * color_space.channels();
        if pixels.len() != expected {
            return Err(EditError::invalid(
                "pixels",
                format!("expected {expected} bytes, got {}", pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            color_space,
            pixels,
        })
    }

    /// Create an image where every pixel holds `value`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if `value` does not have one
    /// entry per channel or a dimension is zero.
    pub fn filled(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        value: &[u8],
    ) -> EditResult<Self> {
        if value.len() != color_space.channels() {
            return Err(EditError::invalid(
                "value",
                format!(
                    "expected {} channel values, got {}",
                    color_space.channels(),
                    value.len()
                ),
            ));
        }
        let count = width as usize * height as usize;
        let pixels = value.repeat(count);
        Self::new(width, height, color_space, pixels)
    }

    /// Build an image from parts already known to be consistent.
    pub(crate) fn from_raw_parts(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert!(width > 0 && height > 0, "zero-sized raster");
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * color_space.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            color_space,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Declared color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.color_space.channels()
    }

    /// Whether the buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.color_space.has_alpha()
    }

    /// Interleaved pixel bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the image and return its pixel bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Channel slice of the pixel at `(x, y)`. Caller guarantees bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }

    /// Convert from an `image` crate buffer.
    ///
    /// 8-bit gray, RGB and RGBA map directly. Gray+alpha and every 16-bit or
    /// float layout are widened to RGBA when they carry alpha, RGB otherwise.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(buf) => {
                Self::from_raw_parts(width, height, ColorSpace::Gray, buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                Self::from_raw_parts(width, height, ColorSpace::Rgb, buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                Self::from_raw_parts(width, height, ColorSpace::Rgba, buf.into_raw())
            }
            other if other.color().has_alpha() => Self::from_raw_parts(
                width,
                height,
                ColorSpace::Rgba,
                other.to_rgba8().into_raw(),
            ),
            other => Self::from_raw_parts(
                width,
                height,
                ColorSpace::Rgb,
                other.to_rgb8().into_raw(),
            ),
        }
    }

    /// Convert to an `image` crate buffer.
    ///
    /// HSV and Lab rasters are first converted back to RGB.
    pub fn to_dynamic(&self) -> DynamicImage {
        let (w, h) = (self.width, self.height);
        let converted = match self.color_space {
            ColorSpace::Gray => GrayImage::from_raw(w, h, self.pixels.clone())
                .map(DynamicImage::ImageLuma8),
            ColorSpace::Rgb => {
                RgbImage::from_raw(w, h, self.pixels.clone()).map(DynamicImage::ImageRgb8)
            }
            ColorSpace::Rgba => {
                RgbaImage::from_raw(w, h, self.pixels.clone()).map(DynamicImage::ImageRgba8)
            }
            ColorSpace::Hsv | ColorSpace::Lab => {
                let rgb = crate::colorspace::convert(self, ColorSpace::Rgb);
                return rgb.to_dynamic();
            }
        };
        // Length is an invariant of RasterImage, so from_raw cannot fail.
        converted.unwrap_or_else(|| DynamicImage::new_rgb8(w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_per_space() {
        assert_eq!(ColorSpace::Gray.channels(), 1);
        assert_eq!(ColorSpace::Rgb.channels(), 3);
        assert_eq!(ColorSpace::Hsv.channels(), 3);
        assert_eq!(ColorSpace::Lab.channels(), 3);
        assert_eq!(ColorSpace::Rgba.channels(), 4);
        assert!(ColorSpace::Rgba.has_alpha());
        assert!(!ColorSpace::Rgb.has_alpha());
    }

    #[test]
    fn test_new_validates_length() {
        assert!(RasterImage::new(2, 2, ColorSpace::Rgb, vec![0; 12]).is_ok());
        let err = RasterImage::new(2, 2, ColorSpace::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(err, EditError::InvalidParameter { name: "pixels", .. }));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(RasterImage::new(0, 2, ColorSpace::Gray, vec![]).is_err());
        assert!(RasterImage::new(2, 0, ColorSpace::Gray, vec![]).is_err());
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(3, 2, ColorSpace::Rgba, &[1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixel_count(), 6);
        assert_eq!(img.pixel(2, 1), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_filled_rejects_wrong_channel_count() {
        assert!(RasterImage::filled(3, 2, ColorSpace::Rgb, &[1, 2]).is_err());
    }

    #[test]
    fn test_dynamic_roundtrip_rgba() {
        let pixels: Vec<u8> = (0..2 * 3 * 4).map(|i| i as u8).collect();
        let img = RasterImage::new(2, 3, ColorSpace::Rgba, pixels).unwrap();
        let back = RasterImage::from_dynamic(img.to_dynamic());
        assert_eq!(back, img);
    }

    #[test]
    fn test_from_dynamic_gray_alpha_widens_to_rgba() {
        let dynamic = DynamicImage::new_luma_a8(4, 4);
        let img = RasterImage::from_dynamic(dynamic);
        assert_eq!(img.color_space(), ColorSpace::Rgba);
        assert_eq!(img.pixels().len(), 4 * 4 * 4);
    }

    #[test]
    fn test_from_dynamic_16_bit_narrows_to_rgb() {
        let dynamic = DynamicImage::new_rgb16(3, 3);
        let img = RasterImage::from_dynamic(dynamic);
        assert_eq!(img.color_space(), ColorSpace::Rgb);
    }
}
