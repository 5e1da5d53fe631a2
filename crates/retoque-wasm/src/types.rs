//! WASM-compatible wrapper types for image data.
//!
//! The editor keeps the bounded original in WASM memory as a
//! [`JsRasterImage`] and hands it back for every operation.

use retoque_core::error::{EditError, EditResult};
use retoque_core::{ColorSpace, RasterImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from dimensions, a color space name and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `color_space` - One of `gray`, `rgb`, `rgba`, `hsv`, `lab`
    /// * `pixels` - Interleaved pixel data, row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        color_space: &str,
        pixels: Vec<u8>,
    ) -> Result<JsRasterImage, JsValue> {
        let image = parse_color_space(color_space)
            .and_then(|space| RasterImage::new(width, height, space, pixels))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_raster(image))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color space of the pixel bytes, e.g. `"rgb"` or `"rgba"`.
    #[wasm_bindgen(getter)]
    pub fn color_space(&self) -> String {
        color_space_name(self.color_space).to_string()
    }

    /// Channels per pixel.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.color_space.channels()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(image: RasterImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            color_space: image.color_space(),
            pixels: image.into_pixels(),
        }
    }

    /// Convert back to a core image. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> EditResult<RasterImage> {
        RasterImage::new(self.width, self.height, self.color_space, self.pixels.clone())
    }
}

pub(crate) fn color_space_name(space: ColorSpace) -> &'static str {
    match space {
        ColorSpace::Gray => "gray",
        ColorSpace::Rgb => "rgb",
        ColorSpace::Rgba => "rgba",
        ColorSpace::Hsv => "hsv",
        ColorSpace::Lab => "lab",
    }
}

pub(crate) fn parse_color_space(name: &str) -> EditResult<ColorSpace> {
    match name.trim().to_lowercase().as_str() {
        "gray" | "grey" | "l" => Ok(ColorSpace::Gray),
        "rgb" => Ok(ColorSpace::Rgb),
        "rgba" => Ok(ColorSpace::Rgba),
        "hsv" => Ok(ColorSpace::Hsv),
        "lab" => Ok(ColorSpace::Lab),
        _ => Err(EditError::invalid(
            "color_space",
            format!("unknown color space '{name}'"),
        )),
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_validates_length() {
        assert!(JsRasterImage::new(2, 2, "rgb", vec![0; 12]).is_ok());
        assert!(JsRasterImage::new(2, 2, "rgb", vec![0; 11]).is_err());
        assert!(JsRasterImage::new(2, 2, "cmyk", vec![0; 16]).is_err());
    }
}
