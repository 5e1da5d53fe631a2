//! Upload decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG, PNG or WebP bytes at full size
//! - [`load_image`] - Decode and bound to the configured transfer size
//! - [`bound_image`] - Shrink an image to fit a box, preserving aspect ratio
//! - [`is_supported_file`] - Check a file name against the accepted extensions
//!
//! # Example
//!
//! ```typescript
//! if (!is_supported_file(file.name)) {
//!     throw new Error('Please upload a JPG, PNG or WebP image');
//! }
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const original = load_image(bytes, undefined);
//! ```

use crate::config::engine_config;
use crate::types::JsRasterImage;
use retoque_core::decode;
use retoque_core::error::EditResult;
use retoque_core::EngineConfig;
use wasm_bindgen::prelude::*;

/// Decode image bytes without resizing.
///
/// # Errors
///
/// Returns an error if the bytes are not a JPEG, PNG or WebP image.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an upload and bound it to `transfer.max_width` x `transfer.max_height`.
///
/// This is the image every operation starts from.
#[wasm_bindgen]
pub fn load_image(bytes: &[u8], config: JsValue) -> Result<JsRasterImage, JsValue> {
    let config = engine_config(config)?;
    load_with(bytes, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Shrink an image so it fits within `max_width` x `max_height`.
///
/// Images that already fit are returned unchanged; the aspect ratio is kept.
#[wasm_bindgen]
pub fn bound_image(
    image: &JsRasterImage,
    max_width: u32,
    max_height: u32,
) -> Result<JsRasterImage, JsValue> {
    bound_with(image, max_width, max_height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether the file name has an accepted upload extension.
#[wasm_bindgen]
pub fn is_supported_file(file_name: &str) -> bool {
    decode::is_supported_extension(file_name)
}

fn load_with(bytes: &[u8], config: &EngineConfig) -> EditResult<JsRasterImage> {
    let decoded = decode::decode_image(bytes)?;
    let bounded = decode::bound(
        &decoded,
        config.transfer.max_width,
        config.transfer.max_height,
    )?;
    Ok(JsRasterImage::from_raster(bounded))
}

fn bound_with(image: &JsRasterImage, max_width: u32, max_height: u32) -> EditResult<JsRasterImage> {
    let raster = image.to_raster()?;
    decode::bound(&raster, max_width, max_height).map(JsRasterImage::from_raster)
}
