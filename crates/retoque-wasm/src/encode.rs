//! Download encoding WASM bindings.
//!
//! The edited image is bounded to the transfer size again and encoded with
//! the first format in `output.formats` that succeeds, lossless WebP by
//! default with PNG as the fallback.
//!
//! # Example
//!
//! ```typescript
//! const download = encode_for_download(edited, undefined);
//! const blob = new Blob([download.bytes()], { type: download.mime });
//! link.download = download.file_name;
//! ```

use crate::config::engine_config;
use crate::types::JsRasterImage;
use retoque_core::decode::bound;
use retoque_core::encode::encode_image;
use retoque_core::error::EditResult;
use retoque_core::EngineConfig;
use wasm_bindgen::prelude::*;

/// An encoded image ready for download.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsEncodedImage {
    bytes: Vec<u8>,
    mime: String,
    extension: String,
    file_name: String,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Encoded bytes as a Uint8Array (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// MIME type, e.g. `image/webp`.
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.extension.clone()
    }

    /// Download name, e.g. `modified_image.webp`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

/// Bound and encode an edited image for download.
///
/// # Errors
///
/// Returns an error if every configured format fails to encode.
#[wasm_bindgen]
pub fn encode_for_download(image: &JsRasterImage, config: JsValue) -> Result<JsEncodedImage, JsValue> {
    let config = engine_config(config)?;
    encode_with(image, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn encode_with(image: &JsRasterImage, config: &EngineConfig) -> EditResult<JsEncodedImage> {
    let raster = image.to_raster()?;
    let bounded = bound(&raster, config.transfer.max_width, config.transfer.max_height)?;
    let encoded = encode_image(&bounded, &config.output.formats)?;
    Ok(JsEncodedImage {
        mime: encoded.mime().to_string(),
        extension: encoded.extension().to_string(),
        file_name: encoded.file_name(&config.output.file_stem),
        bytes: encoded.bytes,
    })
}
