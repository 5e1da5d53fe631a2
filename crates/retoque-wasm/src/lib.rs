//! Retoque WASM - WebAssembly bindings for Retoque
//!
//! This crate exposes the retoque-core engine to the browser editor.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for raster images
//! - `config` - Engine configuration passed in from JavaScript
//! - `decode` - Upload decoding and size bounding
//! - `operation` - Running one catalog operation against the original
//! - `encode` - Encoding the edited image for download
//!
//! # Usage
//!
//! ```typescript
//! import init, { load_image, apply_operation, encode_for_download } from '@retoque/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const original = load_image(bytes, undefined);
//! const outcome = apply_operation(original, { op: 'blur', radius: 5 }, undefined);
//! const download = encode_for_download(outcome.image(), undefined);
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod decode;
mod encode;
mod operation;
mod types;

pub use config::default_config;
pub use decode::{bound_image, decode_image, is_supported_file, load_image};
pub use encode::{encode_for_download, JsEncodedImage};
pub use operation::{apply_operation, operation_catalog, operation_defaults, probe_pixel, JsOutcome};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
