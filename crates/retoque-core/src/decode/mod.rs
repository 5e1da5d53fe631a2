//! Ingest pipeline: bytes in, bounded raster out.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP uploads (format sniffed from content)
//! - Bounding an image to a maximum transfer size, preserving aspect ratio
//!
//! The same bounding step runs again before encoding, so a load, edit and
//! download round trip may come back smaller than the upload.

mod load;
mod resize;

pub use load::{decode_image, is_supported_extension, SUPPORTED_EXTENSIONS};
pub use resize::{bound, calculate_fit_dimensions};
