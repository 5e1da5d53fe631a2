//! Output encoding for download.
//!
//! This module provides functionality for:
//! - Encoding a raster as lossless WebP, or PNG when WebP fails
//! - Naming the result so its MIME type and extension always match the
//!   format that was actually written
//!
//! Formats are tried in the caller's preference order; the first encoder
//! that succeeds wins.

mod format;
mod output;

pub use format::OutputFormat;
pub use output::{encode_image, EncodedImage, DEFAULT_FILE_STEM};
