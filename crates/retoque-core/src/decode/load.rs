//! Decoding uploaded bytes into a [`RasterImage`].

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::{EditError, EditResult};
use crate::raster::RasterImage;

/// File extensions accepted by the upload step.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

/// Whether a file name carries one of [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn is_supported_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Decode an uploaded image.
///
/// The format is detected from the content, not the file name. 8-bit gray,
/// RGB and RGBA decode to the matching color space; other layouts are
/// widened to RGB or RGBA.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Errors
///
/// Returns `EditError::UnsupportedFormat` if the bytes are not a JPEG, PNG
/// or WebP image, or the decoder fails.
pub fn decode_image(bytes: &[u8]) -> EditResult<RasterImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditError::UnsupportedFormat(e.to_string()))?;

    let format = reader.format().ok_or_else(|| {
        EditError::UnsupportedFormat("unrecognized image content".to_string())
    })?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(EditError::UnsupportedFormat(format!(
            "{format:?} uploads are not accepted"
        )));
    }

    let decoded = reader.decode()?;
    let image = RasterImage::from_dynamic(decoded);
    log::info!(
        "Decoded {format:?} image: {}x{} {:?}",
        image.width(),
        image.height(),
        image.color_space()
    );
    Ok(image)
}
