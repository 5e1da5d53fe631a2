//! Lossless encoding with format fallback.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::OutputFormat;
use crate::colorspace::displayable;
use crate::error::{EditError, EditResult};
use crate::raster::{ColorSpace, RasterImage};

/// File name stem offered for downloads.
pub const DEFAULT_FILE_STEM: &str = "modified_image";

/// Encoded bytes plus the format that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl EncodedImage {
    /// MIME type of [`Self::bytes`].
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// File extension of [`Self::bytes`], without the dot.
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Download name, e.g. `modified_image.webp`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

/// Encode an image, trying each format in `preference` order.
///
/// # Arguments
///
/// * `image` - Image to encode; HSV and Lab are written as RGB
/// * `preference` - Formats to try, first choice first
///
/// # Returns
///
/// The bytes of the first encoder that succeeded, tagged with its format.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` for an empty preference list and
/// `EditError::UnsupportedFormat` when every encoder fails.
pub fn encode_image(image: &RasterImage, preference: &[OutputFormat]) -> EditResult<EncodedImage> {
    let source = displayable(image);
    let mut last_error = None;

    for &format in preference {
        match write_format(&source, format) {
            Ok(bytes) => {
                log::debug!(
                    "Encoded {}x{} as {} ({} bytes)",
                    source.width(),
                    source.height(),
                    format.extension(),
                    bytes.len()
                );
                return Ok(EncodedImage { bytes, format });
            }
            Err(err) => {
                log::warn!("{} encoding failed, trying next format: {err}", format.extension());
                last_error = Some(err);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| EditError::invalid("formats", "no output format to try")))
}

/// Run a single encoder.
fn write_format(image: &RasterImage, format: OutputFormat) -> EditResult<Vec<u8>> {
    let color_type = match image.color_space() {
        ColorSpace::Gray => ExtendedColorType::L8,
        ColorSpace::Rgba => ExtendedColorType::Rgba8,
        _ => ExtendedColorType::Rgb8,
    };

    let mut buffer = Cursor::new(Vec::new());
    match format {
        OutputFormat::WebP => WebPEncoder::new_lossless(&mut buffer).write_image(
            image.pixels(),
            image.width(),
            image.height(),
            color_type,
        )?,
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(
            image.pixels(),
            image.width(),
            image.height(),
            color_type,
        )?,
    }
    Ok(buffer.into_inner())
}
