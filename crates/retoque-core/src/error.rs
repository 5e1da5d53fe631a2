//! Error taxonomy shared by every engine operation.
//!
//! Each variant carries enough context to render a single user-facing
//! message. Operations validate their inputs before touching pixel data, so
//! an `Err` always means the caller's image is still intact.

use thiserror::Error;

/// Errors returned by the image engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Crop rectangle is empty after clipping to the image.
    #[error("Invalid crop region ({x1}, {y1}, {x2}, {y2}) for a {width}x{height} image")]
    InvalidRegion {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        width: u32,
        height: u32,
    },

    /// Explicit text coordinates could not be parsed.
    #[error("Invalid text position '{0}': expected \"x,y\" with integer coordinates")]
    InvalidPosition(String),

    /// Pixel coordinate outside the image.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },

    /// Bytes could not be decoded, or the image could not be encoded.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// A required asset (font, glyph) is not available.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// A parameter is outside its accepted range or malformed.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl EditError {
    /// Shorthand for [`EditError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EditError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<image::ImageError> for EditError {
    fn from(err: image::ImageError) -> Self {
        EditError::UnsupportedFormat(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type EditResult<T> = Result<T, EditError>;
