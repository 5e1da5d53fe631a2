//! One image handle for the length of an editing session.
//!
//! The loaded original never changes: each [`EditSession::apply`] call starts
//! from it again, and a failed call leaves nothing behind.

use crate::config::EngineConfig;
use crate::decode::{bound, decode_image};
use crate::encode::{encode_image, EncodedImage};
use crate::error::EditResult;
use crate::operation::{Operation, Outcome};
use crate::raster::RasterImage;

/// A decoded, size-bounded upload plus the configuration to edit it with.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: RasterImage,
    config: EngineConfig,
}

impl EditSession {
    /// Decode an upload and bound it to the transfer size.
    ///
    /// # Errors
    ///
    /// Returns `EditError::UnsupportedFormat` for undecodable bytes and
    /// `EditError::InvalidParameter` for an invalid configuration.
    pub fn load(bytes: &[u8], config: EngineConfig) -> EditResult<Self> {
        config.validate()?;
        let decoded = decode_image(bytes)?;
        let original = bound(
            &decoded,
            config.transfer.max_width,
            config.transfer.max_height,
        )?;
        Ok(Self { original, config })
    }

    /// Start a session from an already decoded image, bounding it first.
    pub fn from_image(image: &RasterImage, config: EngineConfig) -> EditResult<Self> {
        config.validate()?;
        let original = bound(image, config.transfer.max_width, config.transfer.max_height)?;
        Ok(Self { original, config })
    }

    /// The bounded original.
    pub fn image(&self) -> &RasterImage {
        &self.original
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one operation against the original.
    pub fn apply(&self, operation: &Operation) -> EditResult<Outcome> {
        operation.apply(&self.original, &self.config)
    }

    /// Bound and encode an edited image for download.
    pub fn export(&self, image: &RasterImage) -> EditResult<EncodedImage> {
        let bounded = bound(
            image,
            self.config.transfer.max_width,
            self.config.transfer.max_height,
        )?;
        encode_image(&bounded, &self.config.output.formats)
    }

    /// Download name for an encoded image, e.g. `modified_image.webp`.
    pub fn file_name(&self, encoded: &EncodedImage) -> String {
        encoded.file_name(&self.config.output.file_stem)
    }
}
