//! Supported output formats and their fixed naming.

use serde::{Deserialize, Serialize};

/// Lossless output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless WebP, the compact first choice.
    WebP,
    /// PNG, accepted everywhere.
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Png => "png",
        }
    }

    /// MIME type for the download.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::WebP => "image/webp",
            OutputFormat::Png => "image/png",
        }
    }

    /// Default preference order: WebP, then PNG.
    pub fn preference() -> Vec<OutputFormat> {
        vec![OutputFormat::WebP, OutputFormat::Png]
    }
}
