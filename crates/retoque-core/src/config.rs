//! Engine configuration.
//!
//! Every fixed value the engine relies on lives here with its default.
//! A TOML document only needs to name the values it overrides:
//!
//! ```toml
//! [transfer]
//! max_width = 1024
//!
//! [text]
//! top_margin = 10
//! ```
//!
//! Unknown keys are rejected.

use serde::{Deserialize, Serialize};

use crate::encode::{OutputFormat, DEFAULT_FILE_STEM};
use crate::error::{EditError, EditResult};
use crate::mask::HsvBand;
use crate::text::{Margins, DEFAULT_FONT};
use crate::transform::InterpolationFilter;
use crate::Color;

/// Default top margin for top-anchored text, in pixels.
pub const TOP_MARGIN: u32 = 30;

/// Default bottom margin for bottom-anchored text, in pixels.
pub const BOTTOM_MARGIN: u32 = 20;

/// Tighter margin some editor variants use on both edges.
pub const COMPACT_MARGIN: u32 = 10;

/// Default transfer bound on each side, in pixels.
pub const DEFAULT_BOUND: u32 = 800;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Size bound applied on ingest and before encoding.
    pub transfer: TransferConfig,
    /// Color band treated as background by background removal.
    pub background: HsvBand,
    /// Font and margins for text overlay.
    pub text: TextConfig,
    /// Rotation fill and filter.
    pub rotate: RotateConfig,
    /// Encoder preference and download naming.
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load a partial TOML document over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for malformed TOML, unknown
    /// keys, or values that fail [`EngineConfig::validate`].
    pub fn from_toml_str(source: &str) -> EditResult<Self> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| EditError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that the types alone cannot.
    pub fn validate(&self) -> EditResult<()> {
        if self.transfer.max_width == 0 || self.transfer.max_height == 0 {
            return Err(EditError::invalid(
                "config",
                "transfer.max_width and transfer.max_height must be non-zero",
            ));
        }
        let band = &self.background;
        if (0..3).any(|i| band.lower[i] > band.upper[i]) {
            return Err(EditError::invalid(
                "config",
                "background.lower must not exceed background.upper",
            ));
        }
        if self.output.formats.is_empty() {
            return Err(EditError::invalid("config", "output.formats must not be empty"));
        }
        if self.output.file_stem.trim().is_empty() {
            return Err(EditError::invalid("config", "output.file_stem must not be empty"));
        }
        self.rotate.fill_color()?;
        Ok(())
    }
}

/// Maximum dimensions for transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransferConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_BOUND,
            max_height: DEFAULT_BOUND,
        }
    }
}

/// Text overlay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Bundled font name.
    pub font: String,
    /// Gap between the top edge and top-anchored text.
    pub top_margin: u32,
    /// Gap between the bottom edge and bottom-anchored text.
    pub bottom_margin: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
        }
    }
}

impl TextConfig {
    pub fn margins(&self) -> Margins {
        Margins {
            top: self.top_margin,
            bottom: self.bottom_margin,
        }
    }
}

/// Rotation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateConfig {
    /// Hex color for area exposed on images without alpha.
    pub fill: String,
    pub filter: InterpolationFilter,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            fill: Color::BLACK.to_hex(),
            filter: InterpolationFilter::Bilinear,
        }
    }
}

impl RotateConfig {
    /// The parsed fill color.
    pub fn fill_color(&self) -> EditResult<Color> {
        Color::from_hex(&self.fill)
    }
}

/// Encoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Formats to try, first choice first.
    pub formats: Vec<OutputFormat>,
    /// Download name without extension.
    pub file_stem: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: OutputFormat::preference(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.transfer.max_width, 800);
        assert_eq!(config.transfer.max_height, 800);
        assert_eq!(config.background, HsvBand::default());
        assert_eq!(config.text.font, "basic");
        assert_eq!(config.text.top_margin, 30);
        assert_eq!(config.text.bottom_margin, 20);
        assert_eq!(config.rotate.fill_color().unwrap(), Color::BLACK);
        assert_eq!(config.rotate.filter, InterpolationFilter::Bilinear);
        assert_eq!(config.output.formats, vec![OutputFormat::WebP, OutputFormat::Png]);
        assert_eq!(config.output.file_stem, "modified_image");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
[transfer]
max_width = 1024

[text]
top_margin = 10
bottom_margin = 10

[output]
formats = ["png"]
"#;
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.transfer.max_width, 1024);
        assert_eq!(config.transfer.max_height, 800);
        assert_eq!(config.text.margins(), Margins { top: COMPACT_MARGIN, bottom: COMPACT_MARGIN });
        assert_eq!(config.text.font, "basic");
        assert_eq!(config.output.formats, vec![OutputFormat::Png]);
        assert_eq!(config.output.file_stem, "modified_image");
    }

    #[test]
    fn test_background_and_rotate_override() {
        let toml = r##"
[background]
lower = [0, 0, 180]
upper = [180, 40, 255]

[rotate]
fill = "#FFFFFF"
filter = "lanczos3"
"##;
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.background.lower, [0, 0, 180]);
        assert_eq!(config.rotate.fill_color().unwrap(), Color::WHITE);
        assert_eq!(config.rotate.filter, InterpolationFilter::Lanczos3);
    }

    #[test]
    fn test_nearest_filter() {
        let config = EngineConfig::from_toml_str("[rotate]\nfilter = \"nearest\"").unwrap();
        assert_eq!(config.rotate.filter, InterpolationFilter::Nearest);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_toml_str("[text]\nfont_size = 12").unwrap_err();
        assert!(matches!(err, EditError::InvalidParameter { name: "config", .. }));
        assert!(EngineConfig::from_toml_str("colour = 1").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EngineConfig::from_toml_str("[transfer]\nmax_width = 0").is_err());
        assert!(EngineConfig::from_toml_str("[output]\nformats = []").is_err());
        assert!(EngineConfig::from_toml_str("[output]\nformats = [\"gif\"]").is_err());
        assert!(EngineConfig::from_toml_str("[rotate]\nfill = \"black\"").is_err());
        assert!(EngineConfig::from_toml_str(
            "[background]\nlower = [0, 50, 0]\nupper = [180, 25, 255]"
        )
        .is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(EngineConfig::from_toml_str("[transfer\nmax_width = ").is_err());
    }
}
