//! The operation catalog and its single dispatch point.
//!
//! Each editor tool is one [`Operation`] variant carrying its parameters.
//! Operations arrive from the UI as loosely-typed objects tagged with `op`:
//!
//! ```json
//! {"op": "blur", "radius": 3}
//! {"op": "text", "text": "Hola", "position": "10,20"}
//! ```
//!
//! Missing parameters take the editor's defaults. Parameters are validated
//! before any pixel is touched, and [`Operation::apply`] always works on a
//! copy, so a failed operation leaves the caller's image as it was.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adjustments::{brightness, grayscale, invert, tint_blend};
use crate::blur::gaussian_blur;
use crate::config::EngineConfig;
use crate::error::{EditError, EditResult};
use crate::probe::{probe, Sample};
use crate::raster::RasterImage;
use crate::segment::remove_background;
use crate::shadows::lift_shadows;
use crate::text::{overlay_text, TextAnchor, MAX_TEXT_SIZE};
use crate::transform::{crop, rotate, round_crop, scale, Rect, MAX_SCALE_FACTOR};
use crate::Color;

/// Every tool name the editor offers, aliases included.
pub const CATALOG: [&str; 16] = [
    "darken",
    "darkening_tool",
    "brighten",
    "shadow_lift",
    "remove_background",
    "scale",
    "invert",
    "invert_tool",
    "blur",
    "round_crop",
    "crop",
    "probe",
    "grayscale",
    "tint",
    "rotate",
    "text",
];

const DARKEN_RANGE: (f32, f32) = (0.0, 1.0);
const BRIGHTEN_RANGE: (f32, f32) = (1.0, 3.0);
const BLUR_RANGE: (f32, f32) = (1.0, 20.0);
const ROTATE_RANGE: (f64, f64) = (-180.0, 180.0);
const TEXT_SIZE_RANGE: (i64, i64) = (10, MAX_TEXT_SIZE as i64);

fn default_darken_factor() -> f32 {
    0.5
}
fn default_brighten_factor() -> f32 {
    1.5
}
fn default_threshold() -> i64 {
    crate::shadows::DEFAULT_SHADOW_THRESHOLD as i64
}
fn default_scale_factor() -> f64 {
    2.0
}
fn default_blur_radius() -> f32 {
    5.0
}
fn default_probe_coord() -> i64 {
    10
}
fn default_tint() -> String {
    "#FF0000".to_string()
}
fn default_text() -> String {
    "Tu Título Aquí".to_string()
}
fn default_position() -> String {
    "top".to_string()
}
fn default_text_size() -> i64 {
    30
}
fn default_text_color() -> String {
    "#FFFFFF".to_string()
}

/// One editor operation with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Operation {
    /// Brightness with a factor in [0, 1].
    #[serde(alias = "darkening_tool")]
    Darken {
        #[serde(default = "default_darken_factor")]
        factor: f32,
    },
    /// Brightness with a factor in [1, 3].
    Brighten {
        #[serde(default = "default_brighten_factor")]
        factor: f32,
    },
    /// Lift pixels darker than `threshold` (0-255) up to it.
    ShadowLift {
        #[serde(default = "default_threshold")]
        threshold: i64,
    },
    RemoveBackground,
    /// Resample by a factor in (0, 5].
    Scale {
        #[serde(default = "default_scale_factor")]
        factor: f64,
    },
    #[serde(alias = "invert_tool")]
    Invert,
    /// Gaussian blur with a radius in [1, 20].
    Blur {
        #[serde(default = "default_blur_radius")]
        radius: f32,
    },
    RoundCrop,
    /// Rectangular crop; missing edges default to the image bounds.
    Crop {
        #[serde(default)]
        x1: Option<i64>,
        #[serde(default)]
        y1: Option<i64>,
        #[serde(default)]
        x2: Option<i64>,
        #[serde(default)]
        y2: Option<i64>,
    },
    /// Read one pixel.
    Probe {
        #[serde(default = "default_probe_coord")]
        x: i64,
        #[serde(default = "default_probe_coord")]
        y: i64,
    },
    Grayscale,
    /// 50/50 blend with a hex color.
    Tint {
        #[serde(default = "default_tint")]
        color: String,
    },
    /// Counter-clockwise rotation in [-180, 180] degrees.
    Rotate {
        #[serde(default)]
        degrees: f64,
    },
    /// Text overlay.
    Text {
        #[serde(default = "default_text")]
        text: String,
        #[serde(default = "default_position")]
        position: String,
        #[serde(default = "default_text_size")]
        size: i64,
        #[serde(default = "default_text_color")]
        color: String,
    },
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new image.
    Image(RasterImage),
    /// A pixel read; the image itself is unchanged.
    Sample { x: i64, y: i64, sample: Sample },
}

impl Outcome {
    /// The produced image, if any.
    pub fn into_image(self) -> Option<RasterImage> {
        match self {
            Outcome::Image(image) => Some(image),
            Outcome::Sample { .. } => None,
        }
    }

    /// Message shown for a pixel read.
    pub fn report(&self) -> Option<String> {
        match self {
            Outcome::Image(_) => None,
            Outcome::Sample { x, y, sample } => Some(format!("Color at ({x}, {y}): {sample}")),
        }
    }
}

fn check_range<T>(name: &'static str, value: T, (min, max): (T, T)) -> EditResult<()>
where
    T: PartialOrd + fmt::Display + Copy,
{
    // NaN fails both comparisons and is rejected here too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(EditError::invalid(
            name,
            format!("{value} is outside [{min}, {max}]"),
        ))
    }
}

impl Operation {
    /// Parse an operation from JSON.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for an unknown `op`, an unknown
    /// field, or a parameter of the wrong type.
    pub fn from_json(source: &str) -> EditResult<Self> {
        serde_json::from_str(source).map_err(|e| EditError::invalid("operation", e.to_string()))
    }

    /// The operation for a catalog name with every parameter at its default.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if `name` is not in [`CATALOG`].
    pub fn with_defaults(name: &str) -> EditResult<Self> {
        serde_json::from_value(serde_json::json!({ "op": name }))
            .map_err(|e| EditError::invalid("operation", e.to_string()))
    }

    /// Canonical catalog name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Darken { .. } => "darken",
            Operation::Brighten { .. } => "brighten",
            Operation::ShadowLift { .. } => "shadow_lift",
            Operation::RemoveBackground => "remove_background",
            Operation::Scale { .. } => "scale",
            Operation::Invert => "invert",
            Operation::Blur { .. } => "blur",
            Operation::RoundCrop => "round_crop",
            Operation::Crop { .. } => "crop",
            Operation::Probe { .. } => "probe",
            Operation::Grayscale => "grayscale",
            Operation::Tint { .. } => "tint",
            Operation::Rotate { .. } => "rotate",
            Operation::Text { .. } => "text",
        }
    }

    /// Check every parameter against its accepted range or format.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for out-of-range numbers or a
    /// malformed color, and `EditError::InvalidPosition` for a malformed
    /// text position.
    pub fn validate(&self) -> EditResult<()> {
        match self {
            Operation::Darken { factor } => check_range("factor", *factor, DARKEN_RANGE),
            Operation::Brighten { factor } => check_range("factor", *factor, BRIGHTEN_RANGE),
            Operation::ShadowLift { threshold } => check_range("threshold", *threshold, (0, 255)),
            Operation::Scale { factor } => {
                if *factor > 0.0 && *factor <= MAX_SCALE_FACTOR {
                    Ok(())
                } else {
                    Err(EditError::invalid(
                        "factor",
                        format!("{factor} is outside (0, {MAX_SCALE_FACTOR}]"),
                    ))
                }
            }
            Operation::Blur { radius } => check_range("radius", *radius, BLUR_RANGE),
            Operation::Rotate { degrees } => check_range("degrees", *degrees, ROTATE_RANGE),
            Operation::Tint { color } => Color::from_hex(color).map(|_| ()),
            Operation::Text {
                position,
                size,
                color,
                ..
            } => {
                check_range("size", *size, TEXT_SIZE_RANGE)?;
                Color::from_hex(color)?;
                TextAnchor::parse(position).map(|_| ())
            }
            Operation::RemoveBackground
            | Operation::Invert
            | Operation::RoundCrop
            | Operation::Crop { .. }
            | Operation::Probe { .. }
            | Operation::Grayscale => Ok(()),
        }
    }

    /// Validate, then run this operation on a copy of `image`.
    ///
    /// # Errors
    ///
    /// Any validation error, plus the operation's own failures
    /// (`InvalidRegion` for crop, `OutOfBounds` for probe, `MissingResource`
    /// for text).
    pub fn apply(&self, image: &RasterImage, config: &EngineConfig) -> EditResult<Outcome> {
        self.validate()?;
        log::info!(
            "Applying {} to {}x{} {:?} image",
            self.name(),
            image.width(),
            image.height(),
            image.color_space()
        );

        let edited = match self {
            Operation::Darken { factor } | Operation::Brighten { factor } => {
                brightness(image, *factor)?
            }
            Operation::ShadowLift { threshold } => lift_shadows(image, *threshold as u8),
            Operation::RemoveBackground => remove_background(image, &config.background)?,
            Operation::Scale { factor } => scale(image, *factor)?,
            Operation::Invert => invert(image),
            Operation::Blur { radius } => gaussian_blur(image, *radius)?,
            Operation::RoundCrop => {
                let mut copy = image.clone();
                round_crop(&mut copy);
                copy
            }
            Operation::Crop { x1, y1, x2, y2 } => {
                let full = Rect::full(image.width(), image.height());
                let rect = Rect::new(
                    x1.unwrap_or(full.x1),
                    y1.unwrap_or(full.y1),
                    x2.unwrap_or(full.x2),
                    y2.unwrap_or(full.y2),
                );
                crop(image, rect)?
            }
            Operation::Probe { x, y } => {
                let sample = probe(image, *x, *y)?;
                return Ok(Outcome::Sample {
                    x: *x,
                    y: *y,
                    sample,
                });
            }
            Operation::Grayscale => grayscale(image),
            Operation::Tint { color } => tint_blend(image, Color::from_hex(color)?),
            Operation::Rotate { degrees } => rotate(
                image,
                *degrees,
                config.rotate.fill_color()?,
                config.rotate.filter,
            )?,
            Operation::Text {
                text,
                position,
                size,
                color,
            } => overlay_text(
                image,
                text,
                TextAnchor::parse(position)?,
                *size as u32,
                Color::from_hex(color)?,
                &config.text,
            )?,
        };

        Ok(Outcome::Image(edited))
    }
}
