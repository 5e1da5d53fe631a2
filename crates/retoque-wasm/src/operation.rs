//! Operation WASM bindings.
//!
//! The editor sends one operation at a time as a plain object tagged by
//! `op`, always against the bounded original:
//!
//! ```typescript
//! const outcome = apply_operation(original, { op: 'rotate', degrees: 45 }, undefined);
//! if (outcome.is_probe) {
//!     showMessage(outcome.message);
//! } else {
//!     preview(outcome.image());
//! }
//! ```

use crate::config::engine_config;
use crate::types::{color_space_name, JsRasterImage};
use retoque_core::error::EditResult;
use retoque_core::operation::CATALOG;
use retoque_core::{EngineConfig, Operation, Outcome};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result of one operation: a new image, or a probe message.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsOutcome {
    image: Option<JsRasterImage>,
    message: Option<String>,
}

#[wasm_bindgen]
impl JsOutcome {
    /// The produced image; `undefined` for a probe.
    pub fn image(&self) -> Option<JsRasterImage> {
        self.image.clone()
    }

    /// Probe message such as `Color at (10, 10): (255, 0, 0)`.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn is_probe(&self) -> bool {
        self.image.is_none()
    }
}

impl JsOutcome {
    fn from_outcome(outcome: Outcome) -> Self {
        let message = outcome.report();
        Self {
            image: outcome.into_image().map(JsRasterImage::from_raster),
            message,
        }
    }
}

/// Pixel read returned by [`probe_pixel`].
#[derive(Debug, Clone, Serialize)]
struct ProbeReport {
    x: i64,
    y: i64,
    values: Vec<u8>,
    color_space: &'static str,
    message: String,
}

/// Apply one operation to the original image.
///
/// # Arguments
///
/// * `image` - The bounded original; it is not modified
/// * `operation` - Object with an `op` name from [`operation_catalog`] and its parameters
/// * `config` - Optional engine configuration
///
/// # Errors
///
/// Returns the engine's message for an unknown operation, an invalid
/// parameter, or a failure while processing.
#[wasm_bindgen]
pub fn apply_operation(
    image: &JsRasterImage,
    operation: JsValue,
    config: JsValue,
) -> Result<JsOutcome, JsValue> {
    let operation: Operation =
        serde_wasm_bindgen::from_value(operation).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = engine_config(config)?;
    apply_with(image, &operation, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the pixel at `(x, y)`.
///
/// Returns `{ x, y, values, color_space, message }`.
#[wasm_bindgen]
pub fn probe_pixel(image: &JsRasterImage, x: i32, y: i32) -> Result<JsValue, JsValue> {
    let report = probe_with(image, x as i64, y as i64).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Every operation name the editor offers, aliases included.
#[wasm_bindgen]
pub fn operation_catalog() -> js_sys::Array {
    CATALOG.iter().map(|name| JsValue::from_str(name)).collect()
}

/// The operation object for `name` with every parameter at its default.
///
/// Useful for seeding the parameter widgets.
#[wasm_bindgen]
pub fn operation_defaults(name: &str) -> Result<JsValue, JsValue> {
    let operation = Operation::with_defaults(name).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&operation).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn apply_with(
    image: &JsRasterImage,
    operation: &Operation,
    config: &EngineConfig,
) -> EditResult<JsOutcome> {
    let original = image.to_raster()?;
    let outcome = operation.apply(&original, config)?;
    Ok(JsOutcome::from_outcome(outcome))
}

fn probe_with(image: &JsRasterImage, x: i64, y: i64) -> EditResult<ProbeReport> {
    let original = image.to_raster()?;
    let sample = retoque_core::probe(&original, x, y)?;
    Ok(ProbeReport {
        x,
        y,
        values: sample.as_slice().to_vec(),
        color_space: color_space_name(sample.color_space()),
        message: format!("Color at ({x}, {y}): {sample}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use retoque_core::{ColorSpace, RasterImage};

    fn original() -> JsRasterImage {
        let raster = RasterImage::filled(40, 20, ColorSpace::Rgb, &[255, 0, 0]).unwrap();
        JsRasterImage::from_raster(raster)
    }

    #[test]
    fn test_apply_returns_image() {
        let img = original();
        let outcome = apply_with(
            &img,
            &Operation::Scale { factor: 0.5 },
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(!outcome.is_probe());
        assert!(outcome.message().is_none());
        let scaled = outcome.image().unwrap();
        assert_eq!((scaled.width(), scaled.height()), (20, 10));
    }

    #[test]
    fn test_apply_leaves_original() {
        let img = original();
        let before = img.pixels();
        apply_with(&img, &Operation::Invert, &EngineConfig::default()).unwrap();
        assert_eq!(img.pixels(), before);
    }

    #[test]
    fn test_apply_probe_reports_message() {
        let outcome = apply_with(
            &original(),
            &Operation::with_defaults("probe").unwrap(),
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(outcome.is_probe());
        assert!(outcome.image().is_none());
        assert_eq!(outcome.message().unwrap(), "Color at (10, 10): (255, 0, 0)");
    }

    #[test]
    fn test_apply_invalid_parameter() {
        let result = apply_with(
            &original(),
            &Operation::Blur { radius: 50.0 },
            &EngineConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_report() {
        let report = probe_with(&original(), 3, 4).unwrap();
        assert_eq!(report.values, vec![255, 0, 0]);
        assert_eq!(report.color_space, "rgb");
        assert_eq!(report.message, "Color at (3, 4): (255, 0, 0)");
        assert!(probe_with(&original(), 40, 0).is_err());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use retoque_core::{ColorSpace, RasterImage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn original() -> JsRasterImage {
        let raster = RasterImage::filled(8, 8, ColorSpace::Rgb, &[10, 20, 30]).unwrap();
        JsRasterImage::from_raster(raster)
    }

    #[wasm_bindgen_test]
    fn test_catalog_lists_every_name() {
        let catalog = operation_catalog();
        assert_eq!(catalog.length() as usize, CATALOG.len());
        assert_eq!(catalog.get(0).as_string().unwrap(), "darken");
    }

    #[wasm_bindgen_test]
    fn test_defaults_round_trip_through_apply() {
        let defaults = operation_defaults("grayscale").unwrap();
        let outcome = apply_operation(&original(), defaults, JsValue::UNDEFINED).unwrap();
        assert_eq!(outcome.image().unwrap().color_space(), "gray");
    }

    #[wasm_bindgen_test]
    fn test_unknown_operation_rejected() {
        assert!(operation_defaults("sharpen").is_err());
    }

    #[wasm_bindgen_test]
    fn test_probe_pixel_out_of_bounds() {
        assert!(probe_pixel(&original(), 2, 2).is_ok());
        assert!(probe_pixel(&original(), -1, 2).is_err());
    }
}
