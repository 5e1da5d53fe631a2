//! Photometric adjustments.
//!
//! - Brightness (backs both "darken" and "brighten")
//! - Invert
//! - Grayscale
//! - Tint blend
//!
//! Gaussian blur lives in [`crate::blur`]. Per-channel adjustments go through
//! a 256-entry lookup table. Brightness leaves alpha alone; invert maps every
//! channel, alpha included.

use crate::colorspace::{convert, displayable};
use crate::error::{EditError, EditResult};
use crate::raster::{ColorSpace, RasterImage};
use crate::Color;

/// Scale every color channel by `factor`, clamped to 0-255.
///
/// `factor = 1` is the identity, below 1 darkens, above 1 brightens.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `factor` is negative or not finite.
pub fn brightness(image: &RasterImage, factor: f32) -> EditResult<RasterImage> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(EditError::invalid(
            "factor",
            format!("brightness factor must be a finite value >= 0, got {factor}"),
        ));
    }

    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        *out = (i as f32 * factor).round().clamp(0.0, 255.0) as u8;
    }

    Ok(apply_lut(image, &lut, false))
}

/// Replace every channel with `255 - value`, alpha included.
///
/// An opaque RGBA pixel therefore comes back fully transparent.
pub fn invert(image: &RasterImage) -> RasterImage {
    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        *out = 255 - i as u8;
    }
    apply_lut(image, &lut, true)
}

/// Collapse to a single BT.601 luminance channel. Alpha is discarded.
pub fn grayscale(image: &RasterImage) -> RasterImage {
    convert(image, ColorSpace::Gray)
}

/// Mix the image 50/50 with a solid `color`.
///
/// The image is first flattened to opaque RGB, so the result is always RGB.
/// The color's own alpha is ignored.
pub fn tint_blend(image: &RasterImage, color: Color) -> RasterImage {
    let mut rgb = convert(image, ColorSpace::Rgb);
    let solid = [color.r, color.g, color.b];

    for px in rgb.pixels_mut().chunks_exact_mut(3) {
        for (channel, tint) in px.iter_mut().zip(solid) {
            *channel = ((*channel as u16 + tint as u16 + 1) / 2) as u8;
        }
    }

    rgb
}

/// Map channels through `lut`. Alpha is copied unless `map_alpha` is set.
fn apply_lut(image: &RasterImage, lut: &[u8; 256], map_alpha: bool) -> RasterImage {
    let mut output = displayable(image).into_owned();
    let channels = output.channels();
    let mapped = if output.has_alpha() && !map_alpha {
        channels - 1
    } else {
        channels
    };

    for px in output.pixels_mut().chunks_exact_mut(channels) {
        for value in &mut px[..mapped] {
            *value = lut[*value as usize];
        }
    }

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
