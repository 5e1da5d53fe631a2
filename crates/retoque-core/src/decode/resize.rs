//! Bounding images to a maximum transfer size.
//!
//! Images are only ever scaled down. The side that hits its bound lands on
//! it exactly; the other side follows the aspect ratio.

use crate::error::{EditError, EditResult};
use crate::raster::RasterImage;
use crate::transform::resample;

/// Shrink an image to fit within `max_width` x `max_height`.
///
/// # Arguments
///
/// * `image` - The source image
/// * `max_width` - Maximum width in pixels
/// * `max_height` - Maximum height in pixels
///
/// # Returns
///
/// A copy of `image` when it already fits, otherwise a Lanczos3 downscale.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if either bound is zero.
pub fn bound(image: &RasterImage, max_width: u32, max_height: u32) -> EditResult<RasterImage> {
    if max_width == 0 || max_height == 0 {
        return Err(EditError::invalid(
            "bound",
            format!("transfer bound {max_width}x{max_height} must be non-zero"),
        ));
    }

    let (src_width, src_height) = (image.width(), image.height());
    if src_width <= max_width && src_height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(src_width, src_height, max_width, max_height);
    log::debug!(
        "Bounding {src_width}x{src_height} to {new_width}x{new_height} (limit {max_width}x{max_height})"
    );
    resample(image, new_width, new_height)
}

/// Calculate dimensions that fit within the bounds while preserving aspect ratio.
///
/// Never scales up: dimensions that already fit are returned unchanged.
pub fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio_w = max_width as f64 / width as f64;
    let ratio_h = max_height as f64 / height as f64;

    if ratio_w <= ratio_h {
        // Width is the binding constraint
        let new_height = (height as f64 * ratio_w).round() as u32;
        (max_width, new_height.clamp(1, max_height))
    } else {
        let new_width = (width as f64 * ratio_h).round() as u32;
        (new_width.clamp(1, max_width), max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorSpace;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        RasterImage::new(width, height, ColorSpace::Rgb, pixels).unwrap()
    }

    #[test]
    fn test_bound_landscape() {
        let img = create_test_image(1600, 800);
        let result = bound(&img, 800, 800).unwrap();
        assert_eq!((result.width(), result.height()), (800, 400));
    }

    #[test]
    fn test_bound_already_fits() {
        let img = create_test_image(400, 300);
        let result = bound(&img, 800, 800).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_bound_portrait() {
        let img = create_test_image(300, 900);
        let result = bound(&img, 800, 800).unwrap();
        assert_eq!((result.width(), result.height()), (267, 800));
    }

    #[test]
    fn test_bound_exact_fit_is_unchanged() {
        let img = create_test_image(800, 800);
        assert_eq!(bound(&img, 800, 800).unwrap(), img);
    }

    #[test]
    fn test_bound_keeps_alpha() {
        let img = RasterImage::filled(40, 20, ColorSpace::Rgba, &[1, 2, 3, 4]).unwrap();
        let result = bound(&img, 10, 10).unwrap();
        assert_eq!((result.width(), result.height()), (10, 5));
        assert_eq!(result.color_space(), ColorSpace::Rgba);
    }

    #[test]
    fn test_bound_rejects_zero_limit() {
        let img = create_test_image(4, 4);
        assert!(bound(&img, 0, 10).is_err());
        assert!(bound(&img, 10, 0).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        // Landscape bound by width
        assert_eq!(calculate_fit_dimensions(1600, 800, 800, 800), (800, 400));
        // Portrait bound by height
        assert_eq!(calculate_fit_dimensions(800, 1600, 800, 800), (400, 800));
        // Square
        assert_eq!(calculate_fit_dimensions(1000, 1000, 500, 500), (500, 500));
        // Non-square bound: height is tighter
        assert_eq!(calculate_fit_dimensions(1000, 1000, 800, 400), (400, 400));
        // Extreme aspect never collapses to zero
        assert_eq!(calculate_fit_dimensions(10000, 1, 100, 100), (100, 1));
        // Already fits
        assert_eq!(calculate_fit_dimensions(10, 20, 800, 800), (10, 20));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the result always fits and is never larger than the input.
        #[test]
        fn prop_fit_within_bounds(
            width in 1u32..=5000,
            height in 1u32..=5000,
            max_w in 1u32..=2000,
            max_h in 1u32..=2000,
        ) {
            let (w, h) = calculate_fit_dimensions(width, height, max_w, max_h);
            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= max_w && h <= max_h);
            prop_assert!(w <= width && h <= height);
        }

        /// Property: when shrinking, one side lands exactly on its bound.
        #[test]
        fn prop_binding_side_is_exact(
            width in 1u32..=5000,
            height in 1u32..=5000,
            max_w in 1u32..=2000,
            max_h in 1u32..=2000,
        ) {
            prop_assume!(width > max_w || height > max_h);
            let (w, h) = calculate_fit_dimensions(width, height, max_w, max_h);
            prop_assert!(w == max_w || h == max_h);
        }

        /// Property: aspect ratio is preserved within rounding.
        #[test]
        fn prop_aspect_ratio_preserved(
            width in 50u32..=5000,
            height in 50u32..=5000,
        ) {
            let (w, h) = calculate_fit_dimensions(width, height, 800, 800);
            let original = width as f64 / height as f64;
            let fitted = w as f64 / h as f64;
            // one pixel of rounding on the short side
            let tolerance = original / (w.min(h) as f64) + 0.01;
            prop_assert!((original - fitted).abs() <= tolerance * original.max(1.0));
        }
    }
}
