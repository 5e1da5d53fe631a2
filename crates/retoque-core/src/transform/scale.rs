//! Resampling to new dimensions.
//!
//! Resizing goes through the `image` crate's Lanczos3 filter, the
//! windowed-sinc resampler used for both user scaling and size bounding.

use image::imageops::FilterType;

use crate::colorspace::displayable;
use crate::error::{EditError, EditResult};
use crate::raster::RasterImage;

/// Largest factor the scale operation accepts.
pub const MAX_SCALE_FACTOR: f64 = 5.0;

/// Largest output, in pixels, that [`resample`] will allocate.
pub const MAX_RESAMPLE_PIXELS: u64 = 100_000_000;

/// Resize an image to exact dimensions with Lanczos3.
///
/// HSV and Lab rasters come back as RGB. Matching dimensions return a copy.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if either dimension is zero or the
/// output would exceed [`MAX_RESAMPLE_PIXELS`].
pub fn resample(image: &RasterImage, width: u32, height: u32) -> EditResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(EditError::invalid(
            "dimensions",
            format!("cannot resample to {width}x{height}"),
        ));
    }
    if width as u64 * height as u64 > MAX_RESAMPLE_PIXELS {
        return Err(EditError::invalid(
            "dimensions",
            format!("{width}x{height} exceeds {MAX_RESAMPLE_PIXELS} pixels"),
        ));
    }

    let source = displayable(image);
    if source.width() == width && source.height() == height {
        return Ok(source.into_owned());
    }

    let resized = source
        .to_dynamic()
        .resize_exact(width, height, FilterType::Lanczos3);
    Ok(RasterImage::from_dynamic(resized))
}

/// Scale both dimensions by `factor`.
///
/// New dimensions are `round(width * factor)` and `round(height * factor)`,
/// never less than one pixel.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `factor` is outside
/// `(0, MAX_SCALE_FACTOR]` or the result would be too large to allocate.
pub fn scale(image: &RasterImage, factor: f64) -> EditResult<RasterImage> {
    // NaN fails the comparison and is rejected here too.
    if !(factor > 0.0 && factor <= MAX_SCALE_FACTOR) {
        return Err(EditError::invalid(
            "factor",
            format!("{factor} is outside (0, {MAX_SCALE_FACTOR}]"),
        ));
    }

    let target = |side: u32| -> EditResult<u32> {
        let scaled = (side as f64 * factor).round().max(1.0);
        if scaled > u32::MAX as f64 {
            return Err(EditError::invalid(
                "factor",
                format!("scaling {side} by {factor} overflows"),
            ));
        }
        Ok(scaled as u32)
    };
    let (width, height) = (target(image.width())?, target(image.height())?);

    log::debug!(
        "Scaling {}x{} by {factor} to {width}x{height}",
        image.width(),
        image.height()
    );
    resample(image, width, height)
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
    fn test_scale_doubles() {
        let img = create_test_image(30, 20);
        let out = scale(&img, 2.0).unwrap();
        assert_eq!((out.width(), out.height()), (60, 40));
        assert_eq!(out.color_space(), ColorSpace::Rgb);
    }

    #[test]
    fn test_scale_rounds_dimensions() {
        let img = create_test_image(10, 3);
        let out = scale(&img, 1.25).unwrap();
        // 12.5 -> 13, 3.75 -> 4
        assert_eq!((out.width(), out.height()), (13, 4));
    }

    #[test]
    fn test_scale_never_below_one_pixel() {
        let img = create_test_image(10, 10);
        let out = scale(&img, 0.01).unwrap();
        assert_eq!((out.width(), out.height()), (1, 1));
    }

    #[test]
    fn test_scale_identity_is_copy() {
        let img = create_test_image(16, 9);
        assert_eq!(scale(&img, 1.0).unwrap(), img);
    }

    #[test]
    fn test_scale_rejects_out_of_range() {
        let img = create_test_image(4, 4);
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY, 5.01, 4.0e6] {
            assert!(
                matches!(
                    scale(&img, factor),
                    Err(EditError::InvalidParameter { name: "factor", .. })
                ),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn test_scale_keeps_alpha_and_gray() {
        let rgba = RasterImage::filled(8, 8, ColorSpace::Rgba, &[10, 20, 30, 40]).unwrap();
        let out = scale(&rgba, 0.5).unwrap();
        assert_eq!(out.color_space(), ColorSpace::Rgba);
        assert_eq!(out.pixel(2, 2), &[10, 20, 30, 40]);

        let gray = RasterImage::filled(8, 8, ColorSpace::Gray, &[77]).unwrap();
        let out = scale(&gray, 3.0).unwrap();
        assert_eq!(out.color_space(), ColorSpace::Gray);
        assert_eq!((out.width(), out.height()), (24, 24));
    }

    #[test]
    fn test_scale_max_factor_accepted() {
        let img = create_test_image(3, 2);
        let out = scale(&img, MAX_SCALE_FACTOR).unwrap();
        assert_eq!((out.width(), out.height()), (15, 10));
    }

    #[test]
    fn test_scale_huge_factor_on_large_image_is_error() {
        let img = RasterImage::filled(1000, 1000, ColorSpace::Rgb, &[1, 2, 3]).unwrap();
        assert!(matches!(
            scale(&img, 4.0e6),
            Err(EditError::InvalidParameter { name: "factor", .. })
        ));
    }

    #[test]
    fn test_resample_rejects_oversized_output() {
        let img = create_test_image(4, 4);
        assert!(matches!(
            resample(&img, 100_000, 100_000),
            Err(EditError::InvalidParameter { name: "dimensions", .. })
        ));
    }

    #[test]
    fn test_resample_rejects_zero() {
        let img = create_test_image(4, 4);
        assert!(resample(&img, 0, 4).is_err());
        assert!(resample(&img, 4, 0).is_err());
    }
}
