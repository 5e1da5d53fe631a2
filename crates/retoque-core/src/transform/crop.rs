//! Rectangular and elliptical cropping.
//!
//! Rectangles are given in absolute pixel coordinates and clipped to the
//! image before use. A rectangle that is empty after clipping is an error,
//! never a silently resized output.

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::mask::{ellipse_mask, put_alpha};
use crate::raster::RasterImage;

/// Pixel rectangle, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i64, height as i64)
    }

    /// Clip to `[0, width] x [0, height]`.
    ///
    /// Returns `None` when nothing is left (`x1 >= x2` or `y1 >= y2`).
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let (w, h) = (width as i64, height as i64);
        let clipped = Rect {
            x1: self.x1.clamp(0, w),
            y1: self.y1.clamp(0, h),
            x2: self.x2.clamp(0, w),
            y2: self.y2.clamp(0, h),
        };
        (clipped.x1 < clipped.x2 && clipped.y1 < clipped.y2).then_some(clipped)
    }

    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }
}

/// Extract a sub-rectangle of an image.
///
/// # Arguments
///
/// * `image` - Source image, any color space
/// * `rect` - Region to keep; coordinates outside the image are clipped
///
/// # Returns
///
/// A new image of exactly `(x2 - x1) x (y2 - y1)` pixels after clipping.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if the clipped rectangle is empty.
pub fn crop(image: &RasterImage, rect: Rect) -> EditResult<RasterImage> {
    let region = rect
        .clip(image.width(), image.height())
        .ok_or(EditError::InvalidRegion {
            x1: rect.x1,
            y1: rect.y1,
            x2: rect.x2,
            y2: rect.y2,
            width: image.width(),
            height: image.height(),
        })?;

    if region == Rect::full(image.width(), image.height()) {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let src_stride = image.width() as usize * channels;
    let out_w = region.width() as usize;
    let out_h = region.height() as usize;
    let row_bytes = out_w * channels;

    let mut output = Vec::with_capacity(row_bytes * out_h);
    for y in region.y1 as usize..region.y2 as usize {
        let start = y * src_stride + region.x1 as usize * channels;
        output.extend_from_slice(&image.pixels()[start..start + row_bytes]);
    }

    Ok(RasterImage::from_raw_parts(
        out_w as u32,
        out_h as u32,
        image.color_space(),
        output,
    ))
}

/// Cut the inscribed ellipse out of `image`, in place.
///
/// The image is promoted to RGBA. Pixels inside the ellipse become fully
/// opaque and the corners fully transparent; color data is left as is.
pub fn round_crop(image: &mut RasterImage) {
    let mask = ellipse_mask(image.width(), image.height());
    put_alpha(image, &mask);
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::ColorSpace;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=60, 1u32..=60)
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-20i64..80, -20i64..80, -20i64..80, -20i64..80)
            .prop_map(|(x1, y1, x2, y2)| Rect::new(x1, y1, x2, y2))
    }

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let pixels = (0..width * height).map(|i| (i % 251) as u8).collect();
        RasterImage::new(width, height, ColorSpace::Gray, pixels).unwrap()
    }

    proptest! {
        /// Property: a successful crop has exactly the clipped dimensions.
        #[test]
        fn prop_crop_matches_clipped_rect(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            match (crop(&img, rect), rect.clip(width, height)) {
                (Ok(out), Some(clipped)) => {
                    prop_assert_eq!(out.width() as i64, clipped.width());
                    prop_assert_eq!(out.height() as i64, clipped.height());
                    prop_assert_eq!(out.pixels().len(), out.pixel_count());
                }
                (Err(EditError::InvalidRegion { .. }), None) => {}
                (result, clipped) => {
                    prop_assert!(false, "crop {:?} vs clip {:?}", result.map(|r| r.width()), clipped);
                }
            }
        }

        /// Property: output never exceeds the input.
        #[test]
        fn prop_output_bounded_by_input(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            if let Ok(out) = crop(&img, rect) {
                prop_assert!(out.width() <= width);
                prop_assert!(out.height() <= height);
            }
        }

        /// Property: the first output pixel is the clipped top-left source pixel.
        #[test]
        fn prop_origin_pixel_from_source(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            if let (Ok(out), Some(c)) = (crop(&img, rect), rect.clip(width, height)) {
                prop_assert_eq!(out.pixels()[0], img.pixel(c.x1 as u32, c.y1 as u32)[0]);
            }
        }
    }
}
