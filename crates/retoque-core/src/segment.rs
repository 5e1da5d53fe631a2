//! Background removal by HSV color keying.
//!
//! ## Algorithm
//! 1. Flatten to RGB and convert to HSV
//! 2. Select background pixels inside the [`HsvBand`]
//! 3. Keep only the foreground (background pixels become black)
//! 4. Promote to RGBA and make every pure-black pixel transparent
//!
//! Step 4 keys on black, so foreground pixels that were already pure black
//! turn transparent as well.

use crate::colorspace::convert;
use crate::error::EditResult;
use crate::mask::{key_out_color, keep_masked, HsvBand};
use crate::raster::{ColorSpace, RasterImage};
use crate::Color;

/// Remove the light background of an image. The result is always RGBA.
pub fn remove_background(image: &RasterImage, band: &HsvBand) -> EditResult<RasterImage> {
    let mut subject = convert(image, ColorSpace::Rgb);
    let hsv = convert(&subject, ColorSpace::Hsv);

    let background = band.select(&hsv)?;
    keep_masked(&mut subject, &background.inverted());

    let transparent = key_out_color(&mut subject, Color::BLACK);
    log::debug!(
        "Background removal: {} background pixels, {} transparent of {}",
        background.count_set(),
        transparent,
        subject.pixel_count()
    );

    Ok(subject)
}
