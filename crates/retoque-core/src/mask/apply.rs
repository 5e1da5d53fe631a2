//! Applying masks to rasters
//!
//! These helpers mutate the raster they are given. Callers that must keep
//! their original image pass a working copy.

use super::Mask;
use crate::colorspace::convert;
use crate::raster::{ColorSpace, RasterImage};
use crate::Color;

/// Zero every pixel that is not selected by `mask` (all channels).
pub fn keep_masked(image: &mut RasterImage, mask: &Mask) {
    debug_assert_eq!((image.width(), image.height()), (mask.width(), mask.height()));

    let channels = image.channels();
    for (px, &coverage) in image
        .pixels_mut()
        .chunks_exact_mut(channels)
        .zip(mask.coverage())
    {
        if coverage == super::MASK_CLEAR {
            px.fill(0);
        }
    }
}

/// Replace the alpha channel with the mask's coverage, promoting to RGBA.
pub fn put_alpha(image: &mut RasterImage, mask: &Mask) {
    debug_assert_eq!((image.width(), image.height()), (mask.width(), mask.height()));

    if image.color_space() != ColorSpace::Rgba {
        *image = convert(image, ColorSpace::Rgba);
    }
    for (px, &coverage) in image.pixels_mut().chunks_exact_mut(4).zip(mask.coverage()) {
        px[3] = coverage;
    }
}

/// Make every pixel whose RGB equals `key` fully transparent.
///
/// The image is promoted to RGBA first. Returns how many pixels were keyed.
pub fn key_out_color(image: &mut RasterImage, key: Color) -> usize {
    if image.color_space() != ColorSpace::Rgba {
        *image = convert(image, ColorSpace::Rgba);
    }
    let mut keyed = 0;
    for px in image.pixels_mut().chunks_exact_mut(4) {
        if px[0] == key.r && px[1] == key.g && px[2] == key.b {
            px[3] = 0;
            keyed += 1;
        }
    }
    keyed
}
