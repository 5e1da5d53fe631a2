//! Shadow lift: a hard luminance floor applied in Lab space.
//!
//! Each pixel's 8-bit L value (`L* * 255 / 100`) is compared against the
//! threshold. Darker pixels have L raised to exactly the threshold while a
//! and b stay as they were; brighter pixels are copied through untouched.

use crate::colorspace::{convert, encode_lab, lab_to_rgb, rgb_to_lab};
use crate::raster::{ColorSpace, RasterImage};

/// Threshold used when the caller does not pick one.
pub const DEFAULT_SHADOW_THRESHOLD: u8 = 100;

/// Raise every sub-threshold luminance to `threshold`.
///
/// Gray and Lab inputs come back as RGB; RGBA keeps its alpha.
pub fn lift_shadows(image: &RasterImage, threshold: u8) -> RasterImage {
    let target = if image.has_alpha() {
        ColorSpace::Rgba
    } else {
        ColorSpace::Rgb
    };
    let mut output = convert(image, target);
    let channels = output.channels();
    let floor = threshold as f32 * 100.0 / 255.0;

    let mut lifted = 0usize;
    for px in output.pixels_mut().chunks_exact_mut(channels) {
        let lab = rgb_to_lab(px[0], px[1], px[2]);
        if encode_lab(lab)[0] >= threshold {
            continue;
        }
        let [r, g, b] = lab_to_rgb(floor, lab[1], lab[2]);
        px[0] = r;
        px[1] = g;
        px[2] = b;
        lifted += 1;
    }

    log::debug!(
        "Shadow lift at {} raised {} of {} pixels",
        threshold,
        lifted,
        output.pixel_count()
    );
    output
}

/// 8-bit L channel of an RGB(A) pixel, as compared against the threshold.
pub fn luminance_level(r: u8, g: u8, b: u8) -> u8 {
    encode_lab(rgb_to_lab(r, g, b))[0]
}
