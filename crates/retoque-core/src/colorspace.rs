//! Color-space conversion between RGB(A), gray, HSV and Lab.
//!
//! Pixel-level functions are pure and library independent. [`convert`]
//! lifts them to whole rasters by routing every pixel through RGBA.
//!
//! ## Encodings
//!
//! | Space | Channel 0 | Channel 1 | Channel 2 |
//! |-------|-----------|-----------|-----------|
//! | HSV   | hue / 2 (0-179) | saturation (0-255) | value (0-255) |
//! | Lab   | L * 255 / 100 | a + 128 | b + 128 |

use std::borrow::Cow;

use crate::luminance::calculate_luminance_u8;
use crate::raster::{ColorSpace, RasterImage};

// D65 reference white.
const XN: f32 = 0.95047;
const YN: f32 = 1.0;
const ZN: f32 = 1.08883;

/// Convert an RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (255.0 * delta / max as f32).round() as u8
    };

    if delta == 0.0 {
        return [0, s, v];
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let degrees = if max == r {
        60.0 * (gf - bf) / delta
    } else if max == g {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    let h = ((degrees / 2.0).round() as u16 % 180) as u8;

    [h, s, v]
}

/// Convert an 8-bit HSV pixel back to RGB.
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    let h = (h as f32 * 2.0).rem_euclid(360.0);
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [to_u8((r + m) * 255.0), to_u8((g + m) * 255.0), to_u8((b + m) * 255.0)]
}

/// Convert sRGB to CIE L*a*b* (L in 0-100).
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> [f32; 3] {
    let rl = srgb_to_linear(r);
    let gl = srgb_to_linear(g);
    let bl = srgb_to_linear(b);

    let x = rl * 0.412_456_4 + gl * 0.357_576_1 + bl * 0.180_437_5;
    let y = rl * 0.212_672_9 + gl * 0.715_152_2 + bl * 0.072_175;
    let z = rl * 0.019_333_9 + gl * 0.119_192 + bl * 0.950_304_1;

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    [
        (116.0 * fy - 16.0).max(0.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    ]
}

/// Convert CIE L*a*b* (L in 0-100) back to sRGB.
pub fn lab_to_rgb(l: f32, a: f32, b: f32) -> [u8; 3] {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let x = lab_f_inv(fx) * XN;
    let y = lab_f_inv(fy) * YN;
    let z = lab_f_inv(fz) * ZN;

    let rl = x * 3.240_454_2 + y * -1.537_138_5 + z * -0.498_531_4;
    let gl = x * -0.969_266 + y * 1.876_010_8 + z * 0.041_556;
    let bl = x * 0.055_643_4 + y * -0.204_025_9 + z * 1.057_225_2;

    [linear_to_srgb(rl), linear_to_srgb(gl), linear_to_srgb(bl)]
}

/// Pack a Lab triple into its 8-bit encoding.
pub fn encode_lab(lab: [f32; 3]) -> [u8; 3] {
    [
        to_u8(lab[0] * 255.0 / 100.0),
        to_u8(lab[1] + 128.0),
        to_u8(lab[2] + 128.0),
    ]
}

/// Unpack an 8-bit Lab pixel.
pub fn decode_lab(encoded: [u8; 3]) -> [f32; 3] {
    [
        encoded[0] as f32 * 100.0 / 255.0,
        encoded[1] as f32 - 128.0,
        encoded[2] as f32 - 128.0,
    ]
}

/// Convert a raster into another color space.
///
/// Every pixel is routed through RGBA. Alpha is dropped when the target has
/// none and set to opaque when the source has none. Converting to the
/// image's own space returns a copy.
pub fn convert(image: &RasterImage, target: ColorSpace) -> RasterImage {
    let source = image.color_space();
    if source == target {
        return image.clone();
    }

    let mut out = Vec::with_capacity(image.pixel_count() * target.channels());
    for px in image.pixels().chunks_exact(source.channels()) {
        let rgba = decode_pixel(source, px);
        encode_pixel(target, rgba, &mut out);
    }

    RasterImage::from_raw_parts(image.width(), image.height(), target, out)
}

/// Borrow displayable rasters as-is; bring HSV and Lab back to RGB.
pub(crate) fn displayable(image: &RasterImage) -> Cow<'_, RasterImage> {
    match image.color_space() {
        ColorSpace::Hsv | ColorSpace::Lab => Cow::Owned(convert(image, ColorSpace::Rgb)),
        _ => Cow::Borrowed(image),
    }
}

fn decode_pixel(space: ColorSpace, px: &[u8]) -> [u8; 4] {
    match space {
        ColorSpace::Gray => [px[0], px[0], px[0], 255],
        ColorSpace::Rgb => [px[0], px[1], px[2], 255],
        ColorSpace::Rgba => [px[0], px[1], px[2], px[3]],
        ColorSpace::Hsv => {
            let [r, g, b] = hsv_to_rgb(px[0], px[1], px[2]);
            [r, g, b, 255]
        }
        ColorSpace::Lab => {
            let [l, a, b] = decode_lab([px[0], px[1], px[2]]);
            let [r, g, b] = lab_to_rgb(l, a, b);
            [r, g, b, 255]
        }
    }
}

fn encode_pixel(space: ColorSpace, [r, g, b, a]: [u8; 4], out: &mut Vec<u8>) {
    match space {
        ColorSpace::Gray => out.push(calculate_luminance_u8(r, g, b)),
        ColorSpace::Rgb => out.extend_from_slice(&[r, g, b]),
        ColorSpace::Rgba => out.extend_from_slice(&[r, g, b, a]),
        ColorSpace::Hsv => out.extend_from_slice(&rgb_to_hsv(r, g, b)),
        ColorSpace::Lab => out.extend_from_slice(&encode_lab(rgb_to_lab(r, g, b))),
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let v = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    to_u8(v * 255.0)
}

fn lab_f(t: f32) -> f32 {
    if t > 0.008_856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > 0.008_856 {
        t3
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}
