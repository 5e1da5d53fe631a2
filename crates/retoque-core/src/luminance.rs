//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! These are the weights used when collapsing color to a single gray
//! channel, so a grayscale conversion here matches what common image
//! libraries produce for "L" mode.

/// BT.601 coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// BT.601 coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// BT.601 coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Calculate luminance from u8 RGB values, rounded to the nearest level.
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = calculate_luminance(r as f32, g as f32, b as f32);
    lum.clamp(0.0, 255.0).round() as u8
}
