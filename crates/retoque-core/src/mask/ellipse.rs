//! Elliptical mask inscribed in an image's bounding box.
//!
//! A pixel is inside when its center satisfies
//! `((x - cx) / rx)^2 + ((y - cy) / ry)^2 <= 1`, with the center and radii
//! taken from the full image rectangle. The edge is hard: no feathering.

use super::Mask;

/// Build the inscribed ellipse mask for a `width` x `height` box.
pub fn ellipse_mask(width: u32, height: u32) -> Mask {
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;

    Mask::from_fn(width, height, |x, y| {
        normalized_distance_sq(x as f64 + 0.5, y as f64 + 0.5, rx, ry) <= 1.0
    })
}

/// Squared distance from the center in ellipse space; 1.0 is the boundary.
#[inline]
fn normalized_distance_sq(px: f64, py: f64, rx: f64, ry: f64) -> f64 {
    let dx = (px - rx) / rx;
    let dy = (py - ry) / ry;
    dx * dx + dy * dy
}
