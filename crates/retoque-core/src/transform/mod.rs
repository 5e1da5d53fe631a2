//! Geometric transforms: scale, rotation, and cropping.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Crop rectangles are `(x1, y1, x2, y2)` in pixels, `x2`/`y2` exclusive
//! - Rotation angles are in degrees, positive = counter-clockwise
//!
//! Every transform returns a new raster except [`round_crop`], which cuts
//! the ellipse into the image it is handed.

mod crop;
mod rotation;
mod scale;

pub use crop::{crop, round_crop, Rect};
pub use rotation::{compute_rotated_bounds, rotate, InterpolationFilter};
pub use scale::{resample, scale, MAX_SCALE_FACTOR};
