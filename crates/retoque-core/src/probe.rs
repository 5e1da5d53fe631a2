//! Single-pixel color reads.

use std::fmt;

use crate::error::{EditError, EditResult};
use crate::raster::{ColorSpace, RasterImage};

/// Channel values read from one pixel.
///
/// Holds one value for gray, three for RGB/HSV/Lab and four for RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    values: [u8; 4],
    len: usize,
    color_space: ColorSpace,
}

impl Sample {
    /// The channel values, in the image's channel order.
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len]
    }

    /// Color space the values are expressed in.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }
}

impl fmt::Display for Sample {
    /// `v` for gray, `(r, g, b)` or `(r, g, b, a)` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice() {
            [v] => write!(f, "{v}"),
            values => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Read the pixel at `(x, y)`.
///
/// # Errors
///
/// Returns `EditError::OutOfBounds` unless `0 <= x < width` and
/// `0 <= y < height`.
pub fn probe(image: &RasterImage, x: i64, y: i64) -> EditResult<Sample> {
    let inside = (0..image.width() as i64).contains(&x) && (0..image.height() as i64).contains(&y);
    if !inside {
        return Err(EditError::OutOfBounds {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });
    }

    let pixel = image.pixel(x as u32, y as u32);
    let mut values = [0u8; 4];
    values[..pixel.len()].copy_from_slice(pixel);
    Ok(Sample {
        values,
        len: pixel.len(),
        color_space: image.color_space(),
    })
}
