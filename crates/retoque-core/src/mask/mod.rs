//! Coverage masks for keying and cutouts
//!
//! A [`Mask`] is a single-channel buffer with the same dimensions as the
//! image it was built from. Each entry is either `MASK_SET` (255) or
//! `MASK_CLEAR` (0), so a mask can be written straight into an alpha channel.
//!
//! ## Mask Sources
//!
//! - **HSV band**: pixels whose hue, saturation and value all fall inside a
//!   fixed range ([`HsvBand`]), used to find a light background
//! - **Ellipse**: the ellipse inscribed in the image bounds ([`ellipse_mask`]),
//!   used for the round cutout

pub mod apply;
pub mod band;
pub mod ellipse;

pub use apply::{key_out_color, keep_masked, put_alpha};
pub use band::HsvBand;
pub use ellipse::ellipse_mask;

/// Coverage value for a selected pixel.
pub const MASK_SET: u8 = 255;

/// Coverage value for an unselected pixel.
pub const MASK_CLEAR: u8 = 0;

/// Single-channel selection buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl Mask {
    /// Build a mask by evaluating `selected` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut selected: impl FnMut(u32, u32) -> bool) -> Self {
        let mut coverage = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                coverage.push(if selected(x, y) { MASK_SET } else { MASK_CLEAR });
            }
        }
        Self {
            width,
            height,
            coverage,
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw coverage bytes, row-major.
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Whether the pixel at `(x, y)` is selected.
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.coverage[y as usize * self.width as usize + x as usize] != MASK_CLEAR
    }

    /// Swap selected and unselected pixels.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            coverage: self.coverage.iter().map(|&v| MASK_SET - v).collect(),
        }
    }

    /// Number of selected pixels.
    pub fn count_set(&self) -> usize {
        self.coverage.iter().filter(|&&v| v != MASK_CLEAR).count()
    }
}
