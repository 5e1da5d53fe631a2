//! Measuring and placing a line of text.
//!
//! Text is laid out as one line of fixed-width 8x8 cells scaled by an integer
//! factor. Placement works on the tight ink box: blank rows and columns
//! around the glyphs do not count towards the measured size.

use super::font::{glyph_bit, Glyph, GLYPH_SIZE};
use crate::error::{EditError, EditResult};

/// Where the text block is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Horizontally centered, top margin from the top edge.
    TopCenter,
    /// Centered on both axes.
    MiddleCenter,
    /// Horizontally centered, bottom margin from the bottom edge.
    BottomCenter,
    /// Top-left corner of the ink box at `(x, y)`.
    Explicit(i64, i64),
}

impl TextAnchor {
    /// Parse a position: `top`, `middle`, `bottom` (or `arriba`, `centro`,
    /// `abajo`), or explicit coordinates `"x,y"`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidPosition` for anything else, including a
    /// missing comma or non-integer coordinates.
    pub fn parse(input: &str) -> EditResult<Self> {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "top" | "arriba" => return Ok(TextAnchor::TopCenter),
            "middle" | "center" | "centro" => return Ok(TextAnchor::MiddleCenter),
            "bottom" | "abajo" => return Ok(TextAnchor::BottomCenter),
            _ => {}
        }

        let invalid = || EditError::InvalidPosition(input.to_string());
        let (x, y) = trimmed.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i64>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok(TextAnchor::Explicit(x, y))
    }
}

/// Largest font size, in pixels, that text overlay accepts.
pub const MAX_TEXT_SIZE: u32 = 100;

/// Integer magnification for a font size in pixels, at least 1.
pub fn scale_for_size(size: u32) -> u32 {
    ((size as f64 / GLYPH_SIZE as f64).round() as u32).max(1)
}

/// A laid-out line of text.
///
/// Coverage is read straight from the glyph table, so a block costs one
/// [`Glyph`] per character however large it is drawn.
#[derive(Debug, Clone)]
pub struct TextBlock {
    glyphs: Vec<Glyph>,
    scale: u32,
    cell: u32,
    width: u32,
    height: u32,
    ink: Option<InkBox>,
}

/// Tight bounding box of set pixels, `x1`/`y1` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl InkBox {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

impl TextBlock {
    /// Lay out glyphs side by side, each cell `8 * scale` pixels square.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for a zero scale or a line
    /// whose width does not fit in `u32`.
    pub fn render(glyphs: &[Glyph], scale: u32) -> EditResult<Self> {
        let too_wide = || {
            EditError::invalid(
                "text",
                format!("{} glyphs at scale {scale} overflow the line width", glyphs.len()),
            )
        };
        if scale == 0 {
            return Err(EditError::invalid("size", "scale must be at least 1"));
        }
        let cell = GLYPH_SIZE.checked_mul(scale).ok_or_else(too_wide)?;
        let count = u32::try_from(glyphs.len()).map_err(|_| too_wide())?;
        let width = cell.checked_mul(count).ok_or_else(too_wide)?;

        let mut ink: Option<InkBox> = None;
        for (index, glyph) in glyphs.iter().enumerate() {
            let origin_x = index as u32 * cell;
            for row in 0..GLYPH_SIZE {
                for col in 0..GLYPH_SIZE {
                    if !glyph_bit(glyph, col, row) {
                        continue;
                    }
                    let (bx, by) = (origin_x + col * scale, row * scale);
                    let cell_box = InkBox {
                        x0: bx,
                        y0: by,
                        x1: bx + scale,
                        y1: by + scale,
                    };
                    ink = Some(match ink {
                        None => cell_box,
                        Some(b) => InkBox {
                            x0: b.x0.min(cell_box.x0),
                            y0: b.y0.min(cell_box.y0),
                            x1: b.x1.max(cell_box.x1),
                            y1: b.y1.max(cell_box.y1),
                        },
                    });
                }
            }
        }

        Ok(Self {
            glyphs: glyphs.to_vec(),
            scale,
            cell,
            width,
            height: cell,
            ink,
        })
    }

    /// Tight ink box, `None` for text without visible pixels.
    pub fn ink(&self) -> Option<InkBox> {
        self.ink
    }

    /// Measured `(width, height)` of the ink, zero for blank text.
    pub fn measure(&self) -> (u32, u32) {
        self.ink.map(|b| (b.width(), b.height())).unwrap_or((0, 0))
    }

    /// Whether the block pixel at `(x, y)` is inked.
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let glyph = &self.glyphs[(x / self.cell) as usize];
        glyph_bit(glyph, (x % self.cell) / self.scale, y / self.scale)
    }
}

/// Vertical margins for the centered anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
}

/// Top-left corner of the ink box for `anchor`.
///
/// Centering uses floor division, so text wider than the image starts at a
/// negative x and is clipped evenly on both sides.
pub fn place(
    anchor: TextAnchor,
    image_size: (u32, u32),
    text_size: (u32, u32),
    margins: Margins,
) -> (i64, i64) {
    let (img_w, img_h) = (image_size.0 as i64, image_size.1 as i64);
    let (text_w, text_h) = (text_size.0 as i64, text_size.1 as i64);
    let centered_x = (img_w - text_w).div_euclid(2);

    match anchor {
        TextAnchor::TopCenter => (centered_x, margins.top as i64),
        TextAnchor::MiddleCenter => (centered_x, (img_h - text_h).div_euclid(2)),
        TextAnchor::BottomCenter => (centered_x, img_h - margins.bottom as i64 - text_h),
        TextAnchor::Explicit(x, y) => (x, y),
    }
}
