//! Anchored text overlay.
//!
//! ## Algorithm
//! 1. Resolve the font and every glyph (fails before any pixel is touched)
//! 2. Render the line at `round(size / 8)` magnification and measure its ink box
//! 3. Place the ink box according to the anchor and the configured margins
//! 4. Composite the fill color onto a working copy, clipping at the edges

mod font;
mod layout;

pub use font::{BitmapFont, Glyph, DEFAULT_FONT, GLYPH_SIZE};
pub use layout::{place, scale_for_size, InkBox, Margins, TextAnchor, TextBlock, MAX_TEXT_SIZE};

use crate::colorspace::displayable;
use crate::config::TextConfig;
use crate::error::{EditError, EditResult};
use crate::raster::RasterImage;
use crate::Color;

/// Draw one line of text onto a copy of `image`.
///
/// # Arguments
///
/// * `image` - Source image; HSV and Lab are drawn on as RGB
/// * `text` - The line to draw
/// * `anchor` - Where the ink box goes
/// * `size` - Font size in pixels (height of a glyph cell)
/// * `color` - Fill color; its alpha blends over the image
/// * `config` - Font name and vertical margins
///
/// # Errors
///
/// Returns `EditError::MissingResource` if the font or a glyph is not
/// available and `EditError::InvalidParameter` for a size outside
/// `1..=MAX_TEXT_SIZE`.
pub fn overlay_text(
    image: &RasterImage,
    text: &str,
    anchor: TextAnchor,
    size: u32,
    color: Color,
    config: &TextConfig,
) -> EditResult<RasterImage> {
    if size == 0 || size > MAX_TEXT_SIZE {
        return Err(EditError::invalid(
            "size",
            format!("font size {size} is outside [1, {MAX_TEXT_SIZE}]"),
        ));
    }
    let font = BitmapFont::resolve(&config.font)?;
    let glyphs = font.glyphs(text)?;

    let mut canvas = displayable(image).into_owned();
    let block = TextBlock::render(&glyphs, scale_for_size(size))?;
    let Some(ink) = block.ink() else {
        return Ok(canvas);
    };

    let (x, y) = place(
        anchor,
        (canvas.width(), canvas.height()),
        (ink.width(), ink.height()),
        config.margins(),
    );
    log::debug!(
        "Text {:?}: {}x{} ink at ({x}, {y}) on {}x{}",
        text,
        ink.width(),
        ink.height(),
        canvas.width(),
        canvas.height()
    );

    composite(&mut canvas, &block, ink, (x, y), color);
    Ok(canvas)
}

/// Paint the inked cells of `block` with `color`, ink box origin at `origin`.
fn composite(
    canvas: &mut RasterImage,
    block: &TextBlock,
    ink: InkBox,
    origin: (i64, i64),
    color: Color,
) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let channels = canvas.channels();
    let has_alpha = canvas.has_alpha();
    let paint = color.channels_for(canvas.color_space());
    let alpha = color.a as u32;

    // Only the part of the ink box that lands on the canvas.
    let x_start = origin.0.max(0);
    let y_start = origin.1.max(0);
    let x_end = (origin.0 + ink.width() as i64).min(width);
    let y_end = (origin.1 + ink.height() as i64).min(height);

    let stride = width as usize * channels;
    let pixels = canvas.pixels_mut();
    for y in y_start..y_end {
        let by = (y - origin.1) as u32 + ink.y0;
        for x in x_start..x_end {
            let bx = (x - origin.0) as u32 + ink.x0;
            if !block.is_set(bx, by) {
                continue;
            }
            let idx = y as usize * stride + x as usize * channels;
            let px = &mut pixels[idx..idx + channels];
            let color_channels = if has_alpha { channels - 1 } else { channels };
            for c in 0..color_channels {
                px[c] = blend(paint[c], px[c], alpha);
            }
            if has_alpha {
                let dst = px[channels - 1] as u32;
                px[channels - 1] = (alpha + (dst * (255 - alpha) + 127) / 255) as u8;
            }
        }
    }
}

/// `src` over `dst` with 8-bit coverage.
#[inline]
fn blend(src: u8, dst: u8, alpha: u32) -> u8 {
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}
