//! Text rasterization with the Spleen bitmap font family.
//!
//! Glyphs come from the Spleen 12x24 face, nearest-neighbor scaled to the
//! directive's pixel height (small sizes downscale, large sizes upscale),
//! double-struck for bold, and stretched by the per-axis multipliers. Output
//! is a transparent RGBA buffer holding only the glyph pixels, ready for
//! contrast correction and compositing.

use image::{Rgba, RgbaImage};
use spleen_font::{FONT_12X24, PSF2Font};

use crate::epl::TextStyle;

/// Upper bound on any text raster dimension, in pixels.
///
/// Scale multipliers arrive from untrusted label source; extents clamp here
/// so a degenerate command cannot overflow the extent arithmetic or demand
/// an absurd glyph buffer.
const MAX_TEXT_EXTENT: u32 = 8192;

/// Per-glyph cell dimensions in pixels for a style.
fn cell_size(style: &TextStyle) -> (u32, u32) {
    // Spleen has a 1:2 aspect.
    let width = (style.font_size as f32 * 0.5 * style.scale_x).round().max(1.0);
    let height = (style.font_size as f32 * style.scale_y).round().max(1.0);
    // Float-to-int casts saturate, so oversized multipliers land on the clamp.
    (
        (width as u32).min(MAX_TEXT_EXTENT),
        (height as u32).min(MAX_TEXT_EXTENT),
    )
}

/// Measured text extent: `(width, line_height)` in pixels.
///
/// Used for reverse-video background sizing; must agree with [`rasterize`].
/// Both dimensions are clamped to a page-bounded maximum.
pub fn measure(text: &str, style: &TextStyle) -> (u32, u32) {
    let (cell_w, cell_h) = cell_size(style);
    let chars = text.chars().count() as u32;
    (chars.saturating_mul(cell_w).min(MAX_TEXT_EXTENT), cell_h)
}

/// Rasterize a single line of text to a transparent RGBA buffer.
pub fn rasterize(text: &str, style: &TextStyle) -> RgbaImage {
    let (cell_w, cell_h) = cell_size(style);
    let (width, height) = measure(text, style);
    let mut buffer = RgbaImage::new(width.max(1), height.max(1));
    let color = Rgba([style.color.r, style.color.g, style.color.b, 255]);

    for (i, ch) in text.chars().enumerate() {
        let origin_x = (i as u64).saturating_mul(cell_w as u64);
        if origin_x >= buffer.width() as u64 {
            break;
        }
        let origin_x = origin_x as u32;
        let (bitmap, base_w, base_h) = base_glyph(ch);

        for dy in 0..cell_h {
            for dx in 0..cell_w {
                // Clamped extents can cut the last cell short.
                if origin_x + dx >= buffer.width() {
                    break;
                }
                let sx = (dx as usize * base_w) / cell_w as usize;
                let sy = (dy as usize * base_h) / cell_h as usize;
                let mut on = bitmap[sy * base_w + sx] != 0;
                // Bold: double-strike one pixel to the left.
                if !on && style.bold && dx > 0 {
                    let sx2 = ((dx - 1) as usize * base_w) / cell_w as usize;
                    on = bitmap[sy * base_w + sx2] != 0;
                }
                if on {
                    buffer.put_pixel(origin_x + dx, dy, color);
                }
            }
        }
    }

    buffer
}

/// Fetch a glyph bitmap (0 = off, 1 = on) at the face's native 12x24 size.
///
/// Characters missing from Spleen fall back to a box outline.
fn base_glyph(ch: char) -> (Vec<u8>, usize, usize) {
    const BASE_W: usize = 12;
    const BASE_H: usize = 24;

    let mut bitmap = vec![0u8; BASE_W * BASE_H];
    let mut face = PSF2Font::new(FONT_12X24).unwrap();
    let utf8 = ch.to_string();

    if let Some(glyph) = face.glyph_for_utf8(utf8.as_bytes()) {
        for (y, row) in glyph.enumerate() {
            for (x, on) in row.enumerate() {
                if y < BASE_H && x < BASE_W && on {
                    bitmap[y * BASE_W + x] = 1;
                }
            }
        }
    } else {
        draw_box(&mut bitmap, BASE_W, BASE_H);
    }

    (bitmap, BASE_W, BASE_H)
}

/// Box outline for characters the font cannot draw.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
