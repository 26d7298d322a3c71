//! # Compositing Renderer
//!
//! Executes a directive list against the raster canvas:
//!
//! ```text
//! directives → phase_order → [boxes] [borders] [full list] → canvas pixels
//! ```
//!
//! Pixel-writing phases run strictly before the full pass because the text
//! contrast rule reads the canvas's current contents. Within a phase,
//! directives apply in list order (last write wins). PDF417 generation is the
//! only suspending step and is awaited per directive, so directives are never
//! rendered out of order.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | RGBA surface and rotation placement |
//! | [`phases`] | Z-order resolution |
//! | [`text`] | Spleen bitmap text rasterization |
//! | [`symbols`] | CODE128 / PDF417 symbol generation |

pub mod canvas;
pub mod phases;
pub mod symbols;
pub mod text;

pub use canvas::Canvas;
pub use phases::phase_order;
pub use symbols::{BuiltinSymbols, SymbolGenerator};

use image::{Rgba, RgbaImage};

use crate::epl::{Color, Diagnostic, Directive, Rotation, Symbology, TextStyle};
use canvas::{rotated_rect, rotated_with_offset};

/// Renders directives onto a [`Canvas`] through a symbol collaborator.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer<S = BuiltinSymbols> {
    symbols: S,
}

impl<S: SymbolGenerator> LabelRenderer<S> {
    pub fn new(symbols: S) -> Self {
        Self { symbols }
    }

    /// Render a directive list in phased z-order.
    ///
    /// Symbol-generation failures are recoverable per directive: the
    /// directive is skipped, a diagnostic is recorded, and rendering
    /// continues.
    pub async fn render(&self, canvas: &mut Canvas, directives: &[Directive]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for directive in phase_order(directives) {
            match directive {
                Directive::Box {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    canvas.fill_rect(*x as i64, *y as i64, *width, *height, *fill);
                }

                Directive::Border {
                    x,
                    y,
                    width,
                    height,
                    thickness,
                } => {
                    canvas.stroke_rect(
                        *x as i64,
                        *y as i64,
                        *width,
                        *height,
                        *thickness,
                        Color::BLACK,
                    );
                }

                Directive::Text {
                    x,
                    y,
                    text,
                    rotation,
                    style,
                } => {
                    composite_text(canvas, *x, *y, text, *rotation, style);
                }

                Directive::Barcode1D {
                    x,
                    y,
                    rotation,
                    value,
                    symbology,
                    module_width,
                    height,
                    show_text,
                } => {
                    if let Symbology::Unknown(raw) = symbology {
                        diagnostics.push(Diagnostic::UnsupportedSymbology { value: raw.clone() });
                        continue;
                    }
                    match self.symbols.code128(value, *module_width, *height) {
                        Ok(bars) => {
                            let symbol = if *show_text {
                                with_readable_text(&bars, value)
                            } else {
                                bars
                            };
                            draw_rotated(canvas, *x, *y, &symbol, *rotation);
                        }
                        Err(e) => diagnostics.push(Diagnostic::SymbolGeneration {
                            message: e.to_string(),
                        }),
                    }
                }

                Directive::Barcode2D {
                    x,
                    y,
                    rotation,
                    value,
                    params,
                } => match self.symbols.pdf417(value, params).await {
                    Ok(symbol) => draw_rotated(canvas, *x, *y, &symbol, *rotation),
                    Err(e) => diagnostics.push(Diagnostic::SymbolGeneration {
                        message: e.to_string(),
                    }),
                },
            }
        }

        diagnostics
    }
}

/// Rotate a symbol buffer about its directive origin and composite it.
fn draw_rotated(canvas: &mut Canvas, x: u32, y: u32, buffer: &RgbaImage, rotation: Rotation) {
    let (rotated, dx, dy) = rotated_with_offset(buffer, rotation);
    canvas.draw_image(x as i64 + dx, y as i64 + dy, &rotated);
}

/// Stack the human-readable payload under a 1D symbol.
fn with_readable_text(bars: &RgbaImage, value: &str) -> RgbaImage {
    let label_style = TextStyle {
        font_size: 16,
        bold: false,
        color: Color::BLACK,
        background: None,
        padding: 0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    let label = text::rasterize(value, &label_style);

    let width = bars.width().max(label.width());
    let height = bars.height() + label.height();
    let mut combined = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for (sx, sy, p) in bars.enumerate_pixels() {
        combined.put_pixel(sx, sy, *p);
    }
    // Centered under the bars.
    let offset = (width - label.width()) / 2;
    for (sx, sy, p) in label.enumerate_pixels() {
        if p.0[3] != 0 {
            combined.put_pixel(sx + offset, bars.height() + sy, *p);
        }
    }

    combined
}

/// Composite a text directive with the foreground/background contrast rule.
///
/// The glyphs are rendered into a canvas-sized transparent overlay at the
/// target position and rotation, the overlay is corrected against the
/// canvas's current pixels, and the result is alpha-composited back. The
/// optional reverse-video background lands on the canvas first, so the
/// correction sees it like any other filled region.
fn composite_text(
    canvas: &mut Canvas,
    x: u32,
    y: u32,
    content: &str,
    rotation: Rotation,
    style: &TextStyle,
) {
    let (text_w, line_h) = text::measure(content, style);

    if let Some(bg) = style.background {
        let bg_w = text_w + 2 * style.padding;
        let bg_h = line_h + 2 * style.padding;
        let (bx, by, bw, bh) = rotated_rect(x as i64, y as i64, bg_w, bg_h, rotation);
        canvas.fill_rect(bx, by, bw, bh, bg);
    }

    let glyphs = text::rasterize(content, style);
    let (rotated, dx, dy) = rotated_with_offset(&glyphs, rotation);

    let mut overlay = RgbaImage::new(canvas.width(), canvas.height());
    stamp(&mut overlay, x as i64 + dx, y as i64 + dy, &rotated);

    correct_overlay(canvas.pixels(), &mut overlay);
    canvas.draw_image(0, 0, &overlay);
}

/// Copy non-transparent source pixels into an overlay buffer, clipped.
fn stamp(overlay: &mut RgbaImage, x: i64, y: i64, src: &RgbaImage) {
    let (w, h) = (overlay.width() as i64, overlay.height() as i64);
    for (sx, sy, p) in src.enumerate_pixels() {
        if p.0[3] == 0 {
            continue;
        }
        let cx = x + sx as i64;
        let cy = y + sy as i64;
        if cx >= 0 && cy >= 0 && cx < w && cy < h {
            overlay.put_pixel(cx as u32, cy as u32, *p);
        }
    }
}

/// The contrast correction: wherever the destination pixel is pure opaque
/// black, force the overlay pixel's color channels to white, leaving alpha
/// untouched. Text stays legible over filled black regions without knowing
/// in advance whether its destination is dark.
///
/// Both buffers must share dimensions.
pub fn correct_overlay(dest: &RgbaImage, overlay: &mut RgbaImage) {
    debug_assert_eq!(dest.dimensions(), overlay.dimensions());
    for (x, y, pixel) in overlay.enumerate_pixels_mut() {
        if dest.get_pixel(x, y).0 == [0, 0, 0, 255] {
            pixel.0[0] = 255;
            pixel.0[1] = 255;
            pixel.0[2] = 255;
        }
    }
}
