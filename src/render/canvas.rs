//! The raster canvas: an RGBA pixel surface with the primitive drawing
//! operations the renderer delegates to. Geometry and ordering decisions live
//! in the renderer; this type only pushes pixels.

use image::{Rgba, RgbaImage, imageops};

use crate::epl::{Color, Rotation};

/// An opaque-white RGBA page the label is composited onto.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a white, fully opaque canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw pixel buffer, for contrast inspection.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the canvas, yielding the final raster.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        let px = color.rgba();
        for (cx, cy) in clipped(x, y, width, height, self.width(), self.height()) {
            self.pixels.put_pixel(cx, cy, px);
        }
    }

    /// Stroke a rectangle outline of the given thickness, clipped to the
    /// canvas. The stroke grows inward from the outline.
    pub fn stroke_rect(
        &mut self,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        thickness: u32,
        color: Color,
    ) {
        let t = thickness.max(1);
        // Top and bottom bands.
        self.fill_rect(x, y, width, t.min(height), color);
        if height > t {
            self.fill_rect(x, y + (height - t) as i64, width, t, color);
        }
        // Left and right bands.
        self.fill_rect(x, y, t.min(width), height, color);
        if width > t {
            self.fill_rect(x + (width - t) as i64, y, t, height, color);
        }
    }

    /// Alpha-composite an image onto the canvas at the given position.
    /// Transparent source pixels leave the canvas unchanged.
    pub fn draw_image(&mut self, x: i64, y: i64, overlay: &RgbaImage) {
        for (ox, oy, src) in overlay.enumerate_pixels() {
            let cx = x + ox as i64;
            let cy = y + oy as i64;
            if cx < 0 || cy < 0 || cx >= self.width() as i64 || cy >= self.height() as i64 {
                continue;
            }
            let dst = self.pixels.get_pixel_mut(cx as u32, cy as u32);
            blend_over(dst, *src);
        }
    }
}

/// Source-over blend of one pixel.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let a = src.0[3] as u32;
    if a == 0 {
        return;
    }
    if a == 255 {
        *dst = src;
        return;
    }
    let inv = 255 - a;
    for i in 0..3 {
        dst.0[i] = ((src.0[i] as u32 * a + dst.0[i] as u32 * inv + 127) / 255) as u8;
    }
    dst.0[3] = (a + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

/// Iterate the canvas pixels covered by a possibly off-canvas rectangle.
fn clipped(
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    canvas_w: u32,
    canvas_h: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = (x + width as i64).clamp(0, canvas_w as i64) as u32;
    let y1 = (y + height as i64).clamp(0, canvas_h as i64) as u32;
    (y0..y1).flat_map(move |cy| (x0..x1).map(move |cx| (cx, cy)))
}

/// Rotate a buffer by a quarter-turn and return it with the offset that maps
/// the directive origin to the rotated buffer's top-left corner.
///
/// Equivalent to a translate-to-origin + rotate transform: the origin pixel
/// stays fixed and the content swings around it. Final placement is
/// `(x + dx, y + dy)`.
pub fn rotated_with_offset(buffer: &RgbaImage, rotation: Rotation) -> (RgbaImage, i64, i64) {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    match rotation {
        Rotation::None => (buffer.clone(), 0, 0),
        Rotation::Quarter => (imageops::rotate90(buffer), -(h - 1), 0),
        Rotation::Half => (imageops::rotate180(buffer), -(w - 1), -(h - 1)),
        Rotation::ThreeQuarter => (imageops::rotate270(buffer), 0, -(w - 1)),
    }
}

/// The page-space footprint of a `w x h` rectangle anchored at `(x, y)` and
/// rotated about that anchor. Returns `(x, y, width, height)`.
pub fn rotated_rect(x: i64, y: i64, width: u32, height: u32, rotation: Rotation) -> (i64, i64, u32, u32) {
    let (w, h) = (width as i64, height as i64);
    match rotation {
        Rotation::None => (x, y, width, height),
        Rotation::Quarter => (x - (h - 1), y, height, width),
        Rotation::Half => (x - (w - 1), y - (h - 1), width, height),
        Rotation::ThreeQuarter => (x, y - (w - 1), height, width),
    }
}
