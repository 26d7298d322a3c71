//! Barcode symbol generation.
//!
//! The renderer consumes symbols through [`SymbolGenerator`]: given a value
//! and configuration, produce a pixel buffer or fail with a symbol error.
//! 2D generation is the one potentially suspending operation in the whole
//! pipeline, so only that method is async. [`BuiltinSymbols`] implements the
//! trait with the `barcoders` (CODE128) and `pdf417` crates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use barcoders::sym::code128::Code128;
use image::{Rgba, RgbaImage};
use pdf417::{END_PATTERN, PDF417, PDF417Encoder, START_PATTERN};

use crate::epl::SymbolParam;
use crate::error::ZebritaError;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// External collaborator that rasterizes barcode values into pixel buffers.
#[async_trait]
pub trait SymbolGenerator: Send + Sync {
    /// Rasterize a CODE128 symbol. `module_width` is the narrow-bar width in
    /// pixels, `height` the bar height in pixels.
    fn code128(&self, value: &str, module_width: u32, height: u32)
    -> Result<RgbaImage, ZebritaError>;

    /// Rasterize a PDF417 symbol from extracted named parameters.
    async fn pdf417(
        &self,
        value: &str,
        params: &BTreeMap<SymbolParam, i32>,
    ) -> Result<RgbaImage, ZebritaError>;
}

/// Symbol generation backed by the `barcoders` and `pdf417` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSymbols;

#[async_trait]
impl SymbolGenerator for BuiltinSymbols {
    fn code128(
        &self,
        value: &str,
        module_width: u32,
        height: u32,
    ) -> Result<RgbaImage, ZebritaError> {
        // Character set B covers the full printable ASCII range.
        let barcode = Code128::new(format!("\u{0181}{}", value))
            .map_err(|e| ZebritaError::Symbol(format!("CODE128 '{}': {}", value, e)))?;
        let bars = barcode.encode();

        let module_width = module_width.max(1);
        let height = height.max(1);
        let width = bars.len() as u32 * module_width;
        let mut image = RgbaImage::from_pixel(width.max(1), height, WHITE);

        for (i, bar) in bars.iter().enumerate() {
            if *bar == 1 {
                for dx in 0..module_width {
                    let x = i as u32 * module_width + dx;
                    for y in 0..height {
                        image.put_pixel(x, y, BLACK);
                    }
                }
            }
        }

        Ok(image)
    }

    async fn pdf417(
        &self,
        value: &str,
        params: &BTreeMap<SymbolParam, i32>,
    ) -> Result<RgbaImage, ZebritaError> {
        let rows = params
            .get(&SymbolParam::Rows)
            .copied()
            .unwrap_or(crate::epl::PDF417_ROWS)
            .clamp(3, 90) as u8;
        let cols = params
            .get(&SymbolParam::Columns)
            .copied()
            .unwrap_or(4)
            .clamp(1, 30) as u8;
        let scale_x = params
            .get(&SymbolParam::ScaleX)
            .copied()
            .unwrap_or(2)
            .max(1) as u32;
        let scale_y = params
            .get(&SymbolParam::ScaleY)
            .copied()
            .unwrap_or((scale_x * 3) as i32)
            .max(1) as u32;
        let truncated = params
            .get(&SymbolParam::Truncate)
            .is_some_and(|t| *t != 0);

        let mut codewords = vec![0u16; rows as usize * cols as usize];
        // Even text compaction cannot fit more than two characters per
        // codeword; reject hopeless payloads before encoding.
        if value.len() > codewords.len() * 2 {
            return Err(ZebritaError::Symbol(format!(
                "PDF417 payload of {} bytes exceeds {} rows x {} columns",
                value.len(),
                rows,
                cols
            )));
        }
        let (level, filled) = PDF417Encoder::new(&mut codewords, false)
            .append_ascii(value)
            .fit_seal()
            .ok_or_else(|| {
                ZebritaError::Symbol(format!(
                    "PDF417 payload does not fit {} rows x {} columns",
                    rows, cols
                ))
            })?;

        // Modules per row: start + left indicator + data + right indicator + end.
        let width = START_PATTERN.size() as usize
            + 17
            + cols as usize * 17
            + 17
            + END_PATTERN.size() as usize;
        let height = rows as usize;

        let barcode = PDF417::new(filled, rows, cols, level);
        let mut modules = vec![false; width * height];
        for (i, bit) in barcode.bits().enumerate() {
            if i < modules.len() {
                modules[i] = bit;
            }
        }

        // Truncated PDF417 omits the right row indicator and stop pattern.
        let drawn_width = if truncated {
            width - 17 - END_PATTERN.size() as usize
        } else {
            width
        };

        let mut image = RgbaImage::from_pixel(
            drawn_width as u32 * scale_x,
            height as u32 * scale_y,
            WHITE,
        );
        for row in 0..height {
            for col in 0..drawn_width {
                if !modules[row * width + col] {
                    continue;
                }
                for sy in 0..scale_y {
                    for sx in 0..scale_x {
                        image.put_pixel(
                            col as u32 * scale_x + sx,
                            row as u32 * scale_y + sy,
                            BLACK,
                        );
                    }
                }
            }
        }

        Ok(image)
    }
}
