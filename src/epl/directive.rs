//! # Drawing Directives
//!
//! The typed output of the command parser. Each directive is one visual
//! primitive with absolute pixel-space geometry, converted from printer dots
//! exactly once at parse time. Directives are immutable after creation: the
//! phase resolver reorders by borrowing, never by editing, and everything is
//! discarded after the single render pass.

use serde::Serialize;
use std::collections::BTreeMap;

/// An opaque RGB color on the label page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// As an opaque RGBA pixel.
    pub fn rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// Axis-aligned rotation about a directive's origin.
///
/// The command language only encodes quarter turns; every encoded value
/// (including -90) normalizes into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    /// 90 degrees clockwise.
    Quarter,
    /// 180 degrees.
    Half,
    /// 270 degrees clockwise (equivalently -90).
    ThreeQuarter,
}

impl Rotation {
    /// Map an EPL rotation field value: 1 -> 90, 2 -> 180, 3 -> 270,
    /// anything else -> 0.
    pub fn from_field(field: &str) -> Rotation {
        match field.trim() {
            "1" => Rotation::Quarter,
            "2" => Rotation::Half,
            "3" => Rotation::ThreeQuarter,
            _ => Rotation::None,
        }
    }
}

/// 1D barcode symbology selected by the `B` command.
///
/// Only CODE128 is recognized. Every other encoded value still produces a
/// directive carrying the raw field, deferring the unsupported-format
/// decision to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    Code128,
    Unknown(String),
}

/// Named PDF417 configuration keys, extracted from one-letter flags by the
/// structured-parameter extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolParam {
    SecurityLevel,
    Position,
    ScaleX,
    ScaleY,
    Rows,
    Columns,
    Truncate,
    Orientation,
}

impl SymbolParam {
    /// Resolve a one-letter flag to its named key.
    pub fn from_flag(flag: char) -> Option<SymbolParam> {
        match flag {
            's' => Some(SymbolParam::SecurityLevel),
            'p' => Some(SymbolParam::Position),
            'x' => Some(SymbolParam::ScaleX),
            'y' => Some(SymbolParam::ScaleY),
            'r' => Some(SymbolParam::Rows),
            'c' => Some(SymbolParam::Columns),
            't' => Some(SymbolParam::Truncate),
            'o' => Some(SymbolParam::Orientation),
            _ => None,
        }
    }
}

/// Styling for a text directive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// Glyph height in pixels.
    pub font_size: u32,
    pub bold: bool,
    pub color: Color,
    /// Reverse-video background, drawn behind the glyphs.
    pub background: Option<Color>,
    /// Padding around the background rectangle, in pixels.
    pub padding: u32,
    /// Horizontal glyph multiplier (already includes the per-size scaler).
    pub scale_x: f32,
    /// Vertical glyph multiplier (already includes the per-size scaler).
    pub scale_y: f32,
}

/// One parsed, typed visual instruction.
///
/// All coordinates and dimensions are absolute, non-negative pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    /// Filled rectangle.
    Box {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        fill: Color,
    },
    /// Stroked rectangle. `(x, y)` is the top-left corner regardless of
    /// which corner the source command gave first.
    Border {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        thickness: u32,
    },
    Text {
        x: u32,
        y: u32,
        text: String,
        rotation: Rotation,
        style: TextStyle,
    },
    Barcode1D {
        x: u32,
        y: u32,
        rotation: Rotation,
        value: String,
        symbology: Symbology,
        /// Width of a single narrow module, in pixels.
        module_width: u32,
        height: u32,
        /// Render the payload as human-readable text under the bars.
        show_text: bool,
    },
    Barcode2D {
        x: u32,
        y: u32,
        rotation: Rotation,
        value: String,
        params: BTreeMap<SymbolParam, i32>,
    },
}
