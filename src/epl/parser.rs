//! # EPL Command Parser
//!
//! Stateless line-by-line classification of label source into drawing
//! directives. Each line is split on commas, the first field is decomposed
//! into mnemonic letters plus an optional embedded x position, and the
//! mnemonic's first character selects the directive class and its positional
//! field layout. Unrecognized or malformed lines are expected (setup commands
//! with no visual effect) and are skipped without comment; recoverable
//! oddities inside recognized commands are reported as [`Diagnostic`]s.
//!
//! All geometry is converted from printer dots to page pixels here, once.
//! The renderer never sees dot-space values.

use super::diagnostics::Diagnostic;
use super::directive::{Color, Directive, Rotation, SymbolParam, Symbology, TextStyle};
use super::params::parse_pdf417_params;
use crate::units::DotScale;

/// Padding applied around reverse-video text, in pixels.
const REVERSE_PADDING: u32 = 2;

/// The literal type marker expected in the `b` command's third field.
const PDF417_MARKER: &str = "P";

/// The parsed form of a label: directives in source order plus everything
/// the parser recovered from along the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub directives: Vec<Directive>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse label source with default dot-to-pixel settings.
pub fn parse_label(source: &str) -> ParseOutcome {
    parse_label_with_scale(source, DotScale::default())
}

/// Parse label source, converting geometry with the given settings.
///
/// Never fails: every malformed line is independently skipped and the whole
/// input is always consumed.
pub fn parse_label_with_scale(source: &str, dots: DotScale) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(directive) =
            line_directive(line, idx + 1, &dots, &mut outcome.diagnostics)
        {
            outcome.directives.push(directive);
        }
    }

    outcome
}

/// Decompose a command token into mnemonic letters and the optional embedded
/// numeric x argument. Returns `None` when the token does not match the
/// letters-then-digits shape.
fn split_command(field: &str) -> Option<(&str, Option<f32>)> {
    let field = field.trim();
    let letters_end = field
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(field.len());
    if letters_end == 0 {
        return None;
    }
    let (mnemonic, rest) = field.split_at(letters_end);
    if rest.is_empty() {
        return Some((mnemonic, None));
    }
    if !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let left = rest.parse::<f32>().ok()?;
    Some((mnemonic, Some(left)))
}

/// Classify one line and build its directive, if any.
fn line_directive(
    line: &str,
    line_no: usize,
    dots: &DotScale,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Directive> {
    let fields: Vec<&str> = line.split(',').collect();
    let (mnemonic, left) = split_command(fields[0])?;

    match mnemonic.chars().next()? {
        'b' => parse_barcode_2d(&fields, left?, line_no, dots, diagnostics),
        'B' => parse_barcode_1d(&fields, left?, dots),
        'A' => parse_text(&fields, left?, dots),
        // LO fills black, LE is the reverse-draw variant; both rasterize as
        // a black box on the white page.
        'L' => parse_box(&fields, left?, dots),
        'G' if mnemonic == "GW" => parse_graphic(&fields, left?, dots),
        'X' => parse_border(&fields, left?, dots),
        _ => None,
    }
}

fn num(fields: &[&str], index: usize) -> Option<f32> {
    fields.get(index)?.trim().parse().ok()
}

/// Strip one pair of surrounding double quotes, if present.
fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.to_string()
}

/// `L` - filled box: `L<x>,<y>,<width>,<height>`.
fn parse_box(fields: &[&str], left: f32, dots: &DotScale) -> Option<Directive> {
    Some(Directive::Box {
        x: dots.to_grid(left),
        y: dots.to_grid(num(fields, 1)?),
        width: dots.to_grid(num(fields, 2)?),
        height: dots.to_grid(num(fields, 3)?),
        fill: Color::BLACK,
    })
}

/// `GW` - graphic write: `GW<x>,<y>,<width bytes>,<height>,...`.
///
/// The width field counts byte columns, 8 dots each. The graphic data itself
/// is not rasterized; the region is blacked out as a placeholder.
fn parse_graphic(fields: &[&str], left: f32, dots: &DotScale) -> Option<Directive> {
    Some(Directive::Box {
        x: dots.to_grid(left),
        y: dots.to_grid(num(fields, 1)?),
        width: dots.to_grid(num(fields, 2)? * 8.0),
        height: dots.to_grid(num(fields, 3)?),
        fill: Color::BLACK,
    })
}

/// `X` - border: `X<x1>,<y1>,<thickness>,<x2>,<y2>`.
///
/// The two corners may arrive in any order; the directive is normalized to a
/// top-left origin with non-negative extents before unit conversion.
fn parse_border(fields: &[&str], left: f32, dots: &DotScale) -> Option<Directive> {
    let y1 = num(fields, 1)?;
    let thickness = num(fields, 2)?;
    let x2 = num(fields, 3)?;
    let y2 = num(fields, 4)?;

    Some(Directive::Border {
        x: dots.to_grid(left.min(x2)),
        y: dots.to_grid(y1.min(y2)),
        width: dots.to_grid((x2 - left).abs()),
        height: dots.to_grid((y2 - y1).abs()),
        thickness: dots.to_grid(thickness),
    })
}

/// `A` - text: `A<x>,<y>,<rotation>,<font>,<h mult>,<v mult>,<reverse>,"text"`.
///
/// The font field selects glyph height, weight, and a per-size scaler from a
/// fixed table. Anything after the seventh comma is display text; commas
/// inside it are restored on rejoin.
fn parse_text(fields: &[&str], left: f32, dots: &DotScale) -> Option<Directive> {
    let y = num(fields, 1)?;
    let rotation = Rotation::from_field(fields.get(2)?);

    let (font_size, bold, size_scaler) = match fields.get(3)?.trim() {
        "1" => (16, false, 1.0),
        "2" => (20, false, 1.0),
        "3" => (23, false, 1.0),
        "4" => (28, true, 0.93),
        "5" => (58, true, 1.0),
        _ => (96, false, 1.0),
    };
    let h_mult: f32 = num(fields, 4)?;
    let v_mult: f32 = num(fields, 5)?;
    let reverse = fields.get(6)?.trim() == "R";

    if fields.len() < 8 {
        return None;
    }
    let text = strip_quotes(&fields[7..].join(", "));

    let style = if reverse {
        TextStyle {
            font_size,
            bold,
            color: Color::WHITE,
            background: Some(Color::BLACK),
            padding: REVERSE_PADDING,
            scale_x: h_mult * size_scaler,
            scale_y: v_mult * size_scaler,
        }
    } else {
        TextStyle {
            font_size,
            bold,
            color: Color::BLACK,
            background: None,
            padding: 0,
            scale_x: h_mult * size_scaler,
            scale_y: v_mult * size_scaler,
        }
    };

    Some(Directive::Text {
        x: dots.to_grid(left),
        y: dots.to_grid(y),
        text,
        rotation,
        style,
    })
}

/// `B` - 1D barcode:
/// `B<x>,<y>,<rotation>,<symbology>,<narrow>,<wide>,<height>,<readable>,"value"`.
///
/// Only symbology `1` (CODE128) is recognized; any other value still yields a
/// directive so the renderer owns the unsupported-format decision. Module
/// dimensions convert through the unscaled ratio: they are multipliers, not
/// physical distances.
fn parse_barcode_1d(fields: &[&str], left: f32, dots: &DotScale) -> Option<Directive> {
    if fields.len() < 9 {
        return None;
    }
    let y = num(fields, 1)?;
    let rotation = if fields.get(2)?.trim() == "3" {
        Rotation::ThreeQuarter
    } else {
        Rotation::None
    };
    let symbology = match fields.get(3)?.trim() {
        "1" => Symbology::Code128,
        other => Symbology::Unknown(other.to_string()),
    };
    let bars = dots.unscaled();

    Some(Directive::Barcode1D {
        x: dots.to_grid(left),
        y: dots.to_grid(y),
        rotation,
        value: strip_quotes(fields.last()?),
        symbology,
        module_width: bars.to_grid(num(fields, 4)?).max(1),
        height: bars.to_grid(num(fields, 6)?).max(1),
        show_text: fields.get(7)?.trim() == "B",
    })
}

/// `b` - 2D barcode: `b<x>,<y>,P,...,<flag tokens>,"value"`.
///
/// The third field must be the PDF417 type marker; a mismatch is reported
/// but the line is still interpreted. Flag tokens between the fixed fields
/// and the payload go through the structured-parameter extractor, and the
/// orientation flag folds into the directive's rotation.
fn parse_barcode_2d(
    fields: &[&str],
    left: f32,
    line_no: usize,
    dots: &DotScale,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Directive> {
    if fields.len() < 4 {
        return None;
    }
    let y = num(fields, 1)?;

    let marker = fields.get(2)?.trim();
    if marker != PDF417_MARKER {
        diagnostics.push(Diagnostic::UnexpectedMarker {
            line: line_no,
            expected: PDF417_MARKER.to_string(),
            found: marker.to_string(),
        });
    }

    let value = strip_quotes(fields.last()?);
    let param_tokens = if fields.len() > 6 {
        &fields[5..fields.len() - 1]
    } else {
        &[][..]
    };
    let mut params = parse_pdf417_params(param_tokens, line_no, diagnostics);

    // Module scales are multipliers: DPI ratio applies, cosmetic scale does not.
    let bars = dots.unscaled();
    for key in [SymbolParam::ScaleX, SymbolParam::ScaleY] {
        if let Some(v) = params.get_mut(&key) {
            *v = bars.to_pixels(*v as f32).max(1);
        }
    }

    let rotation = match params.get(&SymbolParam::Orientation) {
        Some(1) => Rotation::Quarter,
        Some(2) => Rotation::Half,
        Some(3) => Rotation::ThreeQuarter,
        _ => Rotation::None,
    };

    Some(Directive::Barcode2D {
        x: dots.to_grid(left),
        y: dots.to_grid(y),
        rotation,
        value,
        params,
    })
}
