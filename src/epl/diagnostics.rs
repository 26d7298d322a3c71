//! Structured diagnostics collected during parsing and rendering.
//!
//! Nothing here is fatal: every diagnostic describes a condition the pipeline
//! recovered from. They are returned alongside results as a plain list so
//! callers and tests can inspect them without capturing an output stream.

use serde::Serialize;
use std::fmt;

/// A recoverable condition encountered while interpreting or rendering a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A 2D parameter token with an unrecognized or malformed flag.
    /// Extraction for that directive stopped at this token.
    UnknownFlag { line: usize, token: String },

    /// A field that should have held a fixed literal held something else.
    /// The value was used anyway.
    UnexpectedMarker {
        line: usize,
        expected: String,
        found: String,
    },

    /// A 1D barcode directive named a symbology the renderer cannot produce.
    /// The directive was skipped.
    UnsupportedSymbology { value: String },

    /// The symbol collaborator failed to rasterize a barcode.
    /// The directive was skipped.
    SymbolGeneration { message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownFlag { line, token } => {
                write!(f, "line {}: unknown 2D parameter flag in '{}'", line, token)
            }
            Diagnostic::UnexpectedMarker {
                line,
                expected,
                found,
            } => {
                write!(
                    f,
                    "line {}: expected literal '{}', found '{}'",
                    line, expected, found
                )
            }
            Diagnostic::UnsupportedSymbology { value } => {
                write!(f, "unsupported 1D symbology '{}'", value)
            }
            Diagnostic::SymbolGeneration { message } => {
                write!(f, "symbol generation failed: {}", message)
            }
        }
    }
}
