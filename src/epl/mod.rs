//! # EPL Command Interpretation
//!
//! Turns line-oriented EPL-style label source into a typed directive list:
//!
//! ```text
//! source lines → parser → Vec<Directive> + Vec<Diagnostic>
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`directive`] | The drawing directive data model |
//! | [`parser`] | Line classification and positional field extraction |
//! | [`params`] | PDF417 flag/value parameter extraction |
//! | [`diagnostics`] | Structured recoverable-condition reports |

pub mod diagnostics;
pub mod directive;
pub mod params;
pub mod parser;

pub use diagnostics::Diagnostic;
pub use directive::{Color, Directive, Rotation, SymbolParam, Symbology, TextStyle};
pub use params::{PDF417_ROWS, parse_pdf417_params};
pub use parser::{ParseOutcome, parse_label, parse_label_with_scale};
