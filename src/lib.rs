//! # Zebrita - EPL Label Rasterizer
//!
//! Zebrita interprets labels written in a line-oriented EPL-style printer
//! command language and rasterizes them into a single-page PNG document.
//! It provides:
//!
//! - **Command interpretation**: EPL mnemonics parsed into typed drawing directives
//! - **Unit conversion**: printer dots to page pixels, applied once at parse time
//! - **Phased rendering**: fills before strokes before the full pass, so text
//!   contrast correction always sees its final backdrop
//! - **Symbol generation**: CODE128 and PDF417 rasterization
//!
//! ## Quick Start
//!
//! ```no_run
//! use zebrita::epl::parse_label;
//! use zebrita::render::{BuiltinSymbols, Canvas, LabelRenderer};
//! use zebrita::page::{PageEncoder, PngPage};
//!
//! # async fn run() -> Result<(), zebrita::ZebritaError> {
//! let outcome = parse_label("LO10,10,100,50\nA10,80,0,3,1,1,N,\"HELLO\"\n");
//!
//! let mut canvas = Canvas::new(576, 864);
//! let renderer = LabelRenderer::new(BuiltinSymbols);
//! let diagnostics = renderer.render(&mut canvas, &outcome.directives).await;
//!
//! for diagnostic in outcome.diagnostics.iter().chain(&diagnostics) {
//!     eprintln!("{}", diagnostic);
//! }
//!
//! let png = PngPage.encode(&canvas.into_pixels())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`epl`] | Command parser and directive data model |
//! | [`render`] | Canvas, z-order phases, compositing, symbols |
//! | [`units`] | Dot-to-pixel conversion |
//! | [`page`] | Single-page document encoding |
//! | [`pipeline`] | End-to-end base64 label runs |
//! | [`error`] | Error types |

pub mod epl;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod units;

// Re-exports for convenience
pub use epl::{Diagnostic, Directive, parse_label};
pub use error::ZebritaError;
pub use pipeline::{LabelOutput, render_label};
pub use units::DotScale;
