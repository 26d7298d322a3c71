//! # Pipeline Driver
//!
//! Orchestrates a full label run:
//!
//! ```text
//! base64 blob → decode → parse → phase order → render → page encode → base64
//! ```
//!
//! Thin by design, but the ordering is load-bearing: parsing converts all
//! geometry up front, and rendering happens in the phased order from
//! [`crate::render::phase_order`]. The only failure that aborts a run is a
//! total input decode failure; everything else surfaces as diagnostics on
//! the output.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::epl::{Diagnostic, parse_label_with_scale};
use crate::error::ZebritaError;
use crate::page::{PageEncoder, PngPage};
use crate::render::{BuiltinSymbols, Canvas, LabelRenderer};
use crate::units::DotScale;

/// Label page dimensions in printer dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width_dots: u32,
    pub height_dots: u32,
}

impl PageSize {
    /// A 4" x 6" label at 203 DPI, the common desktop shipping format.
    pub const FOUR_BY_SIX: PageSize = PageSize {
        width_dots: 812,
        height_dots: 1218,
    };

    /// Page dimensions in output pixels under the given conversion.
    pub fn pixels(&self, dots: &DotScale) -> (u32, u32) {
        (
            dots.to_grid(self.width_dots as f32),
            dots.to_grid(self.height_dots as f32),
        )
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::FOUR_BY_SIX
    }
}

/// The result of one pipeline run.
#[derive(Debug, Clone)]
pub struct LabelOutput {
    /// Base64-encoded single-page document.
    pub document: String,
    /// Everything the parser and renderer recovered from.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline with default settings.
pub async fn render_label(input: &str) -> Result<LabelOutput, ZebritaError> {
    render_label_with(input, DotScale::default(), PageSize::default()).await
}

/// Run the full pipeline with explicit conversion settings and page size.
pub async fn render_label_with(
    input: &str,
    dots: DotScale,
    page: PageSize,
) -> Result<LabelOutput, ZebritaError> {
    // Transports wrap base64 freely; ignore whitespace before decoding.
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let decoded = STANDARD
        .decode(compact)
        .map_err(|e| ZebritaError::Decode(e.to_string()))?;
    let source = String::from_utf8_lossy(&decoded);

    let outcome = parse_label_with_scale(&source, dots);
    let mut diagnostics = outcome.diagnostics;

    let (width, height) = page.pixels(&dots);
    let mut canvas = Canvas::new(width.max(1), height.max(1));
    let renderer = LabelRenderer::new(BuiltinSymbols);
    diagnostics.extend(renderer.render(&mut canvas, &outcome.directives).await);

    let document = PngPage.encode(&canvas.into_pixels())?;

    Ok(LabelOutput {
        document: STANDARD.encode(document),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(source: &str) -> String {
        STANDARD.encode(source)
    }

    #[tokio::test]
    async fn test_simple_label() {
        let input = encode("N\nLO10,10,100,50\nA10,80,0,3,1,1,N,\"HELLO\"\nP1\n");
        let output = render_label(&input).await.unwrap();
        assert!(output.diagnostics.is_empty());
        assert!(!output.document.is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_is_fatal() {
        let result = render_label("not//valid--base64!!").await;
        assert!(matches!(result, Err(ZebritaError::Decode(_))));
    }

    #[tokio::test]
    async fn test_whitespace_in_blob_tolerated() {
        let blob = encode("LO1,1,4,4");
        let wrapped = format!("{}\n{}\n", &blob[..4], &blob[4..]);
        assert!(render_label(&wrapped).await.is_ok());
    }

    #[tokio::test]
    async fn test_diagnostics_surface_on_output() {
        let input = encode("b10,20,Q,400,100,s3,\"payload\"\n");
        let output = render_label(&input).await.unwrap();
        assert!(
            output
                .diagnostics
                .iter()
                .any(|d| matches!(d, Diagnostic::UnexpectedMarker { .. }))
        );
    }

    #[test]
    fn test_page_size_default_pixels() {
        // 812 x 1218 dots at the default conversion: 576 x 864 px.
        let (w, h) = PageSize::FOUR_BY_SIX.pixels(&DotScale::default());
        assert_eq!((w, h), (576, 864));
    }
}
