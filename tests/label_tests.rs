//! # Label Pipeline Tests
//!
//! End-to-end tests through the public pipeline: base64 EPL source in,
//! base64 PNG document out. Pixel assertions decode the produced PNG and
//! inspect the raster directly, so they exercise parsing, unit conversion,
//! phased z-ordering, and the contrast compositing rule together.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbaImage;
use pretty_assertions::assert_eq;

use zebrita::epl::{Color, Diagnostic, TextStyle, parse_label_with_scale};
use zebrita::pipeline::{PageSize, render_label, render_label_with};
use zebrita::render::text;
use zebrita::units::DotScale;

/// Identity dot conversion: EPL coordinates land on pixels unchanged.
fn unit_scale() -> DotScale {
    DotScale {
        source_dpi: 96.0,
        target_dpi: 96.0,
        scale: 1.0,
    }
}

fn small_page() -> PageSize {
    PageSize {
        width_dots: 128,
        height_dots: 128,
    }
}

fn encode(source: &str) -> String {
    STANDARD.encode(source)
}

async fn run_small(source: &str) -> (RgbaImage, Vec<Diagnostic>) {
    let output = render_label_with(&encode(source), unit_scale(), small_page())
        .await
        .expect("pipeline run");
    let png = STANDARD.decode(&output.document).expect("base64 document");
    let raster = image::load_from_memory(&png).expect("png document").to_rgba8();
    (raster, output.diagnostics)
}

fn px(raster: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    raster.get_pixel(x, y).0
}

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// First opaque pixel of a glyph raster, used to probe exact text pixels.
fn glyph_offset(content: &str, font_size: u32) -> (u32, u32) {
    let style = TextStyle {
        font_size,
        bold: false,
        color: Color::BLACK,
        background: None,
        padding: 0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    text::rasterize(content, &style)
        .enumerate_pixels()
        .find(|(_, _, p)| p.0[3] == 255)
        .map(|(x, y, _)| (x, y))
        .expect("glyph has pixels")
}

// ============================================================================
// GEOMETRY AND PRIMITIVES
// ============================================================================

#[tokio::test]
async fn box_fills_its_region() {
    let (raster, diags) = run_small("LO10,10,20,20\n").await;
    assert!(diags.is_empty());
    assert_eq!(px(&raster, 10, 10), BLACK);
    assert_eq!(px(&raster, 29, 29), BLACK);
    assert_eq!(px(&raster, 30, 30), WHITE);
    assert_eq!(px(&raster, 9, 9), WHITE);
}

#[tokio::test]
async fn border_is_hollow() {
    let (raster, _) = run_small("X10,10,2,40,40\n").await;
    assert_eq!(px(&raster, 10, 10), BLACK);
    assert_eq!(px(&raster, 11, 25), BLACK);
    assert_eq!(px(&raster, 25, 25), WHITE);
}

#[tokio::test]
async fn border_corners_in_any_order() {
    // Corners (50,50) and (10,90) normalize to x=10, y=50, 40x40.
    let (flipped, _) = run_small("X50,50,2,10,90\n").await;
    let (straight, _) = run_small("X10,50,2,50,90\n").await;
    assert_eq!(flipped.as_raw(), straight.as_raw());
}

// ============================================================================
// CONTRAST RULE AND Z-ORDER
// ============================================================================

#[tokio::test]
async fn text_over_box_is_white_elsewhere_black() {
    let (gx, gy) = glyph_offset("XX", 16);
    // Box covers the top half of the label; the same text is drawn once
    // inside it and once on bare paper below.
    let source = "LO0,0,128,64\nA4,4,0,1,1,1,N,\"XX\"\nA4,80,0,1,1,1,N,\"XX\"\n";
    let (raster, diags) = run_small(source).await;
    assert!(diags.is_empty());

    assert_eq!(px(&raster, 4 + gx, 4 + gy), WHITE, "text over box");
    assert_eq!(px(&raster, 4 + gx, 80 + gy), BLACK, "text on paper");
}

#[tokio::test]
async fn text_on_paper_is_black() {
    let (gx, gy) = glyph_offset("XX", 16);
    let (raster, _) = run_small("A70,4,0,1,1,1,N,\"XX\"\n").await;
    assert_eq!(px(&raster, 70 + gx, 4 + gy), BLACK);
}

#[tokio::test]
async fn boxes_render_before_later_text_in_source() {
    // The box appears after the text in source order, but the box phase runs
    // first and the full pass replays source order, so the box backdrop is
    // in place when the text composites and the glyph comes out white.
    let (gx, gy) = glyph_offset("Z", 16);
    let source = "A4,4,0,1,1,1,N,\"Z\"\nLO0,0,64,64\nA4,80,0,1,1,1,N,\"Z\"\n";
    let (raster, _) = run_small(source).await;

    // First text is replayed before the box in the full pass: overdrawn.
    assert_eq!(px(&raster, 4 + gx, 4 + gy), BLACK, "box overdraws earlier text");
    // Text outside the box is untouched.
    assert_eq!(px(&raster, 4 + gx, 80 + gy), BLACK, "plain text stays black");
}

// ============================================================================
// BARCODES
// ============================================================================

#[tokio::test]
async fn code128_draws_and_unknown_symbology_reports() {
    let (raster, diags) = run_small(
        "B2,2,0,1,1,2,30,N,\"OK\"\nB2,60,0,7,1,2,30,N,\"NO\"\n",
    )
    .await;

    assert_eq!(
        diags,
        vec![Diagnostic::UnsupportedSymbology { value: "7".into() }]
    );
    // Bars landed in the upper strip.
    let upper_black = raster
        .enumerate_pixels()
        .any(|(_, y, p)| y < 40 && p.0 == BLACK);
    assert!(upper_black);
    // The unsupported directive drew nothing in its strip.
    let lower_black = raster
        .enumerate_pixels()
        .any(|(_, y, p)| y >= 60 && p.0 == BLACK);
    assert!(!lower_black);
}

#[tokio::test]
async fn pdf417_marker_mismatch_is_recoverable() {
    let (raster, diags) = run_small("b2,2,X,100,100,x1,y2,c2,\"DATA\"\n").await;
    assert!(
        diags
            .iter()
            .any(|d| matches!(d, Diagnostic::UnexpectedMarker { .. }))
    );
    // The symbol still rendered.
    assert!(raster.pixels().any(|p| p.0 == BLACK));
}

#[tokio::test]
async fn unknown_2d_flag_does_not_poison_later_lines() {
    let source = "b2,2,P,100,100,s3,z5,\"DATA\"\nLO100,100,10,10\n";
    let (raster, diags) = run_small(source).await;
    assert!(
        diags
            .iter()
            .any(|d| matches!(d, Diagnostic::UnknownFlag { .. }))
    );
    assert_eq!(px(&raster, 105, 105), BLACK, "later box still renders");
}

// ============================================================================
// PIPELINE CONTRACT
// ============================================================================

#[tokio::test]
async fn identical_input_produces_identical_output() {
    let input = encode(
        "N\nLO10,10,100,50\nX5,5,2,120,120\nA12,70,0,3,1,1,N,\"SHIP TO\"\nB12,90,0,1,1,2,20,N,\"PKG-1\"\nP1\n",
    );
    let first = render_label(&input).await.unwrap();
    let second = render_label(&input).await.unwrap();
    assert_eq!(first.document, second.document);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[tokio::test]
async fn default_page_is_four_by_six() {
    let output = render_label(&encode("N\n")).await.unwrap();
    let png = STANDARD.decode(&output.document).unwrap();
    let raster = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!((raster.width(), raster.height()), (576, 864));
}

#[tokio::test]
async fn oversized_text_multiplier_is_bounded() {
    // An absurd but parseable horizontal multiplier must clamp, not panic.
    // Only the leftmost sliver of the stretched glyph can land on the page,
    // so the assertion is completing the run, not pixel content.
    let (raster, diags) = run_small("A0,0,0,1,400000000,1,N,\"AB\"\n").await;
    assert!(diags.is_empty());
    assert_eq!((raster.width(), raster.height()), (128, 128));
}

#[tokio::test]
async fn malformed_lines_never_abort_the_run() {
    let source = "GARBAGE???\nLO10,10,banana,5\nA1,2\n,,,,\nLO10,10,10,10\n";
    let (raster, diags) = run_small(source).await;
    assert!(diags.is_empty());
    assert_eq!(px(&raster, 15, 15), BLACK, "valid line still renders");
}

#[tokio::test]
async fn default_conversion_applies_at_parse_time() {
    // 203 dots = 1 inch = 144 px under the default 96 DPI x 1.5 conversion.
    let outcome = parse_label_with_scale("LO203,0,203,203", DotScale::default());
    match &outcome.directives[0] {
        zebrita::Directive::Box { x, width, .. } => {
            assert_eq!(*x, 144);
            assert_eq!(*width, 144);
        }
        other => panic!("expected box, got {:?}", other),
    }
}
