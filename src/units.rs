//! # Dot-to-Pixel Conversion
//!
//! EPL geometry is expressed in printer dots (203 DPI on the common Zebra
//! desktop models). The output page lives in a 96 DPI pixel space with a
//! cosmetic 1.5x enlargement so labels remain readable on screen. All
//! conversion happens once, at parse time; the renderer never re-derives
//! geometry.

/// Conversion settings between printer dot space and page pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotScale {
    /// Printer resolution in dots per inch.
    pub source_dpi: f32,
    /// Output page resolution in pixels per inch.
    pub target_dpi: f32,
    /// Cosmetic enlargement applied on top of the DPI ratio.
    pub scale: f32,
}

impl Default for DotScale {
    fn default() -> Self {
        Self {
            source_dpi: 203.0,
            target_dpi: 96.0,
            scale: 1.5,
        }
    }
}

impl DotScale {
    /// Convert a distance in printer dots to output pixels, rounding up.
    ///
    /// Total for any finite input. Negative distances yield a non-positive
    /// result; the caller owns domain validity.
    pub fn to_pixels(&self, dots: f32) -> i32 {
        (dots * (self.target_dpi / self.source_dpi) * self.scale).ceil() as i32
    }

    /// Same DPI ratio with the cosmetic scale factor forced to 1.
    ///
    /// Barcode module dimensions are multipliers, not physical distances:
    /// the screen/printer DPI ratio still applies but the 1.5x enlargement
    /// must not be double-applied.
    pub fn unscaled(&self) -> DotScale {
        DotScale { scale: 1.0, ..*self }
    }

    /// Convert and clamp to the non-negative pixel grid.
    pub fn to_grid(&self, dots: f32) -> u32 {
        self.to_pixels(dots).max(0) as u32
    }
}
