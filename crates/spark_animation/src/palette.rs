//! Four-color dot palette
//!
//! The palette rotates through `primary -> primary_dark -> secondary ->
//! secondary_dark` twice over a full dot cycle: once on `[0, 0.5)` and once on
//! `[0.5, 1]`, each half re-normalized to `[0, 1]`.

use spark_core::Color;

use crate::error::Result;
use crate::layout::map_range;

/// How much the dark palette entries are darkened
pub const DARKEN_AMOUNT: f32 = 0.1;

/// Rounding slack allowed on sampled progress values
const PROGRESS_EPSILON: f32 = 1e-4;

/// Clamp a sampled progress value, asserting in debug builds that it was
/// only off by rounding
fn checked_progress(progress: f32) -> f32 {
    debug_assert!(
        progress >= -PROGRESS_EPSILON && progress <= 1.0 + PROGRESS_EPSILON,
        "progress {progress} outside [0, 1]"
    );
    progress.clamp(0.0, 1.0)
}

/// Dot colors for a primary/secondary pair
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotPalette {
    pub primary: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub secondary_dark: Color,
}

impl DotPalette {
    /// Build the palette, deriving the dark variants by HSV darkening
    pub fn new(primary: Color, secondary: Color) -> Result<Self> {
        Ok(Self {
            primary,
            primary_dark: primary.darken(DARKEN_AMOUNT)?,
            secondary,
            secondary_dark: secondary.darken(DARKEN_AMOUNT)?,
        })
    }

    /// The four dot colors at `progress`
    ///
    /// `progress` must be in `[0, 1]`. Debug builds assert it.
    pub fn colors_at(&self, progress: f32) -> [Color; 4] {
        let progress = checked_progress(progress);
        let Self {
            primary: p,
            primary_dark: pd,
            secondary: s,
            secondary_dark: sd,
        } = self;

        if progress < 0.5 {
            let t = map_range(progress, 0.0, 0.5, 0.0, 1.0);
            [
                Color::lerp(p, pd, t),
                Color::lerp(pd, s, t),
                Color::lerp(s, sd, t),
                Color::lerp(sd, p, t),
            ]
        } else {
            let t = map_range(progress, 0.5, 1.0, 0.0, 1.0);
            [
                Color::lerp(pd, p, t),
                Color::lerp(s, pd, t),
                Color::lerp(sd, s, t),
                Color::lerp(p, sd, t),
            ]
        }
    }

    /// Center ring color at `inner_progress`: secondary fading into primary
    pub fn ring_color(&self, inner_progress: f32) -> Color {
        Color::lerp(&self.secondary, &self.primary, checked_progress(inner_progress))
    }
}
