//! Frame snapshots
//!
//! A [`FrameSnapshot`] is everything a renderer needs for one frame: the
//! sampled track values plus the dot rings and center ring derived from them.
//! Snapshots are plain values; two snapshots are equal when every sampled and
//! derived value is equal.

use smallvec::SmallVec;
use spark_core::{Color, Offset};

use crate::choreography::TrackId;
use crate::controller::{Generation, SparkState};
use crate::layout::{radial_offset, SparkGeometry, DOT_COUNT, DOT_POSITION_ANGLE};
use crate::palette::DotPalette;

/// Content alpha while the button is disabled
pub const DISABLED_ALPHA: f32 = 0.38;

/// Sampled value of every choreography track
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackValues {
    pub content_scale: f32,
    pub dots_radius_progress: f32,
    pub large_dot_size_progress: f32,
    pub small_dot_size_progress: f32,
    pub outer_circle_progress: f32,
    pub inner_circle_progress: f32,
}

impl TrackValues {
    /// Every track at its rest value
    pub fn rest() -> Self {
        Self::from_fn(TrackId::rest_value)
    }

    /// Build from a per-track lookup
    pub fn from_fn(mut value: impl FnMut(TrackId) -> f32) -> Self {
        Self {
            content_scale: value(TrackId::ContentScale),
            dots_radius_progress: value(TrackId::DotsRadius),
            large_dot_size_progress: value(TrackId::LargeDotSize),
            small_dot_size_progress: value(TrackId::SmallDotSize),
            outer_circle_progress: value(TrackId::OuterCircle),
            inner_circle_progress: value(TrackId::InnerCircle),
        }
    }

    pub fn get(&self, track: TrackId) -> f32 {
        match track {
            TrackId::ContentScale => self.content_scale,
            TrackId::DotsRadius => self.dots_radius_progress,
            TrackId::LargeDotSize => self.large_dot_size_progress,
            TrackId::SmallDotSize => self.small_dot_size_progress,
            TrackId::OuterCircle => self.outer_circle_progress,
            TrackId::InnerCircle => self.inner_circle_progress,
        }
    }
}

impl Default for TrackValues {
    fn default() -> Self {
        Self::rest()
    }
}

/// One dot, positioned relative to the button center
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dot {
    pub offset: Offset,
    pub radius: f32,
    pub color: Color,
}

/// A ring of evenly spaced dots
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DotRing {
    /// Distance of the dot centers from the button center
    pub radius: f32,
    pub dots: SmallVec<[Dot; DOT_COUNT]>,
}

impl DotRing {
    fn layout(
        radius: f32,
        rotation_deg: f32,
        dot_radius: f32,
        colors: &[Color; 4],
        color_shift: usize,
    ) -> Self {
        let dots = (0..DOT_COUNT)
            .map(|i| Dot {
                offset: radial_offset(DOT_COUNT, radius, i, rotation_deg),
                radius: dot_radius,
                color: colors[(i + color_shift) % colors.len()],
            })
            .collect();
        Self { radius, dots }
    }

    /// Whether any dot would cover a pixel
    pub fn is_visible(&self) -> bool {
        self.dots.iter().any(|dot| dot.radius > 0.0 && dot.color.a > 0.0)
    }
}

/// Stroked circle around the button center
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RingStroke {
    /// Radius of the stroke's center line
    pub radius: f32,
    pub width: f32,
    pub color: Color,
}

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameSnapshot {
    pub generation: Generation,
    pub state: SparkState,
    /// Toggle state (always false for momentary buttons)
    pub checked: bool,
    /// 1.0 when enabled, [`DISABLED_ALPHA`] when disabled
    pub content_alpha: f32,
    /// Press feedback scale, applied on top of the choreography scale
    pub press_scale: f32,
    pub values: TrackValues,
    pub outer_dots: DotRing,
    pub middle_dots: DotRing,
    pub inner_dots: DotRing,
    /// Present only while the outer ring is ahead of the inner ring
    pub center_ring: Option<RingStroke>,
}

impl FrameSnapshot {
    /// Derive dot rings and the center ring from sampled values
    ///
    /// The header fields start out at their idle defaults.
    pub fn assemble(values: TrackValues, geometry: &SparkGeometry, palette: &DotPalette) -> Self {
        let radii = geometry.ring_radii(values.dots_radius_progress);
        let colors = palette.colors_at(values.dots_radius_progress);
        let small_dot = values.small_dot_size_progress * geometry.max_dot_size;
        let large_dot = values.large_dot_size_progress * 2.0 * geometry.max_dot_size;

        let outer_dots = DotRing::layout(radii.outer, 0.0, small_dot, &colors, 0);
        let middle_dots = DotRing::layout(
            radii.middle,
            -DOT_POSITION_ANGLE / 2.0,
            large_dot,
            &colors,
            1,
        );
        let inner_dots = DotRing::layout(radii.inner, 0.0, small_dot, &colors, 1);

        let outer = values.outer_circle_progress;
        let inner = values.inner_circle_progress;
        let center_ring = (outer > inner).then(|| {
            let width = (outer - inner) * geometry.max_circle_radius;
            RingStroke {
                radius: outer * geometry.max_circle_radius - width / 2.0,
                width,
                color: palette.ring_color(inner),
            }
        });

        Self {
            generation: Generation::default(),
            state: SparkState::Idle,
            checked: false,
            content_alpha: 1.0,
            press_scale: 1.0,
            values,
            outer_dots,
            middle_dots,
            inner_dots,
            center_ring,
        }
    }

    /// Final content scale: choreography scale times press feedback
    pub fn scale(&self) -> f32 {
        self.values.content_scale * self.press_scale
    }

    /// Outer, middle and inner rings in draw order
    pub fn dot_rings(&self) -> [&DotRing; 3] {
        [&self.outer_dots, &self.middle_dots, &self.inner_dots]
    }

    /// Whether any part of the spark is drawn this frame
    pub fn is_spark_visible(&self) -> bool {
        self.center_ring.is_some() || self.dot_rings().iter().any(|ring| ring.is_visible())
    }
}
