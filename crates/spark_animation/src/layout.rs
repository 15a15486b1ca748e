//! Radial dot layout and button-derived geometry

use spark_core::{Offset, Size};

/// Dots per ring
pub const DOT_COUNT: usize = 12;

/// Angle between neighbouring dots of a ring, in degrees
pub const DOT_POSITION_ANGLE: f32 = 360.0 / DOT_COUNT as f32;

/// Linearly map `value` from `[from_low, from_high]` onto `[to_low, to_high]`
///
/// Values outside the source range extrapolate.
pub fn map_range(value: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
    to_low + (value - from_low) / (from_high - from_low) * (to_high - to_low)
}

/// Offset from the ring center of dot `index` out of `count` evenly spaced dots
///
/// Dot 0 sits at `rotation_deg`; each further dot is `360 / count` degrees
/// further clockwise (y grows downwards). An empty ring yields the center.
pub fn radial_offset(count: usize, radius: f32, index: usize, rotation_deg: f32) -> Offset {
    if count == 0 {
        return Offset::ZERO;
    }
    let step = 360.0 / count as f32;
    Offset::from_polar(radius, index as f32 * step + rotation_deg)
}

/// Radii of the three dot rings at a given radius progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingRadii {
    pub outer: f32,
    pub middle: f32,
    pub inner: f32,
}

/// Drawing extents derived from the button size
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparkGeometry {
    /// Largest small-dot radius; middle-ring dots grow to twice this
    pub max_dot_size: f32,
    /// Outer dot ring radius at full progress
    pub max_outer_dots_radius: f32,
    /// Center ring outer radius at full progress
    pub max_circle_radius: f32,
}

impl SparkGeometry {
    pub fn for_size(size: Size) -> Self {
        let extent = size.max_dimension();
        Self {
            max_dot_size: extent / 24.0,
            max_outer_dots_radius: extent * 1.5,
            max_circle_radius: extent / 4.0 * 3.0,
        }
    }

    /// Ring radii for `progress`
    ///
    /// The middle ring reaches 7/8 and the inner ring 3/4 of the outer radius.
    pub fn ring_radii(&self, progress: f32) -> RingRadii {
        let outer = self.max_outer_dots_radius;
        RingRadii {
            outer: map_range(progress, 0.0, 1.0, 0.0, outer),
            middle: map_range(progress, 0.0, 1.0, 0.0, outer / 8.0 * 7.0),
            inner: map_range(progress, 0.0, 1.0, 0.0, outer / 4.0 * 3.0),
        }
    }
}

impl Default for SparkGeometry {
    fn default() -> Self {
        Self::for_size(Size::square(48.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert!((map_range(0.25, 0.0, 0.5, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((map_range(0.75, 0.5, 1.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((map_range(0.5, 0.0, 1.0, 10.0, 20.0) - 15.0).abs() < 1e-6);
        // Extrapolates outside the source range
        assert!((map_range(2.0, 0.0, 1.0, 0.0, 10.0) - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_radial_offsets_evenly_spaced() {
        let first = radial_offset(DOT_COUNT, 10.0, 0, 0.0);
        assert!((first.dx - 10.0).abs() < 1e-5);
        assert!(first.dy.abs() < 1e-5);

        // Quarter turn after three 30° steps
        let third = radial_offset(DOT_COUNT, 10.0, 3, 0.0);
        assert!(third.dx.abs() < 1e-4);
        assert!((third.dy - 10.0).abs() < 1e-4);

        for index in 0..DOT_COUNT {
            let offset = radial_offset(DOT_COUNT, 10.0, index, 0.0);
            assert!((offset.length() - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_radial_offset_rotation() {
        let shifted = radial_offset(DOT_COUNT, 8.0, 1, -DOT_POSITION_ANGLE / 2.0);
        let expected = Offset::from_polar(8.0, 15.0);
        assert!((shifted.dx - expected.dx).abs() < 1e-5);
        assert!((shifted.dy - expected.dy).abs() < 1e-5);

        assert_eq!(radial_offset(0, 8.0, 3, 0.0), Offset::ZERO);
    }

    #[test]
    fn test_geometry_from_size() {
        let geometry = SparkGeometry::for_size(Size::new(40.0, 48.0));
        assert!((geometry.max_dot_size - 2.0).abs() < 1e-6);
        assert!((geometry.max_outer_dots_radius - 72.0).abs() < 1e-6);
        assert!((geometry.max_circle_radius - 36.0).abs() < 1e-6);
    }

    #[test]
    fn test_ring_radii() {
        let geometry = SparkGeometry::default();
        assert_eq!(geometry.ring_radii(0.0), RingRadii::default());

        let full = geometry.ring_radii(1.0);
        assert!((full.outer - 72.0).abs() < 1e-5);
        assert!((full.middle - 63.0).abs() < 1e-5);
        assert!((full.inner - 54.0).abs() < 1e-5);

        let half = geometry.ring_radii(0.5);
        assert!((half.outer - 36.0).abs() < 1e-5);
    }
}
