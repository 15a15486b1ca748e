//! Geometry primitives

/// Displacement from a reference point (usually the button center)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Offset of length `radius` at `degrees` (0° points along +x, angles grow clockwise in y-down space)
    pub fn from_polar(radius: f32, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(radius * radians.cos(), radius * radians.sin())
    }

    pub fn length(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_offsets() {
        let east = Offset::from_polar(10.0, 0.0);
        assert!((east.dx - 10.0).abs() < 1e-5);
        assert!(east.dy.abs() < 1e-5);

        let south = Offset::from_polar(10.0, 90.0);
        assert!(south.dx.abs() < 1e-5);
        assert!((south.dy - 10.0).abs() < 1e-5);

        assert!((Offset::from_polar(7.5, 123.0).length() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_size_helpers() {
        let size = Size::new(40.0, 64.0);
        assert_eq!(size.max_dimension(), 64.0);
        assert_eq!(Size::square(12.0), Size::new(12.0, 12.0));
    }
}
