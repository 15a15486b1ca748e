//! sRGB colors and color-space math
//!
//! Colors are stored as straight (non-premultiplied) RGBA floats in `[0, 1]`.
//! `lerp` is the building block used while assembling frames and only
//! debug-asserts its fraction; `interpolate` and `darken` are the checked
//! entry points that reject out-of-range fractions with an error.

use crate::error::{ColorError, Result};

/// RGBA color in sRGB space
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// A color in HSV space
///
/// Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Create a color from `0xAARRGGBB`
    pub fn from_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as f32 / 255.0;
        Self::from_hex(argb & 0x00FF_FFFF).with_alpha(a)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional)
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(s.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

        match digits.len() {
            6 => Ok(Self::from_hex(value)),
            8 => Ok(Self::from_argb(value)),
            _ => Err(invalid()),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Format as `#RRGGBB`, or `#AARRGGBB` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if channel(self.a) == 0xFF {
            format!(
                "#{:02X}{:02X}{:02X}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                channel(self.a),
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        }
    }

    /// Linear interpolation between two colors
    ///
    /// `t` must be in `[0, 1]`. Debug builds assert it; release builds clamp.
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        debug_assert!((0.0..=1.0).contains(&t), "lerp fraction {t} outside [0, 1]");
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Interpolate each RGBA channel towards `other`
    ///
    /// Fails when `fraction` is outside `[0, 1]` (or NaN).
    pub fn interpolate(&self, other: &Color, fraction: f32) -> Result<Color> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ColorError::FractionOutOfRange(fraction));
        }

        Ok(Color {
            r: self.r + fraction * (other.r - self.r),
            g: self.g + fraction * (other.g - self.g),
            b: self.b + fraction * (other.b - self.b),
            a: self.a + fraction * (other.a - self.a),
        })
    }

    /// Darken by scaling the HSV value channel by `1 - amount`
    ///
    /// Hue, saturation and alpha are preserved. Fails when `amount` is
    /// outside `[0, 1]` (or NaN).
    pub fn darken(&self, amount: f32) -> Result<Color> {
        if !(0.0..=1.0).contains(&amount) {
            return Err(ColorError::AmountOutOfRange(amount));
        }

        let hsv = self.to_hsv();
        Ok(Color::from_hsv(
            Hsv {
                v: hsv.v * (1.0 - amount),
                ..hsv
            },
            self.a,
        ))
    }

    pub fn to_hsv(&self) -> Hsv {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == self.r {
            60.0 * (((self.g - self.b) / delta).rem_euclid(6.0))
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };

        let s = if max <= 0.0 { 0.0 } else { delta / max };

        Hsv { h, s, v: max }
    }

    pub fn from_hsv(hsv: Hsv, alpha: f32) -> Color {
        let h = hsv.h.rem_euclid(360.0);
        let c = hsv.v * hsv.s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = hsv.v - c;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::rgba(r + m, g + m, b + m, alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
