//! Spark Core
//!
//! Value types shared by the spark animation crates:
//!
//! - **Color**: sRGB RGBA colors with linear interpolation and HSV darkening
//! - **Geometry**: points, offsets, and sizes used by the radial dot layout
//! - **Errors**: contract violations raised by the color math
//!
//! # Example
//!
//! ```rust
//! use spark_core::Color;
//!
//! let primary = Color::from_hex(0xFFC107);
//! let dark = primary.darken(0.1).unwrap();
//! let mid = primary.interpolate(&dark, 0.5).unwrap();
//! assert!(mid.g < primary.g);
//! ```

pub mod color;
pub mod error;
pub mod geometry;

pub use color::{Color, Hsv};
pub use error::{ColorError, Result};
pub use geometry::{Offset, Size};
