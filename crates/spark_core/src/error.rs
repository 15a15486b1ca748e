//! Color error types

use thiserror::Error;

/// Contract violations raised by color construction and color-space math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Interpolation fraction outside `[0, 1]`
    #[error("fraction must be between 0 and 1, got {0}")]
    FractionOutOfRange(f32),

    /// Darken amount outside `[0, 1]`
    #[error("amount must be between 0 and 1, got {0}")]
    AmountOutOfRange(f32),

    /// Hex string that is not `#RRGGBB` or `#AARRGGBB`
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Result type for color operations
pub type Result<T> = std::result::Result<T, ColorError>;
