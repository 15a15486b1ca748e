//! Animation error types

use spark_core::ColorError;
use thiserror::Error;

/// Contract violations raised by timelines, tracks, and the spark controller
///
/// These are configuration errors: they are raised synchronously by the call
/// that introduced them and are never clamped away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Animation speed must be a finite value greater than zero
    #[error("animation speed must be larger than 0, got {0}")]
    InvalidSpeed(f32),

    /// A timeline needs at least one keyframe
    #[error("timeline has no keyframes")]
    EmptyTimeline,

    /// Timelines and tweens need a positive duration
    #[error("animation duration must be larger than 0 ms")]
    ZeroDuration,

    /// The first keyframe must sit at offset 0
    #[error("first keyframe must be at 0 ms, got {0} ms")]
    FirstKeyframeNotAtZero(u32),

    /// Keyframe offsets must strictly increase
    #[error("keyframe {index} at {offset_ms} ms does not come after {previous_ms} ms")]
    NonIncreasingKeyframes {
        index: usize,
        previous_ms: u32,
        offset_ms: u32,
    },

    /// A keyframe lies past the end of its timeline
    #[error("keyframe at {offset_ms} ms is past the timeline end at {total_ms} ms")]
    KeyframeBeyondDuration { offset_ms: u32, total_ms: u32 },

    /// Keyframe and target values must be finite
    #[error("animation value must be finite, got {0}")]
    NonFiniteValue(f32),

    /// Color math rejected its input
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
