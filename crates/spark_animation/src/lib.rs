//! Spark Animation System
//!
//! Clock-driven property animation and the spark button choreography.
//!
//! # Features
//!
//! - **Easing**: linear, decelerate, overshoot, and cubic-bezier curves
//! - **Keyframe Timelines**: piecewise curves with per-segment easing
//! - **Animatable Tracks**: snap, tween, keyframe playback, and retargeting
//! - **Spark Controller**: generation-tagged restart of six concurrent tracks
//! - **Frame Snapshots**: immutable per-frame values, dot rings, and ring stroke
//!
//! The host polls: call [`SparkController::advance`] once per frame with the
//! current time in milliseconds and draw the returned [`FrameSnapshot`].
//!
//! ```rust
//! use spark_animation::{SparkController, SparkState};
//! use spark_core::Color;
//!
//! let mut spark = SparkController::create(
//!     Color::from_hex(0xFFC107),
//!     Color::from_hex(0xFF5722),
//!     1.0,
//! )
//! .unwrap();
//!
//! spark.on_trigger();
//! let frame = spark.advance(0);
//! assert_eq!(frame.state, SparkState::Animating);
//!
//! let frame = spark.advance(1000);
//! assert_eq!(frame.state, SparkState::Idle);
//! assert_eq!(frame.values.content_scale, 1.0);
//! ```

pub mod choreography;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod layout;
pub mod palette;
pub mod snapshot;
pub mod track;

pub use choreography::{Choreography, ChoreographyTiming, TrackId, TrackPlan};
pub use config::{SparkConfig, TriggerMode};
pub use controller::{Generation, SparkController, SparkState, TriggerState};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use keyframe::{Keyframe, Timeline, TimelineBuilder};
pub use layout::{map_range, radial_offset, RingRadii, SparkGeometry, DOT_COUNT};
pub use palette::DotPalette;
pub use snapshot::{Dot, DotRing, FrameSnapshot, RingStroke, TrackValues};
pub use track::AnimatableTrack;

/// Host clock reading in milliseconds
pub type Timestamp = u64;
