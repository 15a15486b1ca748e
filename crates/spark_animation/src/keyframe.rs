//! Keyframe timelines
//!
//! A [`Timeline`] is a piecewise curve over a fixed duration. Each keyframe
//! carries the easing used for the segment that *ends* at it, so sampling
//! between keyframe `i` and `i + 1` applies `keyframes[i + 1].easing` to the
//! local segment progress.
//!
//! ```rust
//! use spark_animation::{Easing, Timeline};
//!
//! let timeline = Timeline::builder(1000)
//!     .at(0, 0.0)
//!     .at_eased(750, 0.9, Easing::FAST_OUT_SLOW_IN)
//!     .at_eased(1000, 1.0, Easing::SLOW_OUT_FAST_IN)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(timeline.sample(0), 0.0);
//! assert_eq!(timeline.sample(1000), 1.0);
//! ```

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// A single keyframe
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Offset from the timeline start in milliseconds
    pub offset_ms: u32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing used when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(offset_ms: u32, value: f32, easing: Easing) -> Self {
        Self {
            offset_ms,
            value,
            easing,
        }
    }

    /// Keyframe reached with linear easing
    pub fn linear(offset_ms: u32, value: f32) -> Self {
        Self::new(offset_ms, value, Easing::Linear)
    }
}

/// An ordered keyframe schedule over a fixed duration
///
/// Construction validates the schedule, so every `Timeline` value has at least
/// one keyframe, starts at 0 ms, has strictly increasing offsets, and ends no
/// later than `duration_ms > 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    keyframes: SmallVec<[Keyframe; 4]>,
    duration_ms: u32,
}

impl Timeline {
    /// Create a timeline from keyframes in offset order
    pub fn new<I>(duration_ms: u32, keyframes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Keyframe>,
    {
        let keyframes: SmallVec<[Keyframe; 4]> = keyframes.into_iter().collect();
        validate(duration_ms, &keyframes)?;
        Ok(Self {
            keyframes,
            duration_ms,
        })
    }

    /// Single-segment timeline from `from` to `to`
    pub fn tween(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Result<Self> {
        Self::new(
            duration_ms,
            [
                Keyframe::linear(0, from),
                Keyframe::new(duration_ms, to, easing),
            ],
        )
    }

    /// Start building a timeline of the given duration
    pub fn builder(duration_ms: u32) -> TimelineBuilder {
        TimelineBuilder {
            duration_ms,
            keyframes: SmallVec::new(),
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn first_value(&self) -> f32 {
        self.keyframes[0].value
    }

    pub fn last_value(&self) -> f32 {
        self.keyframes[self.keyframes.len() - 1].value
    }

    /// Whether playback has finished after `elapsed_ms`
    pub fn is_complete_at(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= u64::from(self.duration_ms)
    }

    /// Sample the curve `elapsed_ms` after the timeline start
    ///
    /// Sampling at or past the last keyframe returns the last value.
    pub fn sample(&self, elapsed_ms: u64) -> f32 {
        let last = self.keyframes[self.keyframes.len() - 1];
        if elapsed_ms >= u64::from(last.offset_ms) {
            return last.value;
        }

        // elapsed is before the last keyframe, so some segment encloses it
        let (prev, next) = self
            .keyframes
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .find(|(_, next)| elapsed_ms < u64::from(next.offset_ms))
            .unwrap_or((last, last));

        let span = next.offset_ms - prev.offset_ms;
        if span == 0 {
            return prev.value;
        }

        let local = (elapsed_ms - u64::from(prev.offset_ms)) as f32 / span as f32;
        let eased = next.easing.apply(local);
        prev.value + (next.value - prev.value) * eased
    }

    /// Rescale every offset for an animation speed multiplier
    ///
    /// Offsets become `offset / speed`, truncated to whole milliseconds, so
    /// `speed = 2.0` halves the schedule. Speeds high enough to collapse two
    /// keyframes onto the same millisecond are rejected, as are speeds so low
    /// that an offset no longer fits in a `u32`.
    pub fn scaled(&self, speed: f32) -> Result<Timeline> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(AnimationError::InvalidSpeed(speed));
        }

        let keyframes = self
            .keyframes
            .iter()
            .map(|kf| {
                Ok(Keyframe {
                    offset_ms: scale_ms(kf.offset_ms, speed)?,
                    ..*kf
                })
            })
            .collect::<Result<SmallVec<[Keyframe; 4]>>>()?;

        Timeline::new(scale_ms(self.duration_ms, speed)?, keyframes)
    }

    /// The same schedule starting from `value` instead of the first keyframe value
    pub fn with_start_value(&self, value: f32) -> Timeline {
        let mut rebased = self.clone();
        rebased.keyframes[0].value = value;
        rebased
    }
}

/// Builder for [`Timeline`]
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    duration_ms: u32,
    keyframes: SmallVec<[Keyframe; 4]>,
}

impl TimelineBuilder {
    /// Add a keyframe reached with linear easing
    pub fn at(mut self, offset_ms: u32, value: f32) -> Self {
        self.keyframes.push(Keyframe::linear(offset_ms, value));
        self
    }

    /// Add a keyframe reached with the given easing
    pub fn at_eased(mut self, offset_ms: u32, value: f32, easing: Easing) -> Self {
        self.keyframes.push(Keyframe::new(offset_ms, value, easing));
        self
    }

    /// Validate and build the timeline
    pub fn build(self) -> Result<Timeline> {
        Timeline::new(self.duration_ms, self.keyframes)
    }
}

/// Scale a duration by `1 / speed`, truncating to whole milliseconds
///
/// Fails when the result does not fit in a `u32`.
pub(crate) fn scale_ms(ms: u32, speed: f32) -> Result<u32> {
    let scaled = (f64::from(ms) / f64::from(speed)).trunc();
    if !(0.0..=f64::from(u32::MAX)).contains(&scaled) {
        return Err(AnimationError::InvalidSpeed(speed));
    }
    Ok(scaled as u32)
}

fn validate(duration_ms: u32, keyframes: &[Keyframe]) -> Result<()> {
    if duration_ms == 0 {
        return Err(AnimationError::ZeroDuration);
    }

    let first = keyframes.first().ok_or(AnimationError::EmptyTimeline)?;
    if first.offset_ms != 0 {
        return Err(AnimationError::FirstKeyframeNotAtZero(first.offset_ms));
    }

    for (index, kf) in keyframes.iter().enumerate() {
        if !kf.value.is_finite() {
            return Err(AnimationError::NonFiniteValue(kf.value));
        }
        if kf.offset_ms > duration_ms {
            return Err(AnimationError::KeyframeBeyondDuration {
                offset_ms: kf.offset_ms,
                total_ms: duration_ms,
            });
        }
        if index > 0 {
            let previous_ms = keyframes[index - 1].offset_ms;
            if kf.offset_ms <= previous_ms {
                return Err(AnimationError::NonIncreasingKeyframes {
                    index,
                    previous_ms,
                    offset_ms: kf.offset_ms,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots_timeline() -> Timeline {
        Timeline::builder(1000)
            .at(0, 0.0)
            .at_eased(750, 0.9, Easing::FAST_OUT_SLOW_IN)
            .at_eased(1000, 1.0, Easing::SLOW_OUT_FAST_IN)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sample_endpoints() {
        let timeline = dots_timeline();
        assert_eq!(timeline.sample(0), 0.0);
        assert_eq!(timeline.sample(750), 0.9);
        assert_eq!(timeline.sample(1000), 1.0);
        assert_eq!(timeline.sample(5000), 1.0);
    }

    #[test]
    fn test_sample_is_defined_everywhere() {
        let timeline = Timeline::builder(1000)
            .at(0, 0.0)
            .at_eased(200, 0.0, Easing::Decelerate)
            .at_eased(450, 1.0, Easing::overshoot(4.0))
            .at_eased(650, 1.0, Easing::SLOW_OUT_FAST_IN)
            .at(1000, 0.0)
            .build()
            .unwrap();

        for elapsed in 0..=1000 {
            assert!(timeline.sample(elapsed).is_finite(), "elapsed {elapsed}");
        }
    }

    #[test]
    fn test_segment_uses_destination_easing() {
        let timeline = Timeline::builder(200)
            .at(0, 0.0)
            .at_eased(100, 1.0, Easing::Decelerate)
            .at(200, 2.0)
            .build()
            .unwrap();

        // Decelerate(0.5) = 0.75 on the first segment
        assert!((timeline.sample(50) - 0.75).abs() < 1e-6);
        // Linear on the second
        assert!((timeline.sample(150) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_hold_after_last_keyframe() {
        let timeline = Timeline::builder(400)
            .at(0, 0.1)
            .at_eased(250, 1.0, Easing::Decelerate)
            .build()
            .unwrap();

        assert_eq!(timeline.sample(300), 1.0);
        assert!(!timeline.is_complete_at(300));
        assert!(timeline.is_complete_at(400));
    }

    #[test]
    fn test_single_keyframe_holds() {
        let timeline = Timeline::new(100, [Keyframe::linear(0, 0.5)]).unwrap();
        assert_eq!(timeline.sample(0), 0.5);
        assert_eq!(timeline.sample(100), 0.5);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Timeline::new(1000, []),
            Err(AnimationError::EmptyTimeline)
        );
        assert_eq!(
            Timeline::tween(0.0, 1.0, 0, Easing::Linear),
            Err(AnimationError::ZeroDuration)
        );
        assert_eq!(
            Timeline::builder(100).at(10, 0.0).build(),
            Err(AnimationError::FirstKeyframeNotAtZero(10))
        );
        assert_eq!(
            Timeline::builder(100).at(0, 0.0).at(50, 1.0).at(50, 2.0).build(),
            Err(AnimationError::NonIncreasingKeyframes {
                index: 2,
                previous_ms: 50,
                offset_ms: 50,
            })
        );
        assert_eq!(
            Timeline::builder(100).at(0, 0.0).at(150, 1.0).build(),
            Err(AnimationError::KeyframeBeyondDuration {
                offset_ms: 150,
                total_ms: 100,
            })
        );
        assert!(matches!(
            Timeline::builder(100).at(0, f32::NAN).build(),
            Err(AnimationError::NonFiniteValue(v)) if v.is_nan()
        ));
    }

    #[test]
    fn test_scaled_halves_offsets() {
        let timeline = dots_timeline();
        let fast = timeline.scaled(2.0).unwrap();

        assert_eq!(fast.duration_ms(), 500);
        let offsets: Vec<u32> = fast.keyframes().iter().map(|kf| kf.offset_ms).collect();
        assert_eq!(offsets, vec![0, 375, 500]);

        for elapsed in [0, 100, 250, 374, 375, 480, 500] {
            assert_eq!(fast.sample(elapsed), timeline.sample(elapsed * 2));
        }
    }

    #[test]
    fn test_scaled_truncates_and_rejects() {
        let thirds = dots_timeline().scaled(3.0).unwrap();
        assert_eq!(thirds.duration_ms(), 333);
        assert_eq!(thirds.keyframes()[1].offset_ms, 250);

        assert_eq!(
            dots_timeline().scaled(0.0),
            Err(AnimationError::InvalidSpeed(0.0))
        );
        assert_eq!(
            dots_timeline().scaled(-1.0),
            Err(AnimationError::InvalidSpeed(-1.0))
        );
        assert!(matches!(
            dots_timeline().scaled(800.0),
            Err(AnimationError::NonIncreasingKeyframes { .. })
        ));
    }

    #[test]
    fn test_scaled_rejects_offsets_past_u32() {
        // 1000 ms at speed 1e-6 still fits
        assert_eq!(
            dots_timeline().scaled(1e-6).unwrap().duration_ms(),
            (1000.0 / f64::from(1e-6_f32)) as u32
        );
        assert_eq!(
            dots_timeline().scaled(1e-7),
            Err(AnimationError::InvalidSpeed(1e-7))
        );
    }

    #[test]
    fn test_with_start_value() {
        let rebased = dots_timeline().with_start_value(0.4);
        assert_eq!(rebased.sample(0), 0.4);
        assert_eq!(rebased.sample(1000), 1.0);
        assert_eq!(rebased.keyframes()[1], dots_timeline().keyframes()[1]);
    }
}
