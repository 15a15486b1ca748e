//! Animatable tracks
//!
//! An [`AnimatableTrack`] is one animated scalar. It rests at a value until an
//! animation is started, plays at most one timeline at a time, and settles on
//! the timeline's last value once it finishes. Starting a new animation
//! replaces the active one; nothing is queued.

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::keyframe::Timeline;
use crate::Timestamp;

/// The animation a track is currently playing
#[derive(Clone, Debug, PartialEq)]
struct ActiveAnimation {
    timeline: Timeline,
    start_ms: Timestamp,
}

impl ActiveAnimation {
    fn elapsed(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.start_ms)
    }

    fn value_at(&self, now: Timestamp) -> f32 {
        self.timeline.sample(self.elapsed(now))
    }

    fn is_complete_at(&self, now: Timestamp) -> bool {
        self.timeline.is_complete_at(self.elapsed(now))
    }
}

/// A single time-varying scalar
///
/// # Example
///
/// ```rust
/// use spark_animation::{AnimatableTrack, Easing};
///
/// let mut scale = AnimatableTrack::new(1.0);
/// scale.animate_to(0.8, 150, Easing::Linear, 0).unwrap();
///
/// assert!((scale.sample(75) - 0.9).abs() < 1e-6);
/// assert_eq!(scale.sample(150), 0.8);
/// assert!(!scale.is_animating());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatableTrack {
    /// Resting value (last snap or settled animation end)
    value: f32,
    active: Option<ActiveAnimation>,
}

impl AnimatableTrack {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            active: None,
        }
    }

    /// Set the value immediately, cancelling any active animation
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.active = None;
    }

    /// Snap to the live value at `now`, cancelling any active animation
    ///
    /// Returns the frozen value.
    pub fn freeze(&mut self, now: Timestamp) -> f32 {
        let live = self.value_at(now);
        self.snap(live);
        live
    }

    /// Animate from the live value at `now` to `target`
    ///
    /// When an animation is already running, the new one starts from its
    /// interpolated value rather than from its target.
    pub fn animate_to(
        &mut self,
        target: f32,
        duration_ms: u32,
        easing: Easing,
        now: Timestamp,
    ) -> Result<()> {
        if !target.is_finite() {
            return Err(AnimationError::NonFiniteValue(target));
        }

        let from = self.value_at(now);
        let timeline = Timeline::tween(from, target, duration_ms, easing)?;
        self.play(timeline, now);
        Ok(())
    }

    /// Play a keyframe timeline starting at `start_ms`
    ///
    /// The track jumps to the first keyframe value when playback starts.
    pub fn animate_keyframes(&mut self, timeline: Timeline, start_ms: Timestamp) {
        self.play(timeline, start_ms);
    }

    /// Play a keyframe timeline starting from the live value at `start_ms`
    ///
    /// The timeline's first keyframe value is replaced by the live value, so
    /// retargeting never jumps.
    pub fn retarget_keyframes(&mut self, timeline: &Timeline, start_ms: Timestamp) {
        let live = self.value_at(start_ms);
        self.play(timeline.with_start_value(live), start_ms);
    }

    fn play(&mut self, timeline: Timeline, start_ms: Timestamp) {
        self.active = Some(ActiveAnimation { timeline, start_ms });
    }

    /// Live value at `now` without settling anything
    pub fn value_at(&self, now: Timestamp) -> f32 {
        match &self.active {
            Some(active) => active.value_at(now),
            None => self.value,
        }
    }

    /// Sample the value at `now`
    ///
    /// A finished animation is settled: its last value becomes the resting
    /// value and the track stops animating.
    pub fn sample(&mut self, now: Timestamp) -> f32 {
        let Some(active) = &self.active else {
            return self.value;
        };

        if active.is_complete_at(now) {
            self.value = active.timeline.last_value();
            self.active = None;
            self.value
        } else {
            active.value_at(now)
        }
    }

    /// Resting value (ignores any active animation)
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether an animation is active (not yet settled by `sample`)
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

impl Default for AnimatableTrack {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_cancels_animation() {
        let mut track = AnimatableTrack::new(0.0);
        track.animate_to(1.0, 100, Easing::Linear, 0).unwrap();
        assert!(track.is_animating());

        track.snap(0.25);
        assert!(!track.is_animating());
        assert_eq!(track.sample(50), 0.25);
    }

    #[test]
    fn test_animate_to_samples_and_settles() {
        let mut track = AnimatableTrack::new(0.0);
        track.animate_to(10.0, 200, Easing::Linear, 1_000).unwrap();

        assert_eq!(track.sample(1_000), 0.0);
        assert!((track.sample(1_100) - 5.0).abs() < 1e-5);
        assert!(track.is_animating());

        assert_eq!(track.sample(1_200), 10.0);
        assert!(!track.is_animating());
        assert_eq!(track.value(), 10.0);
        assert_eq!(track.sample(5_000), 10.0);
    }

    #[test]
    fn test_retarget_starts_from_interpolated_value() {
        let mut track = AnimatableTrack::new(0.0);
        track.animate_to(100.0, 100, Easing::Linear, 0).unwrap();

        let before = track.value_at(40);
        track.animate_to(0.0, 100, Easing::Linear, 40).unwrap();
        let after = track.value_at(40);

        assert!((before - 40.0).abs() < 1e-4);
        assert_eq!(before, after);
        assert_eq!(track.sample(140), 0.0);
    }

    #[test]
    fn test_animate_to_rejects_bad_input() {
        let mut track = AnimatableTrack::new(1.0);
        assert_eq!(
            track.animate_to(0.5, 0, Easing::Linear, 0),
            Err(AnimationError::ZeroDuration)
        );
        assert!(matches!(
            track.animate_to(f32::INFINITY, 100, Easing::Linear, 0),
            Err(AnimationError::NonFiniteValue(_))
        ));
        // A rejected call leaves the track untouched
        assert!(!track.is_animating());
        assert_eq!(track.value(), 1.0);
    }

    #[test]
    fn test_keyframes_jump_to_first_value() {
        let timeline = Timeline::builder(250)
            .at(0, 0.1)
            .at_eased(250, 1.0, Easing::Decelerate)
            .build()
            .unwrap();

        let mut track = AnimatableTrack::new(0.0);
        track.animate_keyframes(timeline, 10);

        // Before the start the timeline holds its first value
        assert_eq!(track.value_at(0), 0.1);
        assert_eq!(track.sample(10), 0.1);
        assert_eq!(track.sample(260), 1.0);
        assert!(!track.is_animating());
    }

    #[test]
    fn test_retarget_keyframes_is_continuous() {
        let timeline = Timeline::builder(1000)
            .at(0, 0.0)
            .at_eased(750, 0.9, Easing::FAST_OUT_SLOW_IN)
            .at(1000, 1.0)
            .build()
            .unwrap();

        let mut track = AnimatableTrack::new(0.0);
        track.animate_keyframes(timeline.clone(), 0);

        let before = track.sample(300);
        track.retarget_keyframes(&timeline, 300);
        assert_eq!(track.sample(300), before);
        assert_eq!(track.sample(1300), 1.0);
    }

    #[test]
    fn test_freeze_holds_live_value() {
        let mut track = AnimatableTrack::new(0.0);
        track.animate_to(1.0, 100, Easing::Linear, 0).unwrap();

        let frozen = track.freeze(50);
        assert!((frozen - 0.5).abs() < 1e-6);
        assert!(!track.is_animating());
        assert_eq!(track.sample(80), frozen);
    }
}
