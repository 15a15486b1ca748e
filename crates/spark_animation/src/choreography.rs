//! Spark choreography
//!
//! The choreography is the fixed set of track animations started by one
//! trigger. Every animated property gets a [`TrackPlan`]: an optional value to
//! snap to when the trigger lands, a start delay, the keyframe timeline to
//! play, and an optional value to snap back to once the timeline finishes.
//!
//! Timelines are authored at speed 1.0 (a 1000 ms cycle) and rescaled by
//! [`ChoreographyTiming::new`] for other animation speeds.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::keyframe::{scale_ms, Timeline};

/// Tension of the content scale-in bounce
pub const SCALE_OVERSHOOT_TENSION: f32 = 4.0;

/// The animated properties of a spark button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackId {
    ContentScale,
    DotsRadius,
    LargeDotSize,
    SmallDotSize,
    OuterCircle,
    InnerCircle,
}

impl TrackId {
    pub const ALL: [TrackId; 6] = [
        TrackId::ContentScale,
        TrackId::DotsRadius,
        TrackId::LargeDotSize,
        TrackId::SmallDotSize,
        TrackId::OuterCircle,
        TrackId::InnerCircle,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value the track holds when no spark is playing
    pub const fn rest_value(self) -> f32 {
        match self {
            TrackId::ContentScale => 1.0,
            _ => 0.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TrackId::ContentScale => "content_scale",
            TrackId::DotsRadius => "dots_radius",
            TrackId::LargeDotSize => "large_dot_size",
            TrackId::SmallDotSize => "small_dot_size",
            TrackId::OuterCircle => "outer_circle",
            TrackId::InnerCircle => "inner_circle",
        }
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which parts of the spark play, and with which timing
///
/// Tracks of a disabled part never leave their rest value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choreography {
    /// Content snaps away and bounces back in
    pub scale_bounce: bool,
    /// The three dot rings expand and fade
    pub dots: bool,
    /// The center ring pulses
    pub rings: bool,
    /// Use the view-based timing instead of the keyframed one
    pub classic_timing: bool,
}

impl Choreography {
    /// Preset names accepted by [`Choreography::preset`]
    pub const PRESETS: [&'static str; 3] = ["full", "without-rings", "classic"];

    /// Every track with keyframed timing
    pub const fn full() -> Self {
        Self {
            scale_bounce: true,
            dots: true,
            rings: true,
            classic_timing: false,
        }
    }

    /// Icon variant: no center ring
    pub const fn without_rings() -> Self {
        Self {
            rings: false,
            ..Self::full()
        }
    }

    /// Every track with the view-based timing
    pub const fn classic() -> Self {
        Self {
            classic_timing: true,
            ..Self::full()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "full" => Some(Self::full()),
            "without-rings" => Some(Self::without_rings()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    pub fn includes(&self, track: TrackId) -> bool {
        match track {
            TrackId::ContentScale => self.scale_bounce,
            TrackId::DotsRadius | TrackId::LargeDotSize | TrackId::SmallDotSize => self.dots,
            TrackId::OuterCircle | TrackId::InnerCircle => self.rings,
        }
    }

    /// Plans at speed 1.0 for every included track
    pub fn plans(&self) -> Result<SmallVec<[TrackPlan; 6]>> {
        let mut plans = SmallVec::new();
        for track in TrackId::ALL {
            if self.includes(track) {
                let plan = if self.classic_timing {
                    classic_plan(track)?
                } else {
                    keyframed_plan(track)?
                };
                plans.push(plan);
            }
        }
        Ok(plans)
    }
}

impl Default for Choreography {
    fn default() -> Self {
        Self::full()
    }
}

/// How one track animates after a trigger
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPlan {
    pub track: TrackId,
    /// Snapped to when the trigger lands (only from rest)
    pub snap_on_trigger: Option<f32>,
    /// Time between the trigger and the timeline start
    pub delay_ms: u32,
    pub timeline: Timeline,
    /// Snapped to once the timeline has finished
    pub reset_after: Option<f32>,
}

impl TrackPlan {
    fn new(track: TrackId, timeline: Timeline) -> Self {
        Self {
            track,
            snap_on_trigger: None,
            delay_ms: 0,
            timeline,
            reset_after: None,
        }
    }

    fn snap_on_trigger(mut self, value: f32) -> Self {
        self.snap_on_trigger = Some(value);
        self
    }

    fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn reset_after(mut self, value: f32) -> Self {
        self.reset_after = Some(value);
        self
    }

    /// Time from the trigger until the track settles
    pub fn end_ms(&self) -> u64 {
        u64::from(self.delay_ms) + u64::from(self.timeline.duration_ms())
    }

    /// The same plan at `speed`, with every offset truncated to whole ms
    pub fn scaled(&self, speed: f32) -> Result<Self> {
        Ok(Self {
            delay_ms: scale_ms(self.delay_ms, speed)?,
            timeline: self.timeline.scaled(speed)?,
            ..self.clone()
        })
    }
}

/// Keyframed timing. Each segment's curve sits on the keyframe that ends it.
fn keyframed_plan(track: TrackId) -> Result<TrackPlan> {
    let plan = match track {
        TrackId::ContentScale => TrackPlan::new(
            track,
            Timeline::tween(0.2, 1.0, 350, Easing::overshoot(SCALE_OVERSHOOT_TENSION))?,
        )
        .snap_on_trigger(0.0)
        .delayed(250),
        TrackId::DotsRadius => TrackPlan::new(
            track,
            Timeline::builder(1000)
                .at(0, 0.0)
                .at_eased(750, 0.9, Easing::FAST_OUT_SLOW_IN)
                .at_eased(1000, 1.0, Easing::SLOW_OUT_FAST_IN)
                .build()?,
        )
        .snap_on_trigger(0.0)
        .reset_after(0.0),
        TrackId::LargeDotSize => TrackPlan::new(
            track,
            Timeline::builder(1000)
                .at(0, 0.0)
                .at_eased(450, 1.0, Easing::FAST_OUT_SLOW_IN)
                .at(650, 1.0)
                .at_eased(1000, 0.0, Easing::SLOW_OUT_FAST_IN)
                .build()?,
        ),
        TrackId::SmallDotSize => TrackPlan::new(
            track,
            Timeline::builder(1000)
                .at(0, 0.0)
                .at_eased(500, 1.0, Easing::FAST_OUT_SLOW_IN)
                .at_eased(1000, 0.0, Easing::SLOW_OUT_FAST_IN)
                .build()?,
        ),
        TrackId::OuterCircle => TrackPlan::new(
            track,
            Timeline::builder(250)
                .at(0, 0.1)
                .at_eased(250, 1.0, Easing::Decelerate)
                .build()?,
        )
        .snap_on_trigger(0.0),
        TrackId::InnerCircle => TrackPlan::new(
            track,
            Timeline::builder(400)
                .at(0, 0.0)
                .at(200, 0.0)
                .at_eased(400, 1.0, Easing::Decelerate)
                .build()?,
        )
        .snap_on_trigger(0.0),
    };
    Ok(plan)
}

/// View-based timing: plain tweens with start delays
fn classic_plan(track: TrackId) -> Result<TrackPlan> {
    let plan = match track {
        TrackId::DotsRadius => TrackPlan::new(
            track,
            Timeline::tween(0.0, 1.0, 900, Easing::AccelerateDecelerate)?,
        )
        .snap_on_trigger(0.0)
        .delayed(50),
        TrackId::OuterCircle => {
            TrackPlan::new(track, Timeline::tween(0.1, 1.0, 250, Easing::Decelerate)?)
                .snap_on_trigger(0.0)
        }
        TrackId::InnerCircle => {
            TrackPlan::new(track, Timeline::tween(0.1, 1.0, 200, Easing::Decelerate)?)
                .snap_on_trigger(0.0)
                .delayed(200)
        }
        // Scale bounce and dot sizes keep the keyframed timing
        _ => keyframed_plan(track)?,
    };
    Ok(plan)
}

/// A choreography resolved for one animation speed
#[derive(Clone, Debug, PartialEq)]
pub struct ChoreographyTiming {
    speed: f32,
    plans: SmallVec<[TrackPlan; 6]>,
}

impl ChoreographyTiming {
    /// Resolve `choreography` at `speed`
    ///
    /// Fails when `speed` is not a finite positive number, or when it is so
    /// high that two keyframes of a timeline land on the same millisecond.
    pub fn new(choreography: &Choreography, speed: f32) -> Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(AnimationError::InvalidSpeed(speed));
        }

        let plans = choreography
            .plans()?
            .iter()
            .map(|plan| plan.scaled(speed))
            .collect::<Result<_>>()?;

        Ok(Self { speed, plans })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn plans(&self) -> &[TrackPlan] {
        &self.plans
    }

    pub fn plan(&self, track: TrackId) -> Option<&TrackPlan> {
        self.plans.iter().find(|plan| plan.track == track)
    }

    /// Time from a trigger until every track has settled
    pub fn window_ms(&self) -> u64 {
        self.plans.iter().map(TrackPlan::end_ms).max().unwrap_or(0)
    }
}
