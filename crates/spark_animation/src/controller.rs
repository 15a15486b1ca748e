//! Spark animation controller
//!
//! The controller owns one [`AnimatableTrack`] per choreography property plus a
//! separate press-feedback track, and turns trigger events into a restart of
//! the whole choreography.
//!
//! # Restarts and generations
//!
//! Every trigger bumps the [`Generation`]. Work that cannot happen right away
//! (a delayed track start, the dot reset after the radius timeline ends) is
//! queued as a scheduled action tagged with the generation that created it.
//! When a scheduled action comes due after a newer restart it is dropped, so a
//! slow completion from an old cycle never clobbers a fresh one.
//!
//! A trigger that lands while the spark is still animating restarts every
//! track from its live value: nothing snaps, only the schedule changes.
//!
//! # Host clock
//!
//! The controller has no clock of its own. [`SparkController::on_trigger`] and
//! [`SparkController::on_press_state_changed`] latch the event; the next
//! [`SparkController::advance`] applies it using that call's timestamp.

use smallvec::SmallVec;
use spark_core::Color;

use crate::choreography::{ChoreographyTiming, TrackId};
use crate::config::{SparkConfig, TriggerMode};
use crate::easing::Easing;
use crate::error::Result;
use crate::keyframe::Timeline;
use crate::layout::SparkGeometry;
use crate::palette::DotPalette;
use crate::snapshot::{FrameSnapshot, TrackValues, DISABLED_ALPHA};
use crate::track::AnimatableTrack;
use crate::Timestamp;

/// Content scale while the button is held down
pub const PRESS_SCALE: f32 = 0.8;

/// Time to reach [`PRESS_SCALE`] (not affected by animation speed)
pub const PRESS_DURATION_MS: u32 = 150;

/// Restart counter used to invalidate scheduled work from older triggers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a spark is playing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SparkState {
    /// Every track at rest
    #[default]
    Idle,
    /// At least one track in flight or scheduled
    Animating,
}

/// Host-visible trigger bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerState {
    /// Accepted triggers so far
    pub click_count: u32,
    /// Toggle state; stays false for momentary buttons
    pub checked: bool,
    /// Disabled buttons refuse triggers but keep animating
    pub enabled: bool,
}

/// Event latched until the next `advance`
#[derive(Clone, Copy, Debug, PartialEq)]
enum HostEvent {
    Trigger,
    Press { pressed: bool, cancelled: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Action {
    /// Start the track's planned timeline; `rebase` starts it from the live value
    Start { track: TrackId, rebase: bool },
    /// Snap the track to a value
    Reset { track: TrackId, value: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScheduledAction {
    generation: Generation,
    due: Timestamp,
    action: Action,
}

/// Drives the spark choreography for one button
///
/// Single-threaded and poll-based: call [`advance`](Self::advance) once per
/// frame and draw the returned snapshot.
#[derive(Debug)]
pub struct SparkController {
    config: SparkConfig,
    timing: ChoreographyTiming,
    geometry: SparkGeometry,
    palette: DotPalette,
    tracks: [AnimatableTrack; 6],
    press_scale: AnimatableTrack,
    press_timeline: Timeline,
    generation: Generation,
    trigger: TriggerState,
    state: SparkState,
    last_now: Timestamp,
    pending: SmallVec<[HostEvent; 4]>,
    scheduled: SmallVec<[ScheduledAction; 8]>,
}

impl SparkController {
    /// Create a momentary spark controller with the full choreography
    ///
    /// Fails when `animation_speed` is not greater than zero.
    pub fn create(primary: Color, secondary: Color, animation_speed: f32) -> Result<Self> {
        Self::new(
            SparkConfig::default()
                .with_colors(primary, secondary)
                .with_animation_speed(animation_speed),
        )
    }

    /// Create a controller from a full configuration
    pub fn new(config: SparkConfig) -> Result<Self> {
        config.validate()?;

        let timing = ChoreographyTiming::new(&config.choreography, config.animation_speed)?;
        let palette = DotPalette::new(config.primary_color, config.secondary_color)?;
        let press_timeline = Timeline::tween(1.0, PRESS_SCALE, PRESS_DURATION_MS, Easing::Linear)?;

        tracing::debug!(
            speed = config.animation_speed,
            mode = ?config.mode,
            window_ms = timing.window_ms(),
            "SparkController: created"
        );

        Ok(Self {
            geometry: SparkGeometry::for_size(config.button_size),
            timing,
            palette,
            tracks: TrackId::ALL.map(|track| AnimatableTrack::new(track.rest_value())),
            press_scale: AnimatableTrack::new(1.0),
            press_timeline,
            generation: Generation::default(),
            trigger: TriggerState {
                enabled: config.enabled,
                ..TriggerState::default()
            },
            state: SparkState::Idle,
            last_now: 0,
            pending: SmallVec::new(),
            scheduled: SmallVec::new(),
            config,
        })
    }

    pub fn config(&self) -> &SparkConfig {
        &self.config
    }

    pub fn timing(&self) -> &ChoreographyTiming {
        &self.timing
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> SparkState {
        self.state
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger
    }

    pub fn is_enabled(&self) -> bool {
        self.trigger.enabled
    }

    /// Enable or disable triggers; running animations are not affected
    pub fn set_enabled(&mut self, enabled: bool) {
        self.trigger.enabled = enabled;
        self.config.enabled = enabled;
    }

    /// Change the checked state without playing or cancelling anything
    pub fn set_checked(&mut self, checked: bool) {
        self.trigger.checked = checked;
    }

    /// Latch a trigger for the next `advance`
    ///
    /// Returns false (and latches nothing) when the button is disabled.
    pub fn on_trigger(&mut self) -> bool {
        if !self.trigger.enabled {
            tracing::trace!("SparkController: trigger ignored while disabled");
            return false;
        }
        self.pending.push(HostEvent::Trigger);
        true
    }

    /// Latch a pointer press change for the next `advance`
    pub fn on_press_state_changed(&mut self, pressed: bool, cancelled: bool) {
        self.pending.push(HostEvent::Press { pressed, cancelled });
    }

    /// Apply a trigger at a known time, without waiting for `advance`
    pub fn trigger_at(&mut self, now: Timestamp) -> bool {
        if !self.trigger.enabled {
            tracing::trace!("SparkController: trigger ignored while disabled");
            return false;
        }
        self.catch_up(now);
        self.apply_trigger(now);
        true
    }

    /// Advance to `now` and return the frame to draw
    ///
    /// The controller first catches up to `now`, so latched events see the
    /// state and live values at `now`. The events then start at `now`.
    pub fn advance(&mut self, now: Timestamp) -> FrameSnapshot {
        self.catch_up(now);

        for event in std::mem::take(&mut self.pending) {
            match event {
                HostEvent::Trigger => {
                    if self.trigger.enabled {
                        self.apply_trigger(now);
                    }
                }
                HostEvent::Press { pressed, cancelled } => {
                    self.apply_press(pressed, cancelled, now);
                }
            }
        }

        self.catch_up(now);

        self.last_now = now;
        self.snapshot()
    }

    /// Run due actions, settle the tracks and update the state at `now`
    fn catch_up(&mut self, now: Timestamp) {
        self.run_due_actions(now);

        for track in &mut self.tracks {
            track.sample(now);
        }
        self.press_scale.sample(now);

        let animating = self.tracks.iter().any(AnimatableTrack::is_animating)
            || self
                .scheduled
                .iter()
                .any(|scheduled| scheduled.generation == self.generation);

        match (self.state, animating) {
            (SparkState::Animating, false) => {
                tracing::debug!(generation = %self.generation, now, "SparkController: settled");
                self.state = SparkState::Idle;
            }
            (SparkState::Idle, true) => self.state = SparkState::Animating,
            _ => {}
        }
    }

    /// The frame at the last `advance` time
    pub fn snapshot(&self) -> FrameSnapshot {
        let now = self.last_now;
        let values = TrackValues::from_fn(|track| self.tracks[track.index()].value_at(now));

        FrameSnapshot {
            generation: self.generation,
            state: self.state,
            checked: self.trigger.checked,
            content_alpha: if self.trigger.enabled {
                1.0
            } else {
                DISABLED_ALPHA
            },
            press_scale: self.press_scale.value_at(now),
            ..FrameSnapshot::assemble(values, &self.geometry, &self.palette)
        }
    }

    fn apply_trigger(&mut self, now: Timestamp) {
        self.trigger.click_count = self.trigger.click_count.saturating_add(1);

        match self.config.mode {
            TriggerMode::Momentary => self.restart(now),
            TriggerMode::Toggle => {
                self.trigger.checked = !self.trigger.checked;
                if self.trigger.checked {
                    self.restart(now);
                } else {
                    self.cancel(now);
                }
            }
        }
    }

    /// Start the choreography for a new generation
    fn restart(&mut self, now: Timestamp) {
        let retrigger = self.state == SparkState::Animating;
        self.generation = self.generation.next();
        self.state = SparkState::Animating;

        tracing::debug!(
            generation = %self.generation,
            now,
            retrigger,
            "SparkController: restart"
        );

        for plan in self.timing.plans() {
            let track = &mut self.tracks[plan.track.index()];
            let start = now.saturating_add(u64::from(plan.delay_ms));

            if retrigger {
                // Continue from the live value; delayed tracks hold it until they start
                if plan.delay_ms == 0 {
                    track.retarget_keyframes(&plan.timeline, now);
                } else {
                    track.freeze(now);
                }
            } else {
                if let Some(value) = plan.snap_on_trigger {
                    track.snap(value);
                }
                if plan.delay_ms == 0 {
                    track.animate_keyframes(plan.timeline.clone(), now);
                }
            }

            if plan.delay_ms > 0 {
                self.scheduled.push(ScheduledAction {
                    generation: self.generation,
                    due: start,
                    action: Action::Start {
                        track: plan.track,
                        rebase: retrigger,
                    },
                });
            }

            if let Some(value) = plan.reset_after {
                self.scheduled.push(ScheduledAction {
                    generation: self.generation,
                    due: now.saturating_add(plan.end_ms()),
                    action: Action::Reset {
                        track: plan.track,
                        value,
                    },
                });
            }
        }
    }

    /// Stop the spark and return every track to rest
    fn cancel(&mut self, now: Timestamp) {
        self.generation = self.generation.next();
        for track in TrackId::ALL {
            self.tracks[track.index()].snap(track.rest_value());
        }
        self.state = SparkState::Idle;

        tracing::debug!(generation = %self.generation, now, "SparkController: cancelled");
    }

    fn apply_press(&mut self, pressed: bool, cancelled: bool, now: Timestamp) {
        if pressed && !cancelled {
            if self.trigger.enabled {
                self.press_scale.retarget_keyframes(&self.press_timeline, now);
            }
        } else {
            self.press_scale.snap(1.0);
        }
    }

    fn run_due_actions(&mut self, now: Timestamp) {
        let mut actions = std::mem::take(&mut self.scheduled);
        actions.sort_by_key(|scheduled| scheduled.due);

        for scheduled in actions {
            if scheduled.due > now {
                self.scheduled.push(scheduled);
                continue;
            }

            if scheduled.generation != self.generation {
                tracing::trace!(
                    stale = %scheduled.generation,
                    current = %self.generation,
                    action = ?scheduled.action,
                    "SparkController: dropping stale action"
                );
                continue;
            }

            match scheduled.action {
                Action::Start { track, rebase } => {
                    if let Some(plan) = self.timing.plan(track) {
                        let target = &mut self.tracks[track.index()];
                        if rebase {
                            target.retarget_keyframes(&plan.timeline, scheduled.due);
                        } else {
                            target.animate_keyframes(plan.timeline.clone(), scheduled.due);
                        }
                    }
                }
                Action::Reset { track, value } => {
                    self.tracks[track.index()].snap(value);
                }
            }
        }
    }
}
