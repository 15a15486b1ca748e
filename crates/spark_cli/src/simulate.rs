//! Frame-clock simulation
//!
//! Drives a [`SparkController`] the way a host would: one `advance` per frame
//! on a fixed frame clock, with triggers fired at given times.

use anyhow::Result;
use serde::Serialize;
use spark_animation::{FrameSnapshot, SparkController, SparkState, Timestamp};

/// Simulation settings
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub fps: u32,
    pub duration_ms: u64,
    /// Trigger times in milliseconds
    pub triggers: Vec<u64>,
}

/// One simulated frame
#[derive(Clone, Debug, Serialize)]
pub struct SimulatedFrame {
    pub time_ms: Timestamp,
    pub frame: FrameSnapshot,
}

impl Simulation {
    /// Frame times from 0 up to and including the duration
    pub fn frame_times(&self) -> Result<Vec<Timestamp>> {
        if self.fps == 0 {
            anyhow::bail!("fps must be larger than 0");
        }

        let fps = u64::from(self.fps);
        let mut times: Vec<Timestamp> = (0..)
            .map(|frame: u64| frame * 1000 / fps)
            .take_while(|&t| t <= self.duration_ms)
            .collect();
        if times.last() != Some(&self.duration_ms) {
            times.push(self.duration_ms);
        }
        Ok(times)
    }

    /// Run the controller over the frame clock
    pub fn run(&self, spark: &mut SparkController) -> Result<Vec<SimulatedFrame>> {
        let mut triggers = self.triggers.clone();
        triggers.sort_unstable();
        let mut pending = triggers.into_iter().peekable();

        let mut frames = Vec::new();
        for time_ms in self.frame_times()? {
            while let Some(at) = pending.next_if(|&at| at <= time_ms) {
                if !spark.trigger_at(at) {
                    tracing::info!(at, "trigger refused: button is disabled");
                }
            }

            frames.push(SimulatedFrame {
                time_ms,
                frame: spark.advance(time_ms),
            });
        }

        for at in pending {
            tracing::warn!(at, "trigger after the end of the simulation was not fired");
        }

        Ok(frames)
    }
}

/// Header matching [`table_row`]
pub fn table_header() -> String {
    format!(
        "{:>6}  {:<9}  {:>3}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {}",
        "t_ms", "state", "gen", "scale", "press", "dots", "large", "small", "outer", "inner", "ring"
    )
}

/// One fixed-width table line
pub fn table_row(frame: &SimulatedFrame) -> String {
    let snapshot = &frame.frame;
    let values = &snapshot.values;
    let state = match snapshot.state {
        SparkState::Idle => "idle",
        SparkState::Animating => "animating",
    };
    let ring = snapshot.center_ring.map_or_else(
        || "-".to_string(),
        |ring| format!("r={:.2} w={:.2} {}", ring.radius, ring.width, ring.color.to_hex_string()),
    );

    format!(
        "{:>6}  {:<9}  {:>3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {}",
        frame.time_ms,
        state,
        snapshot.generation,
        values.content_scale,
        snapshot.press_scale,
        values.dots_radius_progress,
        values.large_dot_size_progress,
        values.small_dot_size_progress,
        values.outer_circle_progress,
        values.inner_circle_progress,
        ring
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::Color;

    fn spark() -> SparkController {
        SparkController::create(Color::from_hex(0xFFC107), Color::from_hex(0xFF5722), 1.0)
            .unwrap()
    }

    #[test]
    fn test_frame_times() {
        let sim = Simulation {
            fps: 60,
            duration_ms: 100,
            triggers: vec![],
        };
        let times = sim.frame_times().unwrap();
        assert_eq!(&times[..4], &[0, 16, 33, 50]);
        assert_eq!(times.last(), Some(&100));

        let exact = Simulation {
            fps: 10,
            duration_ms: 300,
            triggers: vec![],
        };
        assert_eq!(exact.frame_times().unwrap(), vec![0, 100, 200, 300]);

        let broken = Simulation { fps: 0, ..exact };
        assert!(broken.frame_times().is_err());
    }

    #[test]
    fn test_run_plays_and_settles() {
        let sim = Simulation {
            fps: 20,
            duration_ms: 1200,
            triggers: vec![0],
        };
        let frames = sim.run(&mut spark()).unwrap();

        assert_eq!(frames[0].frame.state, SparkState::Animating);
        assert_eq!(frames[0].frame.values.content_scale, 0.0);
        let last = frames.last().unwrap();
        assert_eq!(last.time_ms, 1200);
        assert_eq!(last.frame.state, SparkState::Idle);
    }

    #[test]
    fn test_triggers_fire_at_their_time() {
        let sim = Simulation {
            fps: 10,
            duration_ms: 500,
            triggers: vec![250, 50],
        };
        let frames = sim.run(&mut spark()).unwrap();

        // First trigger lands between frames 0 and 100
        assert_eq!(frames[0].frame.state, SparkState::Idle);
        assert_eq!(frames[1].frame.generation.0, 1);
        assert_eq!(frames[3].frame.generation.0, 2);
    }

    #[test]
    fn test_frames_serialize_to_json() {
        let sim = Simulation {
            fps: 10,
            duration_ms: 100,
            triggers: vec![0],
        };
        let frames = sim.run(&mut spark()).unwrap();
        let json = serde_json::to_value(&frames[1]).unwrap();

        assert_eq!(json["time_ms"], 100);
        assert_eq!(json["frame"]["state"], "animating");
        assert_eq!(json["frame"]["outer_dots"]["dots"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_table_row_columns() {
        let sim = Simulation {
            fps: 10,
            duration_ms: 0,
            triggers: vec![],
        };
        let frames = sim.run(&mut spark()).unwrap();
        let row = table_row(&frames[0]);

        assert!(row.contains("idle"));
        assert!(row.ends_with('-'));
        assert_eq!(
            table_header().split_whitespace().count(),
            row.split_whitespace().count()
        );
    }
}
