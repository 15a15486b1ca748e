//! `spark.toml` handling
//!
//! ```toml
//! [spark]
//! primary_color = "#FFC107"
//! secondary_color = "#FF5722"
//! animation_speed = 1.0
//! mode = "momentary"          # or "toggle"
//! preset = "full"             # "without-rings", "classic"
//! size = 48.0                 # or width / height
//!
//! [simulation]
//! fps = 60
//! duration_ms = 1200
//! triggers = [0]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spark_animation::{Choreography, SparkConfig, TriggerMode};
use spark_core::{Color, Size};
use std::fs;
use std::path::Path;

/// Contents of a `spark.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SparkFile {
    #[serde(default)]
    pub spark: SparkSection,
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// `[spark]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct SparkSection {
    #[serde(default = "default_primary")]
    pub primary_color: String,
    #[serde(default = "default_secondary")]
    pub secondary_color: String,
    #[serde(default = "default_speed")]
    pub animation_speed: f32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub mode: TriggerMode,
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Square button extent; `width` / `height` override it per axis
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

fn default_primary() -> String {
    "#FFC107".to_string()
}

fn default_secondary() -> String {
    "#FF5722".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_preset() -> String {
    "full".to_string()
}

fn default_size() -> f32 {
    48.0
}

impl Default for SparkSection {
    fn default() -> Self {
        Self {
            primary_color: default_primary(),
            secondary_color: default_secondary(),
            animation_speed: default_speed(),
            enabled: true,
            mode: TriggerMode::default(),
            preset: default_preset(),
            size: default_size(),
            width: None,
            height: None,
        }
    }
}

/// `[simulation]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationSection {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_duration")]
    pub duration_ms: u64,
    #[serde(default = "default_triggers")]
    pub triggers: Vec<u64>,
}

fn default_fps() -> u32 {
    60
}

fn default_duration() -> u64 {
    1200
}

fn default_triggers() -> Vec<u64> {
    vec![0]
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_ms: default_duration(),
            triggers: default_triggers(),
        }
    }
}

impl SparkFile {
    /// Load from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize spark config")
    }
}

impl SparkSection {
    /// Resolve into a controller configuration
    ///
    /// Only parses; the controller validates speed and colors on creation.
    pub fn to_spark_config(&self) -> Result<SparkConfig> {
        let primary = Color::parse_hex(&self.primary_color).context("Invalid primary_color")?;
        let secondary =
            Color::parse_hex(&self.secondary_color).context("Invalid secondary_color")?;

        let Some(choreography) = Choreography::preset(&self.preset) else {
            anyhow::bail!(
                "Unknown preset '{}'. Valid presets: {:?}",
                self.preset,
                Choreography::PRESETS
            );
        };

        let size = Size::new(
            self.width.unwrap_or(self.size),
            self.height.unwrap_or(self.size),
        );

        Ok(SparkConfig::new()
            .with_colors(primary, secondary)
            .with_animation_speed(self.animation_speed)
            .with_enabled(self.enabled)
            .with_mode(self.mode)
            .with_choreography(choreography)
            .with_button_size(size))
    }
}
