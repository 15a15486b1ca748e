//! Spark button configuration

use spark_core::{Color, Size};

use crate::choreography::Choreography;
use crate::error::{AnimationError, Result};

/// Default primary dot color (amber)
pub const DEFAULT_PRIMARY: u32 = 0xFFC107;

/// Default secondary dot color (deep orange)
pub const DEFAULT_SECONDARY: u32 = 0xFF5722;

/// Default button extent in logical pixels
pub const DEFAULT_BUTTON_SIZE: f32 = 48.0;

/// How a trigger affects the button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TriggerMode {
    /// Every trigger plays the spark
    #[default]
    Momentary,
    /// Triggers flip the checked state; only checking plays the spark
    Toggle,
}

/// Settings for one spark button
///
/// Everything except `enabled` is fixed once a controller has been built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparkConfig {
    pub primary_color: Color,
    pub secondary_color: Color,
    /// Playback speed multiplier; 1.0 is a one second cycle
    pub animation_speed: f32,
    pub enabled: bool,
    pub mode: TriggerMode,
    pub choreography: Choreography,
    /// Button bounds the spark geometry is derived from
    pub button_size: Size,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            primary_color: Color::from_hex(DEFAULT_PRIMARY),
            secondary_color: Color::from_hex(DEFAULT_SECONDARY),
            animation_speed: 1.0,
            enabled: true,
            mode: TriggerMode::Momentary,
            choreography: Choreography::full(),
            button_size: Size::square(DEFAULT_BUTTON_SIZE),
        }
    }
}

impl SparkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(mut self, primary: Color, secondary: Color) -> Self {
        self.primary_color = primary;
        self.secondary_color = secondary;
        self
    }

    pub fn with_animation_speed(mut self, speed: f32) -> Self {
        self.animation_speed = speed;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_choreography(mut self, choreography: Choreography) -> Self {
        self.choreography = choreography;
        self
    }

    pub fn with_button_size(mut self, size: Size) -> Self {
        self.button_size = size;
        self
    }

    /// Check the settings a controller cannot be built without
    pub fn validate(&self) -> Result<()> {
        if !self.animation_speed.is_finite() || self.animation_speed <= 0.0 {
            return Err(AnimationError::InvalidSpeed(self.animation_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SparkConfig::default();
        assert_eq!(config.primary_color, Color::from_hex(0xFFC107));
        assert_eq!(config.secondary_color, Color::from_hex(0xFF5722));
        assert_eq!(config.animation_speed, 1.0);
        assert!(config.enabled);
        assert_eq!(config.mode, TriggerMode::Momentary);
        assert_eq!(config.choreography, Choreography::full());
        assert_eq!(config.button_size, Size::square(48.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SparkConfig::new()
            .with_animation_speed(2.0)
            .with_mode(TriggerMode::Toggle)
            .with_enabled(false)
            .with_choreography(Choreography::classic())
            .with_button_size(Size::new(32.0, 24.0));

        assert_eq!(config.animation_speed, 2.0);
        assert_eq!(config.mode, TriggerMode::Toggle);
        assert!(!config.enabled);
        assert!(config.choreography.classic_timing);
        assert_eq!(config.button_size.max_dimension(), 32.0);
    }

    #[test]
    fn test_validate_speed() {
        for speed in [0.0, -0.5, f32::NAN] {
            let config = SparkConfig::new().with_animation_speed(speed);
            assert!(matches!(
                config.validate(),
                Err(AnimationError::InvalidSpeed(_))
            ));
        }
        assert!(SparkConfig::new().with_animation_speed(0.25).validate().is_ok());
    }
}
