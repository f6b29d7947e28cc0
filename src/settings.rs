//! Game settings and tuning
//!
//! Loaded from JSON by the host; every field falls back to its default.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Number of parallax stars (0 disables the starfield)
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 200,
            QualityPreset::High => 300,
        }
    }

    /// Maximum live particles per emitter (ball, each snake, orb)
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Ball ===
    pub ball_speed: f32,
    pub repel_speed: f32,
    pub max_ball_speed: f32,
    pub max_repel_speed: f32,
    /// Multiplier applied by each speed-up
    pub speed_increase: f32,
    /// Speed the ball up at every level-up
    pub speed_up_on_level_up: bool,

    // === Snakes ===
    /// Keyboard paddle delta per tick
    pub paddle_speed: f32,
    /// Body length as a fraction of one side
    pub paddle_length: f32,
    /// Sample points along each snake body
    pub paddle_samples: usize,

    // === Session ===
    pub initial_lives: u32,
    pub hits_per_level: u32,
    pub countdown_secs: f32,
    pub banner_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            ball_speed: 5.0,
            repel_speed: 8.0,
            max_ball_speed: 12.0,
            max_repel_speed: 15.0,
            speed_increase: 1.1,
            speed_up_on_level_up: true,

            paddle_speed: 5.0,
            paddle_length: 0.5,
            paddle_samples: 20,

            initial_lives: 3,
            hits_per_level: 10,
            countdown_secs: 3.0,
            banner_secs: 2.0,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace unusable values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.ball_speed > 0.0) {
            log::warn!("ball_speed {} is not positive, using {}", self.ball_speed, defaults.ball_speed);
            self.ball_speed = defaults.ball_speed;
        }
        if !(self.repel_speed > 0.0) {
            log::warn!("repel_speed {} is not positive, using {}", self.repel_speed, defaults.repel_speed);
            self.repel_speed = defaults.repel_speed;
        }
        if self.max_ball_speed < self.ball_speed {
            log::warn!("max_ball_speed below ball_speed, raising to {}", self.ball_speed);
            self.max_ball_speed = self.ball_speed;
        }
        if self.max_repel_speed < self.repel_speed {
            log::warn!("max_repel_speed below repel_speed, raising to {}", self.repel_speed);
            self.max_repel_speed = self.repel_speed;
        }
        if !(self.speed_increase >= 1.0) {
            log::warn!("speed_increase {} would slow the ball, using {}", self.speed_increase, defaults.speed_increase);
            self.speed_increase = defaults.speed_increase;
        }
        if !(self.paddle_length > 0.0 && self.paddle_length <= 1.0) {
            log::warn!("paddle_length {} outside (0, 1], using {}", self.paddle_length, defaults.paddle_length);
            self.paddle_length = defaults.paddle_length;
        }
        if self.paddle_samples < 2 {
            log::warn!("paddle_samples {} too small, using {}", self.paddle_samples, defaults.paddle_samples);
            self.paddle_samples = defaults.paddle_samples;
        }
        if self.initial_lives == 0 {
            log::warn!("initial_lives is 0, using {}", defaults.initial_lives);
            self.initial_lives = defaults.initial_lives;
        }
        if self.hits_per_level == 0 {
            log::warn!("hits_per_level is 0, using {}", defaults.hits_per_level);
            self.hits_per_level = defaults.hits_per_level;
        }
        if !(self.countdown_secs >= 0.0) {
            self.countdown_secs = defaults.countdown_secs;
        }
        if !(self.banner_secs >= 0.0) {
            self.banner_secs = defaults.banner_secs;
        }
        self
    }

    pub fn star_count(&self) -> usize {
        self.quality.star_count()
    }

    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "hits_per_level": 4, "quality": "High" }"#).unwrap();
        assert_eq!(settings.hits_per_level, 4);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.initial_lives, 3);
        assert_eq!(settings.paddle_samples, 20);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::from_preset(QualityPreset::Low);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.quality, QualityPreset::Low);
        assert_eq!(back.star_count(), 0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ hits_per_level: }").is_err());
    }

    #[test]
    fn test_validated_repairs_values() {
        let settings = Settings {
            hits_per_level: 0,
            paddle_samples: 1,
            ball_speed: -2.0,
            max_ball_speed: 1.0,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.hits_per_level, 10);
        assert_eq!(settings.paddle_samples, 20);
        assert_eq!(settings.ball_speed, 5.0);
        assert_eq!(settings.max_ball_speed, 5.0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }
}
