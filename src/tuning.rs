//! Data-driven game balance
//!
//! Every session starts from [`Tuning::default`]. A JSON file can override
//! any subset of fields for experimentation; missing fields keep defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while building a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field dimensions must be positive, got {width}x{height}")]
    NonPositiveField { width: f32, height: f32 },
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bird_width: f32,
    pub bird_height: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub pipe_baseline_y: f32,
    /// Signed, negative scrolls left
    pub base_scroll_speed: f32,
    pub speed_up_per_point: f32,
    pub max_speed_factor: f32,
    pub gravity: f32,
    /// Signed, negative is up
    pub jump_velocity: f32,
    pub spawn_interval_secs: f32,
    /// Board width as a fraction of viewport height
    pub board_aspect: f32,
    /// Minimum gap between a jump and the next tilt jump
    pub tilt_cooldown_ms: f64,
    /// Total acceleration (m/s²) that counts as a shake
    pub tilt_total_threshold: f32,
    /// Vertical acceleration (m/s²) that counts as a tilt
    pub tilt_y_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_baseline_y: PIPE_BASELINE_Y,
            base_scroll_speed: BASE_SCROLL_SPEED,
            speed_up_per_point: SPEED_UP_PER_POINT,
            max_speed_factor: MAX_SPEED_FACTOR,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            board_aspect: BOARD_ASPECT,
            tilt_cooldown_ms: TILT_COOLDOWN_MS,
            tilt_total_threshold: TILT_TOTAL_THRESHOLD,
            tilt_y_threshold: TILT_Y_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("board_aspect", self.board_aspect),
            ("tilt_total_threshold", self.tilt_total_threshold),
            ("tilt_y_threshold", self.tilt_y_threshold),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        if !self.jump_velocity.is_finite() || self.jump_velocity >= 0.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "jump_velocity must be negative (upward), got {}",
                self.jump_velocity
            )));
        }
        if !self.base_scroll_speed.is_finite() || self.base_scroll_speed >= 0.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "base_scroll_speed must be negative (leftward), got {}",
                self.base_scroll_speed
            )));
        }
        if !self.speed_up_per_point.is_finite() || self.speed_up_per_point < 0.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "speed_up_per_point must be non-negative, got {}",
                self.speed_up_per_point
            )));
        }
        if !self.max_speed_factor.is_finite() || self.max_speed_factor < 1.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "max_speed_factor must be at least 1, got {}",
                self.max_speed_factor
            )));
        }
        if !self.tilt_cooldown_ms.is_finite() || self.tilt_cooldown_ms < 0.0 {
            return Err(ConfigError::InvalidTuning(format!(
                "tilt_cooldown_ms must be non-negative, got {}",
                self.tilt_cooldown_ms
            )));
        }
        if !self.pipe_baseline_y.is_finite() {
            return Err(ConfigError::InvalidTuning("pipe_baseline_y must be finite".into()));
        }

        Ok(())
    }
}
