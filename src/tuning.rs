//! Data-driven game balance
//!
//! Defaults reproduce the classic feel. Hosts may override any subset of
//! fields with a JSON document; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading tuning or level data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Physics and scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Horizontal velocity multiplier per step with no direction held
    pub friction: f32,
    /// Player run speed (pixels/s)
    pub player_speed: f32,
    /// Initial upward speed of a jump (pixels/s)
    pub jump_force: f32,
    /// Upward speed after stomping an enemy (pixels/s)
    pub stomp_bounce: f32,
    pub coin_points: u64,
    pub power_up_points: u64,
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            friction: 0.8,
            player_speed: 400.0,
            jump_force: 800.0,
            stomp_bounce: 600.0,
            coin_points: 10,
            power_up_points: 50,
            starting_lives: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        positive("player_speed", self.player_speed)?;
        positive("jump_force", self.jump_force)?;
        positive("stomp_bounce", self.stomp_bounce)?;
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(TuningError::OutOfRange {
                field: "friction",
                expected: "within [0, 1]",
                value: self.friction,
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::OutOfRange {
                field: "starting_lives",
                expected: "at least 1",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "finite and positive",
            value,
        })
    }
}
