//! Game configuration
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, Result};

/// Environment variable naming a JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "MAZE_BALL_CONFIG";

/// Grid, viewport and physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns
    pub cells_horizontal: usize,
    /// Number of rows
    pub cells_vertical: usize,
    /// Play field width in pixels
    pub width: f32,
    /// Play field height in pixels
    pub height: f32,
    /// Fixed RNG seed; a fresh entropy seed is drawn when absent
    pub seed: Option<u64>,
    /// Velocity change per key press (px/s)
    pub velocity_step: f32,
    /// Gravity switched on when the goal is reached (px/s²)
    pub win_gravity: f32,
    /// Fraction of velocity lost per step
    pub air_friction: f32,
    /// Bounce off walls and borders (0 = ball stops dead)
    pub restitution: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cells_horizontal: CELLS_HORIZONTAL,
            cells_vertical: CELLS_VERTICAL,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            velocity_step: VELOCITY_STEP,
            win_gravity: WIN_GRAVITY,
            air_friction: AIR_FRICTION,
            restitution: RESTITUTION,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from `MAZE_BALL_CONFIG` if set and valid, defaults otherwise
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", CONFIG_ENV_VAR, e);
                Self::default()
            }),
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Same config sized to a different viewport
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured seed, or a fresh one from entropy
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(crate::entropy_seed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cells_horizontal == 0 || self.cells_vertical == 0 {
            return Err(MazeError::Config(format!(
                "grid must be at least 1x1 (got {}x{})",
                self.cells_horizontal, self.cells_vertical
            )));
        }
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(MazeError::Config(format!(
                "viewport must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        if !self.velocity_step.is_finite() || self.velocity_step <= 0.0 {
            return Err(MazeError::Config(format!(
                "velocity_step must be positive (got {})",
                self.velocity_step
            )));
        }
        if !self.win_gravity.is_finite() {
            return Err(MazeError::Config("win_gravity must be finite".into()));
        }
        if !(0.0..1.0).contains(&self.air_friction) {
            return Err(MazeError::Config(format!(
                "air_friction must be in [0, 1) (got {})",
                self.air_friction
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(MazeError::Config(format!(
                "restitution must be in [0, 1] (got {})",
                self.restitution
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cells_horizontal, 20);
        assert_eq!(config.cells_vertical, 16);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "cells_horizontal": 8, "seed": 42 }"#).unwrap();
        assert_eq!(config.cells_horizontal, 8);
        assert_eq!(config.cells_vertical, CELLS_VERTICAL);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolved_seed(), 42);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default().with_seed(7).with_viewport(400.0, 300.0);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "cells_vertical": 0 }"#),
            Err(MazeError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": -5.0 }"#),
            Err(MazeError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "air_friction": 1.0 }"#),
            Err(MazeError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "restitution": 1.5 }"#),
            Err(MazeError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(MazeError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MazeError::Io(_)));
    }
}
