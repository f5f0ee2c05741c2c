//! Engine configuration.
//!
//! Everything the caller supplies at construction: the two block colors,
//! wiper speed, base fall wait, pixel offset of the play-field and the
//! layout RNG seed. Configs can be built in code or read from TOML; missing
//! keys fall back to the defaults below.
//!
//! ```toml
//! wiper_speed = 125.0
//! fall_wait = 1.5
//! x_offset = 40
//! y_offset = 130
//!
//! [palette]
//! primary = { r = 255, g = 0, b = 0 }
//! secondary = { r = 255, g = 255, b = 255 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Rgb, DEFAULT_FALL_WAIT, DEFAULT_WIPER_SPEED};

/// The two colors every tile is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb::RED,
            secondary: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub palette: Palette,
    /// Wiper speed in pixels per second
    pub wiper_speed: f32,
    /// Seconds between one-row falls of the active block
    pub fall_wait: f32,
    /// Pixel x of the play-field's left edge
    pub x_offset: i32,
    /// Pixel y of the play-field's top (visible) edge
    pub y_offset: i32,
    /// Seed for the layout RNG
    pub seed: u32,
    /// Start the layout queue with the fixed `[1, 2, 6, 1]` sequence
    pub seeded_queue: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            wiper_speed: DEFAULT_WIPER_SPEED,
            fall_wait: DEFAULT_FALL_WAIT,
            x_offset: 40,
            y_offset: 130,
            seed: 1,
            seeded_queue: true,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wiper_speed.is_finite() || self.wiper_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "wiper_speed must be a non-negative number, got {}",
                self.wiper_speed
            )));
        }
        if !self.fall_wait.is_finite() || self.fall_wait < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fall_wait must be a non-negative number, got {}",
                self.fall_wait
            )));
        }
        Ok(())
    }
}
