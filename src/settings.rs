//! Game settings
//!
//! One immutable settings object is built at startup and shared by every
//! simulation component. Defaults match the tuned values of the shipped game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Gameplay and layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Scaling factor applied to sprite dimensions
    pub entity_scale: f32,

    // === Difficulty ===
    /// Vertical unit divisor. Fish move `height / divisor` per unit of dt,
    /// so smaller numbers mean faster fish.
    pub v_unit_divisor: f32,
    /// Subtracted from the divisor on every difficulty increase
    pub v_unit_step: f32,
    /// Floor for the divisor
    pub min_v_unit_divisor: f32,
    /// Benign catches needed per difficulty increase
    pub fish_before_difficulty_increase: u32,
    /// Maximum number of difficulty increases in a session
    pub max_difficulty_increases: u32,
    /// Benign misses allowed before the game is lost
    pub game_over_threshold: u32,

    // === Fish ===
    /// Unscaled fish sprite width
    pub fish_width: f32,
    /// Unscaled fish sprite height
    pub fish_height: f32,
    /// Vertical spacing between pattern rows
    pub fish_spacing_y: f32,
    /// Depth of the band below the top of the screen that must contain a
    /// fish, otherwise a new pattern spawns
    pub spawn_band: f32,

    // === Net ===
    /// Unscaled net sprite width
    pub net_width: f32,
    /// Unscaled net sprite height
    pub net_height: f32,

    /// Fixed RNG seed for reproducible sessions (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            entity_scale: 0.15,

            v_unit_divisor: 500.0,
            v_unit_step: 50.0,
            min_v_unit_divisor: 200.0,
            fish_before_difficulty_increase: 10,
            max_difficulty_increases: 6,
            game_over_threshold: 3,

            fish_width: 537.0,
            fish_height: 648.0,
            fish_spacing_y: 250.0,
            spawn_band: 100.0,

            net_width: 537.0,
            net_height: 339.0,

            seed: None,
        }
    }
}

impl Settings {
    /// Default settings for a given screen size
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A single horizontal unit
    pub fn h_unit(&self) -> f32 {
        self.width / 100.0
    }

    /// A single vertical unit at the starting divisor
    pub fn v_unit(&self) -> f32 {
        self.height / self.v_unit_divisor
    }

    /// Scaled fish size
    pub fn fish_size(&self) -> Vec2 {
        Vec2::new(self.fish_width, self.fish_height) * self.entity_scale
    }

    /// Scaled net size
    pub fn net_size(&self) -> Vec2 {
        Vec2::new(self.net_width, self.net_height) * self.entity_scale
    }

    /// Y of the off-screen spawn line (one fish height above the top)
    pub fn fish_spawn_y(&self) -> f32 {
        -self.fish_size().y
    }

    pub fn initial_fish_speed(&self) -> f32 {
        self.v_unit()
    }

    pub fn initial_net_speed(&self) -> f32 {
        self.h_unit()
    }

    pub fn max_net_speed(&self) -> f32 {
        self.h_unit() * 2.0
    }

    /// Net starts centred horizontally, resting on the bottom edge
    pub fn net_start(&self) -> Vec2 {
        let size = self.net_size();
        Vec2::new(self.width / 2.0 - size.x / 2.0, self.height - size.y)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SettingsError::Invalid("screen dimensions must be positive"));
        }
        if !(self.entity_scale > 0.0) {
            return Err(SettingsError::Invalid("entity scale must be positive"));
        }
        if !(self.min_v_unit_divisor > 0.0) {
            return Err(SettingsError::Invalid("minimum divisor must be positive"));
        }
        if self.min_v_unit_divisor > self.v_unit_divisor {
            return Err(SettingsError::Invalid(
                "minimum divisor exceeds the starting divisor",
            ));
        }
        if !(self.v_unit_step > 0.0) {
            return Err(SettingsError::Invalid("divisor step must be positive"));
        }
        if self.fish_before_difficulty_increase == 0 {
            return Err(SettingsError::Invalid(
                "fish per difficulty increase must be non-zero",
            ));
        }
        if self.game_over_threshold == 0 {
            return Err(SettingsError::Invalid("game over threshold must be non-zero"));
        }
        if !(self.fish_width > 0.0 && self.fish_height > 0.0) {
            return Err(SettingsError::Invalid("fish size must be positive"));
        }
        if !(self.fish_spacing_y >= 0.0) {
            return Err(SettingsError::Invalid("fish row spacing must not be negative"));
        }
        // Freshly spawned fish must land inside the band or every update
        // would spawn another pattern
        if !(self.spawn_band > self.fish_spawn_y()) {
            return Err(SettingsError::Invalid("spawn band must lie below the spawn line"));
        }
        if !(self.net_width > 0.0 && self.net_height > 0.0) {
            return Err(SettingsError::Invalid("net size must be positive"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
