//! User settings
//!
//! Stored as TOML. Optional values use `0` for "unset", so a file written by
//! an older version (or by hand) with missing fields still loads.

use crate::error::StoreError;
use aimcal_engine::error::{fov_angle, positive};
use aimcal_engine::{EngineError, TurnRate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Speed multiplier for automated test turns
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f64,
    /// Hotkey names, in action order (measure, turn, under, over)
    #[serde(default = "default_hotkeys")]
    pub hotkeys: Vec<String>,
}

fn default_turn_speed() -> f64 {
    1.0
}

fn default_hotkeys() -> Vec<String> {
    ["F1", "F2", "F3", "F4"].iter().map(|k| k.to_string()).collect()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            turn_speed: default_turn_speed(),
            hotkeys: default_hotkeys(),
        }
    }
}

/// Mouse and game values shared by every view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Target cm per 360° turn
    #[serde(default = "default_cm360")]
    pub cm360: f64,
    /// Mouse dpi
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Sensitivity of the game being measured (0 = unset)
    #[serde(default)]
    pub game_sens: f64,
    /// Horizontal FOV of the game being measured (0 = unset)
    #[serde(default)]
    pub game_fov: f64,
    /// Hipfire FOV for scoped matching (0 = unset)
    #[serde(default)]
    pub normal_fov: f64,
    /// Scoped FOV for scoped matching (0 = unset)
    #[serde(default)]
    pub scoped_fov: f64,
    #[serde(default)]
    pub app: AppSettings,
}

fn default_cm360() -> f64 {
    30.0
}

fn default_dpi() -> u32 {
    800
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cm360: default_cm360(),
            dpi: default_dpi(),
            game_sens: 0.0,
            game_fov: 0.0,
            normal_fov: 0.0,
            scoped_fov: 0.0,
            app: AppSettings::default(),
        }
    }
}

/// Treat zero (or anything non-positive) as unset
fn set(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aimcal")
            .join("settings.toml")
    }

    /// Load settings from a file, or return defaults if not found
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&content)?;
        if settings.app.hotkeys.is_empty() {
            warn!("Settings had no hotkeys, restoring defaults");
            settings.app.hotkeys = default_hotkeys();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the stored values against the settings contract.
    ///
    /// Optional values must be exactly `0` (unset) or valid; NaN, infinities
    /// and negatives are rejected.
    pub fn validate(&self) -> Result<(), StoreError> {
        let invalid = |e: EngineError| StoreError::Invalid(e.to_string());
        self.turn_rate().map_err(invalid)?;
        if self.game_sens != 0.0 {
            positive("game_sens", self.game_sens).map_err(invalid)?;
        }
        for (name, fov) in [
            ("game_fov", self.game_fov),
            ("normal_fov", self.normal_fov),
            ("scoped_fov", self.scoped_fov),
        ] {
            if fov != 0.0 {
                fov_angle(name, fov).map_err(invalid)?;
            }
        }
        positive("turn_speed", self.app.turn_speed).map_err(invalid)?;
        Ok(())
    }

    /// Turn rate from the stored cm/360 and dpi
    pub fn turn_rate(&self) -> Result<TurnRate, EngineError> {
        TurnRate::new(self.dpi, self.cm360)
    }

    pub fn game_sens(&self) -> Option<f64> {
        set(self.game_sens)
    }

    pub fn game_fov(&self) -> Option<f64> {
        set(self.game_fov)
    }

    pub fn normal_fov(&self) -> Option<f64> {
        set(self.normal_fov)
    }

    pub fn scoped_fov(&self) -> Option<f64> {
        set(self.scoped_fov)
    }
}
