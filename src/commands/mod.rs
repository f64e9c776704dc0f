//! Command handlers for the CLI application.
//!
//! - `convert`: counts, convert, scoped
//! - `fov`: fov conversion and edge-turn measurement
//! - `measure`: cm/360 from a measured turn
//! - `games`: game list management
//! - `settings`: show and set stored values
//! - `calibrate`: interactive yaw calibration

pub mod calibrate;
pub mod convert;
pub mod fov;
pub mod games;
pub mod measure;
pub mod settings;

use aimcal::{GameStore, Session, Settings};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Files the commands read and write
#[derive(Debug, Clone)]
pub struct Paths {
    pub settings: PathBuf,
    pub games: PathBuf,
}

impl Paths {
    pub fn new(settings: Option<PathBuf>, games: Option<PathBuf>) -> Self {
        Self {
            settings: settings.unwrap_or_else(Settings::default_path),
            games: games.unwrap_or_else(GameStore::default_path),
        }
    }

    pub fn load_session(&self) -> anyhow::Result<Session> {
        info!("Loading settings from {:?}", self.settings);
        let settings = Settings::load(&self.settings)
            .with_context(|| format!("loading {}", self.settings.display()))?;
        Ok(Session::new(settings))
    }

    pub fn load_games(&self) -> anyhow::Result<GameStore> {
        GameStore::load(&self.games).with_context(|| format!("loading {}", self.games.display()))
    }

    /// Write the session's settings if anything changed
    pub fn flush(&self, session: &mut Session) -> CommandResult {
        if session
            .flush(&self.settings)
            .with_context(|| format!("writing {}", self.settings.display()))?
        {
            println!("Saved settings to {}", self.settings.display());
        }
        Ok(())
    }
}
