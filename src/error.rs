//! Errors from the settings and game stores

use aimcal_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseSettings(#[from] toml::de::Error),

    #[error("Failed to write settings: {0}")]
    WriteSettings(#[from] toml::ser::Error),

    #[error("Game list error: {0}")]
    Games(#[from] serde_json::Error),

    /// Stored values that break the settings contract
    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
