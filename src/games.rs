//! Game list store
//!
//! Measured games are kept as a JSON array of `{ "name": ..., "yaw": ... }`.
//! The virtual cm/360 entry is added on load by [`GameStore::list`] and never
//! written back.

use crate::error::StoreError;
use aimcal_engine::profile::{self, GameProfile};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
    games: Vec<GameProfile>,
}

impl GameStore {
    /// Get the default game list path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aimcal")
            .join("games.json")
    }

    /// Load the game list, or start empty if the file does not exist
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let games = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let games: Vec<GameProfile> = serde_json::from_str(&content)?;
            games.into_iter().filter(|g| !g.is_cm360()).collect()
        } else {
            debug!("No game list at {:?}", path);
            Vec::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            games,
        })
    }

    /// Write the game list back to its file
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.games)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Stored games, without the cm/360 entry
    pub fn stored(&self) -> &[GameProfile] {
        &self.games
    }

    /// Games as offered for selection, cm/360 first
    pub fn list(&self) -> Vec<GameProfile> {
        profile::game_list(&self.games)
    }

    /// Add a game, replacing any entry with the same name
    pub fn add(&mut self, game: GameProfile) -> Result<(), StoreError> {
        game.scale.validate()?;
        if game.is_cm360() {
            return Err(StoreError::Invalid(
                "the cm/360 entry cannot be stored".to_string(),
            ));
        }
        match self
            .games
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(&game.name))
        {
            Some(existing) => {
                info!("Replacing yaw for {}", game.name);
                *existing = game;
            }
            None => self.games.push(game),
        }
        Ok(())
    }

    /// Remove a game by name, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<GameProfile> {
        let index = self
            .games
            .iter()
            .position(|g| g.name.eq_ignore_ascii_case(name))?;
        Some(self.games.remove(index))
    }
}
