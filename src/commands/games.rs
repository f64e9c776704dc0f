//! Game list command handlers.

use super::{CommandResult, Paths};
use aimcal_engine::GameProfile;
use anyhow::bail;

/// List games, cm/360 first
pub fn list(paths: &Paths) -> CommandResult {
    let store = paths.load_games()?;
    for game in store.list() {
        match game.scale.yaw() {
            Some(yaw) => println!("  {:<24} {}", game.name, yaw),
            None => println!("  {:<24} -", game.name),
        }
    }
    Ok(())
}

/// Add or replace a game
pub fn add(paths: &Paths, name: &str, yaw: f64) -> CommandResult {
    let mut store = paths.load_games()?;
    store.add(GameProfile::new(name, yaw)?)?;
    store.save()?;
    println!("Stored {name} (yaw {yaw})");
    Ok(())
}

/// Remove a game
pub fn remove(paths: &Paths, name: &str) -> CommandResult {
    let mut store = paths.load_games()?;
    let Some(removed) = store.remove(name) else {
        bail!("Unknown game: {name}");
    };
    store.save()?;
    println!("Removed {}", removed.name);
    Ok(())
}
