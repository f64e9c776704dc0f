//! Settings command handlers.

use super::{CommandResult, Paths};
use aimcal::Session;

fn show_value(name: &str, value: Option<f64>) {
    match value {
        Some(v) => println!("  {name:<12} {v}"),
        None => println!("  {name:<12} (unset)"),
    }
}

/// Print the current settings
pub fn show(paths: &Paths) -> CommandResult {
    let session = paths.load_session()?;
    let settings = session.settings();
    println!("Settings ({}):", paths.settings.display());
    println!("  {:<12} {}", "cm360", settings.cm360);
    println!("  {:<12} {}", "dpi", settings.dpi);
    show_value("game_sens", settings.game_sens());
    show_value("game_fov", settings.game_fov());
    show_value("normal_fov", settings.normal_fov());
    show_value("scoped_fov", settings.scoped_fov());
    println!("  {:<12} {}", "turn_speed", settings.app.turn_speed);
    println!("  {:<12} {}", "hotkeys", settings.app.hotkeys.join(","));
    if let Ok(rate) = settings.turn_rate() {
        println!("  {:<12} {:.2}", "counts/360", rate.counts_per_360());
    }
    Ok(())
}

/// Values accepted by `settings set`
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub cm360: Option<f64>,
    pub dpi: Option<u32>,
    pub game_sens: Option<f64>,
    pub normal_fov: Option<f64>,
    pub scoped_fov: Option<f64>,
    pub turn_speed: Option<f64>,
    pub hotkeys: Option<Vec<String>>,
}

/// Apply every given value; the first invalid one aborts before writing
pub fn apply_update(session: &mut Session, update: SettingsUpdate) -> anyhow::Result<()> {
    if let Some(v) = update.cm360 {
        session.set_cm360(v)?;
    }
    if let Some(v) = update.dpi {
        session.set_dpi(v)?;
    }
    if let Some(v) = update.game_sens {
        session.set_game_sens(v)?;
    }
    if let Some(v) = update.normal_fov {
        session.set_normal_fov(v)?;
    }
    if let Some(v) = update.scoped_fov {
        session.set_scoped_fov(v)?;
    }
    if let Some(v) = update.turn_speed {
        session.set_turn_speed(v)?;
    }
    if let Some(v) = update.hotkeys {
        session.set_hotkeys(v)?;
    }
    Ok(())
}

/// Change settings and write them
pub fn set(paths: &Paths, update: SettingsUpdate) -> CommandResult {
    let mut session = paths.load_session()?;
    apply_update(&mut session, update)?;
    if !session.is_dirty() {
        println!("Nothing to change");
        return Ok(());
    }
    paths.flush(&mut session)
}
