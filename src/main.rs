//! aimcal CLI
//!
//! Sensitivity and FOV conversions, measurements and interactive yaw
//! calibration for first-person shooters.

use clap::Parser;

mod cli;
use cli::{Cli, Commands, GamesCommands, SettingsCommands};

mod commands;
use commands::settings::SettingsUpdate;
use commands::Paths;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let paths = Paths::new(cli.config, cli.games);

    match cli.command {
        Commands::Counts { cm360, dpi } => commands::convert::counts(&paths, cm360, dpi)?,
        Commands::Convert {
            from,
            to,
            sens,
            dpi,
            dest_dpi,
        } => commands::convert::convert(&paths, &from, &to, sens, dpi, dest_dpi)?,
        Commands::Fov {
            kind,
            value,
            resolution,
            save,
        } => commands::fov::convert(&paths, kind.into(), value, resolution, save)?,
        Commands::Scoped {
            hipfire_fov,
            scoped_fov,
            plan,
        } => commands::convert::scoped(&paths, hipfire_fov, scoped_fov, plan)?,
        Commands::MeasureFov { counts, resolution } => {
            commands::fov::measure(&paths, counts, resolution)?
        }
        Commands::MeasureCm { counts, dpi, save } => {
            commands::measure::cm360(&paths, counts, dpi, save)?
        }
        Commands::Calibrate { sens } => commands::calibrate::run(&paths, sens).await?,

        // === Game list ===
        Commands::Games(GamesCommands::List) => commands::games::list(&paths)?,
        Commands::Games(GamesCommands::Add { name, yaw }) => {
            commands::games::add(&paths, &name, yaw)?
        }
        Commands::Games(GamesCommands::Remove { name }) => commands::games::remove(&paths, &name)?,

        // === Settings ===
        Commands::Settings(SettingsCommands::Show) => commands::settings::show(&paths)?,
        Commands::Settings(SettingsCommands::Set {
            cm360,
            dpi,
            game_sens,
            normal_fov,
            scoped_fov,
            turn_speed,
            hotkeys,
        }) => commands::settings::set(
            &paths,
            SettingsUpdate {
                cm360,
                dpi,
                game_sens,
                normal_fov,
                scoped_fov,
                turn_speed,
                hotkeys,
            },
        )?,
    }

    Ok(())
}
