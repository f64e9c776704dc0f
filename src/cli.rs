// CLI definitions using clap

use aimcal_engine::FovKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aimcal")]
#[command(author, version, about = "Mouse sensitivity, FOV and yaw calibration for FPS games")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: ~/.config/aimcal/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Game list file (default: ~/.config/aimcal/games.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub games: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// FOV convention of a value given on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FovArg {
    #[value(alias = "h", alias = "hor")]
    Horizontal,
    #[value(alias = "v", alias = "vert")]
    Vertical,
    #[value(name = "4:3", alias = "43", alias = "four-by-three")]
    FourByThree,
}

impl From<FovArg> for FovKind {
    fn from(arg: FovArg) -> Self {
        match arg {
            FovArg::Horizontal => FovKind::Horizontal,
            FovArg::Vertical => FovKind::Vertical,
            FovArg::FourByThree => FovKind::FourByThree,
        }
    }
}

/// Parse "1920x1080" into (width, height)
pub fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got \"{s}\""))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    Ok((width, height))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show mouse counts for one 360° turn
    #[command(visible_alias = "c")]
    Counts {
        /// cm/360 (default: stored value)
        #[arg(long)]
        cm360: Option<f64>,
        /// Mouse dpi (default: stored value)
        #[arg(long)]
        dpi: Option<u32>,
    },

    /// Convert a sensitivity from one game to another
    #[command(visible_alias = "conv")]
    Convert {
        /// Source game name ("cm/360" for a cm/360 value)
        #[arg(long)]
        from: String,
        /// Destination game name
        #[arg(long)]
        to: String,
        /// Sensitivity in the source game
        #[arg(long)]
        sens: f64,
        /// Source dpi (default: stored dpi)
        #[arg(long)]
        dpi: Option<u32>,
        /// Destination dpi (default: source dpi)
        #[arg(long)]
        dest_dpi: Option<u32>,
    },

    /// Convert a FOV between horizontal, vertical and 4:3
    Fov {
        /// Convention of the given value
        #[arg(value_enum)]
        kind: FovArg,
        /// FOV in degrees
        value: f64,
        /// Display resolution the game runs at, e.g. 1920x1080
        #[arg(long, short, value_parser = parse_resolution)]
        resolution: (u32, u32),
        /// Store the horizontal value as the game FOV
        #[arg(long)]
        save: bool,
    },

    /// Counts for a scoped 360° matched by focal-length scaling
    Scoped {
        /// Hipfire FOV (default: stored normal_fov)
        #[arg(long)]
        hipfire_fov: Option<f64>,
        /// Scoped FOV (default: stored scoped_fov)
        #[arg(long)]
        scoped_fov: Option<f64>,
        /// Also print the mouse moves of an automated test turn
        #[arg(long)]
        plan: bool,
    },

    /// Horizontal FOV from counts turned between screen edge and crosshair
    MeasureFov {
        /// Counts of the edge-to-crosshair turn
        counts: f64,
        /// Display resolution, to also print vertical and 4:3 values
        #[arg(long, short, value_parser = parse_resolution)]
        resolution: Option<(u32, u32)>,
    },

    /// cm/360 from counts measured over one full turn
    MeasureCm {
        /// Counts of the 360° turn
        counts: f64,
        /// Mouse dpi (default: stored dpi)
        #[arg(long)]
        dpi: Option<u32>,
        /// Store the result as the cm/360 setting
        #[arg(long)]
        save: bool,
    },

    /// Interactive yaw calibration (reads commands from stdin)
    #[command(visible_alias = "cal")]
    Calibrate {
        /// Trial sensitivity set in the game
        #[arg(long)]
        sens: f64,
    },

    /// Manage the list of measured games
    #[command(subcommand, visible_alias = "g")]
    Games(GamesCommands),

    /// Show or change settings
    #[command(subcommand, visible_alias = "s")]
    Settings(SettingsCommands),
}

#[derive(Subcommand)]
pub enum GamesCommands {
    /// List games with their yaw
    #[command(visible_alias = "ls")]
    List,
    /// Add or replace a game with a known yaw
    Add { name: String, yaw: f64 },
    /// Remove a game
    #[command(visible_alias = "rm")]
    Remove { name: String },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        cm360: Option<f64>,
        #[arg(long)]
        dpi: Option<u32>,
        #[arg(long)]
        game_sens: Option<f64>,
        #[arg(long)]
        normal_fov: Option<f64>,
        #[arg(long)]
        scoped_fov: Option<f64>,
        #[arg(long)]
        turn_speed: Option<f64>,
        /// Comma-separated hotkey names, e.g. F1,F2,F3,F4
        #[arg(long, value_delimiter = ',')]
        hotkeys: Option<Vec<String>>,
    },
}
