//! Sensitivity conversion command handlers.

use super::{CommandResult, Paths};
use aimcal_engine::profile::find;
use aimcal_engine::{convert_sensitivity, scoped_counts, TurnPlan, TurnRate};
use anyhow::{anyhow, bail};

/// Print counts per 360° for a cm/360 and dpi
pub fn counts(paths: &Paths, cm360: Option<f64>, dpi: Option<u32>) -> CommandResult {
    let session = paths.load_session()?;
    let settings = session.settings();
    let rate = TurnRate::new(dpi.unwrap_or(settings.dpi), cm360.unwrap_or(settings.cm360))?;
    println!(
        "{} cm/360 at {} dpi = {:.2} counts",
        rate.cm360(),
        rate.dpi(),
        rate.counts_per_360()
    );
    Ok(())
}

/// Convert a sensitivity between two games of the list
pub fn convert(
    paths: &Paths,
    from: &str,
    to: &str,
    sens: f64,
    dpi: Option<u32>,
    dest_dpi: Option<u32>,
) -> CommandResult {
    let session = paths.load_session()?;
    let list = paths.load_games()?.list();

    let source = find(&list, from).ok_or_else(|| anyhow!("Unknown game: {from}"))?;
    let dest = find(&list, to).ok_or_else(|| anyhow!("Unknown game: {to}"))?;

    let source_dpi = dpi.unwrap_or(session.settings().dpi);
    let dest_dpi = dest_dpi.unwrap_or(source_dpi);
    let converted = convert_sensitivity(source_dpi, sens, source.scale, dest_dpi, dest.scale)?;

    println!("{} {} -> {} {:.6}", source.name, sens, dest.name, converted);
    Ok(())
}

/// Counts for a scoped 360° and, optionally, the test turn moves
pub fn scoped(
    paths: &Paths,
    hipfire_fov: Option<f64>,
    scoped_fov: Option<f64>,
    plan: bool,
) -> CommandResult {
    let session = paths.load_session()?;
    let settings = session.settings();
    let Some(hipfire) = hipfire_fov.or(settings.normal_fov()) else {
        bail!("No hipfire FOV: pass --hipfire-fov or set normal_fov");
    };
    let Some(scoped) = scoped_fov.or(settings.scoped_fov()) else {
        bail!("No scoped FOV: pass --scoped-fov or set scoped_fov");
    };

    let rate = settings.turn_rate()?;
    let counts = scoped_counts(&rate, hipfire, scoped)?;
    println!(
        "Scoped 360 at {}° (hipfire {}°, {} cm/360): {} counts",
        scoped,
        hipfire,
        rate.cm360(),
        counts
    );

    if plan {
        let turn = TurnPlan::new(counts, settings.app.turn_speed)?;
        println!(
            "Test turn: {} moves, total {} counts",
            turn.steps().len(),
            turn.total()
        );
        for (i, step) in turn.steps().iter().enumerate() {
            println!("  {:3}: {:+}", i + 1, step);
        }
    }
    Ok(())
}
