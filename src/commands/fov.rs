//! FOV command handlers.

use super::{CommandResult, Paths};
use aimcal_engine::{fov_from_edge_turn, AspectRatio, FovKind, FovTriple};

fn print_triple(triple: &FovTriple) {
    for kind in [FovKind::Horizontal, FovKind::Vertical, FovKind::FourByThree] {
        println!("  {:<11} {:.4}°", kind.to_string(), triple.get(kind));
    }
}

/// Convert a FOV value to all three conventions
pub fn convert(
    paths: &Paths,
    kind: FovKind,
    value: f64,
    resolution: (u32, u32),
    save: bool,
) -> CommandResult {
    let (width, height) = resolution;
    let aspect = AspectRatio::from_resolution(width, height)?;

    let triple = if save {
        let mut session = paths.load_session()?;
        let triple = session.edit_game_fov(kind, value, aspect)?;
        paths.flush(&mut session)?;
        triple
    } else {
        FovTriple::from_edit(kind, value, aspect)?
    };

    println!("{kind} {value}° at {width}x{height}:");
    print_triple(&triple);
    Ok(())
}

/// Horizontal FOV from the counts turned between screen edge and crosshair
pub fn measure(paths: &Paths, counts: f64, resolution: Option<(u32, u32)>) -> CommandResult {
    let session = paths.load_session()?;
    let rate = session.settings().turn_rate()?;
    let horizontal = fov_from_edge_turn(counts, rate.counts_per_360())?;

    match resolution {
        Some((width, height)) => {
            let aspect = AspectRatio::from_resolution(width, height)?;
            println!("Measured FOV at {width}x{height}:");
            print_triple(&FovTriple::from_horizontal(horizontal, aspect)?);
        }
        None => println!("Measured horizontal FOV: {horizontal:.4}°"),
    }
    Ok(())
}
