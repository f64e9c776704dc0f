//! cm/360 measurement command handler.

use super::{CommandResult, Paths};
use aimcal_engine::cm360_from_counts;

/// cm/360 from the counts of one full turn
pub fn cm360(paths: &Paths, counts: f64, dpi: Option<u32>, save: bool) -> CommandResult {
    let mut session = paths.load_session()?;
    let dpi = dpi.unwrap_or(session.settings().dpi);
    let cm360 = cm360_from_counts(counts, dpi)?;
    println!("{counts} counts at {dpi} dpi = {cm360:.4} cm/360");

    if save {
        session.set_cm360(cm360)?;
        session.set_dpi(dpi)?;
        paths.flush(&mut session)?;
    }
    Ok(())
}
