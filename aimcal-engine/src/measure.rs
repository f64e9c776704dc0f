//! Measurement helpers
//!
//! Scoped (zoomed) sensitivity matching, FOV and cm/360 measurement from
//! counted turns, and splitting an automated test turn into small moves.

use crate::error::{finite, positive, EngineError, Result};
use crate::fov::{half_tan, FovKind};
use crate::sensitivity::{TurnRate, FULL_TURN_DEG};

/// Default number of steps for a test turn at turn speed 1.0
const BASE_TURN_STEPS: f64 = 50.0;

/// Counts for a 360° turn while scoped, matched by focal-length scaling.
///
/// Both FOVs must use the same convention (usually horizontal).
pub fn scoped_counts(rate: &TurnRate, hipfire_fov: f64, scoped_fov: f64) -> Result<i64> {
    let hipfire = half_tan("hipfire", hipfire_fov)?;
    let scoped = half_tan("scoped", scoped_fov)?;
    let counts = finite("scoped counts", (rate.counts_per_360() * hipfire / scoped).round())?;
    whole_counts(counts)
}

/// Horizontal FOV from a turn that started at the screen edge and ended on
/// the crosshair (half the FOV), given the counts of a full 360°.
pub fn fov_from_edge_turn(counts_observed: f64, counts_per_360: f64) -> Result<f64> {
    let observed = positive("counts", counts_observed.abs())?;
    let full = positive("counts per 360", counts_per_360)?;
    let fov = 2.0 * FULL_TURN_DEG * observed / full;
    if fov >= 180.0 {
        return Err(EngineError::OutOfRange(format!(
            "measured {} fov of {fov:.2} degrees is not below 180",
            FovKind::Horizontal
        )));
    }
    Ok(fov)
}

/// Convert a rounded count total to an integer, rejecting totals past `i64`
pub(crate) fn whole_counts(counts: f64) -> Result<i64> {
    if counts.abs() < i64::MAX as f64 {
        Ok(counts as i64)
    } else {
        Err(EngineError::OutOfRange(format!(
            "{counts} counts cannot be sent as mouse movement"
        )))
    }
}

/// An automated test turn split into relative mouse moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    steps: Vec<i64>,
}

impl TurnPlan {
    /// Split `counts` into steps of `counts / (50 / turn_speed)`.
    ///
    /// Negative counts turn left. The last step carries the remainder.
    pub fn new(counts: i64, turn_speed: f64) -> Result<Self> {
        let speed = positive("turn speed", turn_speed)?;
        let divisions = ((BASE_TURN_STEPS / speed) as i64).max(1);
        let total = counts.unsigned_abs() as i64;
        let step = (total / divisions).max(1);

        let mut steps = Vec::new();
        let mut remaining = total;
        while remaining > 0 {
            let move_by = remaining.min(step);
            steps.push(move_by * counts.signum());
            remaining -= move_by;
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[i64] {
        &self.steps
    }

    pub fn total(&self) -> i64 {
        self.steps.iter().sum()
    }
}
