//! Turning-rate conversions
//!
//! Everything is normalized to raw mouse counts per 360° turn:
//!
//! - cm/360 at a given dpi: `counts = cm360 * dpi / 2.54`
//! - a yaw-based game:      `counts = 360 / (sensitivity * yaw)`

use crate::error::{finite, positive, positive_dpi, Result};
use crate::profile::Scale;
use tracing::trace;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Degrees in a full turn
pub const FULL_TURN_DEG: f64 = 360.0;

/// Physical turn distance of a mouse at a given dpi
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnRate {
    dpi: u32,
    cm360: f64,
}

impl TurnRate {
    /// Create a turn rate, rejecting zero dpi, non-positive cm/360 and
    /// combinations whose count total is not a finite positive number
    pub fn new(dpi: u32, cm360: f64) -> Result<Self> {
        let dpi_f = positive_dpi(dpi)?;
        positive("cm360", cm360)?;
        positive("counts per 360", cm360 * dpi_f / CM_PER_INCH)?;
        Ok(Self { dpi, cm360 })
    }

    /// Turn rate implied by a measured count total for one 360° turn
    pub fn from_counts(counts_per_360: f64, dpi: u32) -> Result<Self> {
        let cm360 = cm360_from_counts(counts_per_360, dpi)?;
        Self::new(dpi, cm360)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn cm360(&self) -> f64 {
        self.cm360
    }

    /// Raw counts needed for one 360° turn
    pub fn counts_per_360(&self) -> f64 {
        self.cm360 * f64::from(self.dpi) / CM_PER_INCH
    }

    /// In-game sensitivity that reproduces this turn rate
    pub fn sensitivity_for(&self, scale: Scale) -> Result<f64> {
        match scale {
            Scale::Cm360 => Ok(self.cm360),
            Scale::Yaw(yaw) => sensitivity_for(self.counts_per_360(), yaw),
        }
    }
}

/// Counts per 360° for a cm/360 value at a given dpi
pub fn counts_per_360(dpi: u32, cm360: f64) -> Result<f64> {
    Ok(TurnRate::new(dpi, cm360)?.counts_per_360())
}

/// cm/360 for a counted turn at a given dpi
pub fn cm360_from_counts(counts_per_360: f64, dpi: u32) -> Result<f64> {
    let dpi = positive_dpi(dpi)?;
    let counts = positive("counts", counts_per_360)?;
    positive("cm360", CM_PER_INCH * counts / dpi)
}

/// Sensitivity that makes a game with `yaw` turn 360° in `counts_per_360` counts
pub fn sensitivity_for(counts_per_360: f64, yaw: f64) -> Result<f64> {
    let counts = positive("counts", counts_per_360)?;
    let yaw = positive("yaw", yaw)?;
    finite("sensitivity", FULL_TURN_DEG / (counts * yaw))
}

/// Counts a game with `yaw` needs for 360° at `sensitivity`
pub fn counts_for(sensitivity: f64, yaw: f64) -> Result<f64> {
    let sens = positive("sensitivity", sensitivity)?;
    let yaw = positive("yaw", yaw)?;
    finite("counts", FULL_TURN_DEG / (sens * yaw))
}

/// Convert a sensitivity value from one game to another.
///
/// The raw count total of a 360° turn is conserved. A dpi only takes part on
/// a side whose scale is [`Scale::Cm360`].
pub fn convert_sensitivity(
    source_dpi: u32,
    source_sens: f64,
    source: Scale,
    dest_dpi: u32,
    dest: Scale,
) -> Result<f64> {
    positive("sensitivity", source_sens)?;
    source.validate()?;
    dest.validate()?;

    let counts = match source {
        Scale::Cm360 => counts_per_360(source_dpi, source_sens)?,
        Scale::Yaw(yaw) => counts_for(source_sens, yaw)?,
    };

    let converted = match dest {
        Scale::Cm360 => cm360_from_counts(counts, dest_dpi)?,
        Scale::Yaw(yaw) => sensitivity_for(counts, yaw)?,
    };

    trace!(
        "convert {:?}@{} {} -> {:?}@{} {} ({} counts)",
        source,
        source_dpi,
        source_sens,
        dest,
        dest_dpi,
        converted,
        counts
    );
    Ok(converted)
}
