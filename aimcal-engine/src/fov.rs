//! Field-of-view conventions
//!
//! Games quote FOV as a horizontal angle, a vertical angle, or the horizontal
//! angle a 4:3 display would show ("4:3 locked"). All three are linked through
//! the tangent of the horizontal half-angle and the display aspect ratio.
//!
//! The horizontal value is the pivot: any edit is converted to horizontal
//! first and the other two are derived from it.

use crate::error::{fov_angle, EngineError, Result};
use std::fmt;

/// Height / width of the 4:3 reference display
const FOUR_BY_THREE: f64 = 3.0 / 4.0;

/// Display aspect ratio expressed as height / width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Create from a raw `height / width` value
    pub fn new(height_over_width: f64) -> Result<Self> {
        if height_over_width.is_finite() && height_over_width > 0.0 {
            Ok(Self(height_over_width))
        } else {
            Err(EngineError::OutOfRange(format!(
                "aspect ratio must be positive, got {height_over_width}"
            )))
        }
    }

    /// Create from a display resolution
    pub fn from_resolution(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::OutOfRange(format!(
                "resolution {width}x{height} has a zero side"
            )));
        }
        Self::new(f64::from(height) / f64::from(width))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Which FOV convention a value is given in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FovKind {
    Horizontal,
    Vertical,
    FourByThree,
}

impl fmt::Display for FovKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FovKind::Horizontal => "horizontal",
            FovKind::Vertical => "vertical",
            FovKind::FourByThree => "4:3",
        };
        f.write_str(name)
    }
}

/// Tangent of the half-angle of `deg`, rejecting anything outside (0, 180)
pub(crate) fn half_tan(name: &str, deg: f64) -> Result<f64> {
    let deg = fov_angle(name, deg)?;
    Ok((deg / 2.0).to_radians().tan())
}

/// Full angle in degrees for a half-angle tangent
fn full_angle(tan_half: f64) -> f64 {
    2.0 * tan_half.atan().to_degrees()
}

pub fn vertical_from_horizontal(horizontal: f64, aspect: AspectRatio) -> Result<f64> {
    let t = half_tan("horizontal", horizontal)?;
    Ok(full_angle(t * aspect.value()))
}

pub fn horizontal_from_vertical(vertical: f64, aspect: AspectRatio) -> Result<f64> {
    let t = half_tan("vertical", vertical)?;
    Ok(full_angle(t / aspect.value()))
}

pub fn four_by_three_from_horizontal(horizontal: f64, aspect: AspectRatio) -> Result<f64> {
    let t = half_tan("horizontal", horizontal)?;
    Ok(full_angle(aspect.value() / FOUR_BY_THREE * t))
}

pub fn horizontal_from_four_by_three(four_by_three: f64, aspect: AspectRatio) -> Result<f64> {
    let t = half_tan("4:3", four_by_three)?;
    Ok(full_angle(FOUR_BY_THREE / aspect.value() * t))
}

/// Convert any FOV value to the horizontal pivot
pub fn to_horizontal(kind: FovKind, value: f64, aspect: AspectRatio) -> Result<f64> {
    match kind {
        FovKind::Horizontal => fov_angle("horizontal", value),
        FovKind::Vertical => horizontal_from_vertical(value, aspect),
        FovKind::FourByThree => horizontal_from_four_by_three(value, aspect),
    }
}

/// One FOV in all three conventions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovTriple {
    pub horizontal: f64,
    pub four_by_three: f64,
    pub vertical: f64,
}

impl FovTriple {
    /// Build the triple from a horizontal FOV
    pub fn from_horizontal(horizontal: f64, aspect: AspectRatio) -> Result<Self> {
        Ok(Self {
            horizontal,
            four_by_three: four_by_three_from_horizontal(horizontal, aspect)?,
            vertical: vertical_from_horizontal(horizontal, aspect)?,
        })
    }

    /// Recompute all fields after one of them was edited.
    ///
    /// The edited field keeps the exact value entered.
    pub fn from_edit(kind: FovKind, value: f64, aspect: AspectRatio) -> Result<Self> {
        let horizontal = to_horizontal(kind, value, aspect)?;
        let mut triple = Self::from_horizontal(horizontal, aspect)?;
        match kind {
            FovKind::Horizontal => {}
            FovKind::Vertical => triple.vertical = value,
            FovKind::FourByThree => triple.four_by_three = value,
        }
        Ok(triple)
    }

    /// Apply an edit in place; on error the triple is left untouched
    pub fn edit(&mut self, kind: FovKind, value: f64, aspect: AspectRatio) -> Result<()> {
        *self = Self::from_edit(kind, value, aspect)?;
        Ok(())
    }

    pub fn get(&self, kind: FovKind) -> f64 {
        match kind {
            FovKind::Horizontal => self.horizontal,
            FovKind::Vertical => self.vertical,
            FovKind::FourByThree => self.four_by_three,
        }
    }
}
