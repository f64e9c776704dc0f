//! Sensitivity, FOV and yaw calibration math for first-person shooters
//!
//! Pure conversions between cm/360, dpi + in-game sensitivity and raw
//! counts, FOV conversions between horizontal, vertical and 4:3-locked
//! conventions, and the interactive search for an unknown yaw constant.

pub mod error;
pub mod fov;
pub mod measure;
pub mod profile;
pub mod sensitivity;
pub mod yaw;

pub use error::{EngineError, Result};
pub use fov::{AspectRatio, FovKind, FovTriple};
pub use measure::{fov_from_edge_turn, scoped_counts, TurnPlan};
pub use profile::{game_list, GameProfile, Scale, CM360_NAME};
pub use sensitivity::{
    cm360_from_counts, convert_sensitivity, counts_for, counts_per_360, sensitivity_for,
    TurnRate, CM_PER_INCH,
};
pub use yaw::{
    CalibrationPhase, Feedback, SearchBound, YawCalibrator, YawSearchState, YawSnapshot,
};
