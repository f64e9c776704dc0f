//! Engine error types

use thiserror::Error;

/// Errors from conversion and calibration operations
///
/// Every operation validates its inputs before touching any state, so an
/// `Err` always leaves the caller's values unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Non-positive or non-finite dpi, cm/360, sensitivity or yaw
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// FOV outside (0, 180) degrees or a non-positive aspect ratio
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Operation needs calibration data that does not exist yet
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject anything that is not a finite, strictly positive number.
pub fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

/// Reject a zero dpi.
pub fn positive_dpi(dpi: u32) -> Result<f64> {
    if dpi == 0 {
        Err(EngineError::InvalidParameter(
            "dpi must be greater than zero".to_string(),
        ))
    } else {
        Ok(f64::from(dpi))
    }
}

/// Accept a FOV strictly between 0 and 180 degrees.
pub fn fov_angle(name: &str, deg: f64) -> Result<f64> {
    if deg.is_finite() && deg > 0.0 && deg < 180.0 {
        Ok(deg)
    } else {
        Err(EngineError::OutOfRange(format!(
            "{name} fov must be between 0 and 180 degrees, got {deg}"
        )))
    }
}

/// Final guard so no NaN or infinity leaves the engine.
pub(crate) fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter(format!(
            "{name} is not representable ({value})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_negative_nan() {
        assert!(positive("sens", 1.5).is_ok());
        assert!(positive("sens", 0.0).is_err());
        assert!(positive("sens", -2.0).is_err());
        assert!(positive("sens", f64::NAN).is_err());
        assert!(positive("sens", f64::INFINITY).is_err());
    }

    #[test]
    fn test_fov_angle_bounds() {
        assert_eq!(fov_angle("hipfire", 90.0), Ok(90.0));
        assert!(matches!(fov_angle("hipfire", 0.0), Err(EngineError::OutOfRange(_))));
        assert!(matches!(fov_angle("hipfire", 180.0), Err(EngineError::OutOfRange(_))));
        assert!(matches!(fov_angle("hipfire", f64::NAN), Err(EngineError::OutOfRange(_))));
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::OutOfRange("fov 190".to_string());
        assert_eq!(err.to_string(), "Out of range: fov 190");
    }
}
