//! In-memory session state
//!
//! Holds the settings being edited, the game FOV triple and the yaw
//! calibrator. Edits mark the session dirty; flushing writes the settings and
//! marks it loaded again. Loading never marks it dirty, so freshly loaded
//! values are not written straight back.

use crate::config::Settings;
use crate::error::StoreError;
use aimcal_engine::error::{fov_angle, positive, EngineError};
use aimcal_engine::{AspectRatio, FovKind, FovTriple, TurnRate, YawCalibrator};
use std::path::Path;
use tracing::debug;

/// Whether the settings differ from what is on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loaded,
    Dirty,
}

pub struct Session {
    settings: Settings,
    state: SessionState,
    game_fov: Option<FovTriple>,
    calibrator: YawCalibrator,
}

impl Session {
    /// Start a session from loaded settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: SessionState::Loaded,
            game_fov: None,
            calibrator: YawCalibrator::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == SessionState::Dirty
    }

    pub fn calibrator(&self) -> &YawCalibrator {
        &self.calibrator
    }

    pub fn calibrator_mut(&mut self) -> &mut YawCalibrator {
        &mut self.calibrator
    }

    /// Last converted game FOV, if any
    pub fn game_fov(&self) -> Option<&FovTriple> {
        self.game_fov.as_ref()
    }

    fn touch(&mut self, field: &str) {
        debug!("Session edit: {}", field);
        self.state = SessionState::Dirty;
    }

    pub fn set_cm360(&mut self, cm360: f64) -> Result<(), EngineError> {
        TurnRate::new(self.settings.dpi, cm360)?;
        self.settings.cm360 = cm360;
        self.touch("cm360");
        Ok(())
    }

    pub fn set_dpi(&mut self, dpi: u32) -> Result<(), EngineError> {
        TurnRate::new(dpi, self.settings.cm360)?;
        self.settings.dpi = dpi;
        self.touch("dpi");
        Ok(())
    }

    pub fn set_game_sens(&mut self, sens: f64) -> Result<(), EngineError> {
        positive("game_sens", sens)?;
        self.settings.game_sens = sens;
        self.touch("game_sens");
        Ok(())
    }

    pub fn set_normal_fov(&mut self, fov: f64) -> Result<(), EngineError> {
        fov_angle("normal_fov", fov)?;
        self.settings.normal_fov = fov;
        self.touch("normal_fov");
        Ok(())
    }

    pub fn set_scoped_fov(&mut self, fov: f64) -> Result<(), EngineError> {
        fov_angle("scoped_fov", fov)?;
        self.settings.scoped_fov = fov;
        self.touch("scoped_fov");
        Ok(())
    }

    pub fn set_turn_speed(&mut self, speed: f64) -> Result<(), EngineError> {
        positive("turn_speed", speed)?;
        self.settings.app.turn_speed = speed;
        self.touch("turn_speed");
        Ok(())
    }

    pub fn set_hotkeys(&mut self, hotkeys: Vec<String>) -> Result<(), EngineError> {
        if hotkeys.is_empty() || hotkeys.iter().any(|k| k.trim().is_empty()) {
            return Err(EngineError::InvalidParameter(
                "hotkeys must be non-empty names".to_string(),
            ));
        }
        self.settings.app.hotkeys = hotkeys;
        self.touch("hotkeys");
        Ok(())
    }

    /// Edit the game FOV in any convention.
    ///
    /// The horizontal value is what gets stored.
    pub fn edit_game_fov(
        &mut self,
        kind: FovKind,
        value: f64,
        aspect: AspectRatio,
    ) -> Result<FovTriple, EngineError> {
        let triple = FovTriple::from_edit(kind, value, aspect)?;
        self.settings.game_fov = triple.horizontal;
        self.game_fov = Some(triple);
        self.touch("game_fov");
        Ok(triple)
    }

    /// Write the settings if they changed. Returns whether a write happened.
    pub fn flush(&mut self, path: &Path) -> Result<bool, StoreError> {
        if self.state == SessionState::Loaded {
            return Ok(false);
        }
        self.settings.save(path)?;
        self.state = SessionState::Loaded;
        debug!("Settings written to {:?}", path);
        Ok(true)
    }
}
