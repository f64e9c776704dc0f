//! Interactive yaw calibration
//!
//! The user sets a trial sensitivity, performs one 360° turn while the mouse
//! counts are recorded, and from then on judges test turns as "under" (the
//! game turned less than 360°) or "over". Each judgement narrows the interval
//! that must contain the game's yaw constant.
//!
//! Until a first "under" arrives the interval has no upper end and the
//! candidate doubles on every "over". After that the candidate is always the
//! midpoint, so every answer halves the interval. Changing the trial
//! sensitivity reinterprets the measured turn and restarts the interval.
//!
//! ```text
//!  Idle ──start──▶ Measuring ──feedback──▶ Refining ◀─┐
//!   ▲                  │                      │  └────┘ feedback
//!   └──────save────────┴──────────save────────┘
//! ```

use crate::error::{positive, EngineError, Result};
use crate::measure::whole_counts;
use crate::profile::GameProfile;
use crate::sensitivity::{self, TurnRate, FULL_TURN_DEG};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

/// Direction of a judged test turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// The game turned less than 360°
    Under,
    /// The game turned more than 360°
    Over,
}

impl FromStr for Feedback {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "under" | "u" | "less" | "<" => Ok(Feedback::Under),
            "over" | "o" | "more" | ">" => Ok(Feedback::Over),
            other => Err(EngineError::InvalidParameter(format!(
                "unknown feedback \"{other}\" (expected under/over)"
            ))),
        }
    }
}

/// Calibration state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// No calibration running
    Idle,
    /// Trial sensitivity set, waiting for (or holding) the measured turn
    Measuring,
    /// At least one judgement applied
    Refining,
}

/// Upper end of the search interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchBound {
    /// No "under" seen yet; the candidate doubles on "over"
    Unbounded,
    /// Bisection between the lower limit and `upper`
    Bounded { upper: f64 },
}

/// Search interval for one calibration run, in yaw units
#[derive(Debug, Clone, PartialEq)]
pub struct YawSearchState {
    trial_sensitivity: f64,
    counts_observed: Option<f64>,
    candidate: Option<f64>,
    lower_limit: f64,
    bound: SearchBound,
    rounds: u32,
}

impl YawSearchState {
    fn new(trial_sensitivity: f64) -> Self {
        Self {
            trial_sensitivity,
            counts_observed: None,
            candidate: None,
            lower_limit: 0.0,
            bound: SearchBound::Unbounded,
            rounds: 0,
        }
    }

    pub fn trial_sensitivity(&self) -> f64 {
        self.trial_sensitivity
    }

    pub fn counts_observed(&self) -> Option<f64> {
        self.counts_observed
    }

    /// Current best estimate of the yaw constant
    pub fn estimate(&self) -> Option<f64> {
        self.candidate
    }

    pub fn lower_limit(&self) -> f64 {
        self.lower_limit
    }

    /// Upper limit, `None` while the search is unbounded
    pub fn upper_limit(&self) -> Option<f64> {
        match self.bound {
            SearchBound::Unbounded => None,
            SearchBound::Bounded { upper } => Some(upper),
        }
    }

    pub fn bound(&self) -> SearchBound {
        self.bound
    }

    /// Number of judgements applied since the last measured turn
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Width of the search interval, once bounded
    pub fn interval_width(&self) -> Option<f64> {
        self.upper_limit().map(|upper| upper - self.lower_limit)
    }

    /// Counts to send for the next test turn at the trial sensitivity.
    ///
    /// `None` until a turn is measured, or when the turn does not fit in `i64`.
    pub fn next_turn_counts(&self) -> Option<i64> {
        let yaw = self.candidate?;
        whole_counts((FULL_TURN_DEG / (self.trial_sensitivity * yaw)).round()).ok()
    }

    /// Values a UI shows after each step
    pub fn snapshot(&self) -> YawSnapshot {
        YawSnapshot {
            sens: self.trial_sensitivity,
            counts: self.next_turn_counts(),
            yaw: self.candidate,
            lower_limit: self.lower_limit,
            upper_limit: self.upper_limit(),
        }
    }
}

/// Display payload for the calibration view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YawSnapshot {
    pub sens: f64,
    pub counts: Option<i64>,
    pub yaw: Option<f64>,
    pub lower_limit: f64,
    pub upper_limit: Option<f64>,
}

/// Drives one calibration at a time
#[derive(Debug, Clone)]
pub struct YawCalibrator {
    phase: CalibrationPhase,
    search: Option<YawSearchState>,
}

impl YawCalibrator {
    pub fn new() -> Self {
        Self {
            phase: CalibrationPhase::Idle,
            search: None,
        }
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    /// Search state of the current (or last saved) run
    pub fn search(&self) -> Option<&YawSearchState> {
        self.search.as_ref()
    }

    /// Begin a calibration at a trial sensitivity
    pub fn start(&mut self, trial_sensitivity: f64) -> Result<YawSnapshot> {
        positive("sensitivity", trial_sensitivity)?;
        let search = YawSearchState::new(trial_sensitivity);
        let snapshot = search.snapshot();
        self.search = Some(search);
        self.phase = CalibrationPhase::Measuring;
        info!("Yaw calibration started at sensitivity {}", trial_sensitivity);
        Ok(snapshot)
    }

    /// Change the trial sensitivity without discarding the measured turn.
    ///
    /// The recorded counts are reinterpreted at the new sensitivity, which
    /// reseeds the estimate and restarts the interval. Before any turn is
    /// measured only the trial sensitivity changes. Ignored while idle.
    pub fn set_trial_sensitivity(&mut self, sens: f64) -> Result<Option<YawSnapshot>> {
        if self.phase == CalibrationPhase::Idle {
            debug!("Ignoring sensitivity {}: no calibration running", sens);
            return Ok(None);
        }
        positive("sensitivity", sens)?;
        let counts = self.search.as_ref().and_then(YawSearchState::counts_observed);
        let estimate = counts
            .map(|counts| sensitivity::sensitivity_for(counts, sens))
            .transpose()?;

        let mut search = YawSearchState::new(sens);
        search.counts_observed = counts;
        search.candidate = estimate;
        let snapshot = search.snapshot();

        self.search = Some(search);
        self.phase = CalibrationPhase::Measuring;
        info!("Trial sensitivity set to {} -> yaw {:?}", sens, estimate);
        Ok(Some(snapshot))
    }

    /// Record the counts of a measured 360° turn.
    ///
    /// Seeds the estimate and restarts the interval. Ignored while idle.
    pub fn observe_turn(&mut self, counts: f64, sens: f64) -> Result<Option<YawSnapshot>> {
        if self.phase == CalibrationPhase::Idle {
            debug!("Ignoring turn of {} counts: no calibration running", counts);
            return Ok(None);
        }
        let counts = positive("counts", counts.abs())?;
        positive("sensitivity", sens)?;
        // 360 = counts * sens * yaw, solved for yaw
        let estimate = sensitivity::sensitivity_for(counts, sens)?;

        let mut search = YawSearchState::new(sens);
        search.counts_observed = Some(counts);
        search.candidate = Some(estimate);
        let snapshot = search.snapshot();

        self.search = Some(search);
        self.phase = CalibrationPhase::Measuring;
        info!(
            "Measured turn: {} counts at sensitivity {} -> yaw {}",
            counts, sens, estimate
        );
        Ok(Some(snapshot))
    }

    /// Apply one judgement of the last test turn.
    ///
    /// Returns `Ok(None)` without changing anything when there is nothing to
    /// refine (idle, or no turn measured yet).
    pub fn feedback(&mut self, direction: Feedback) -> Result<Option<YawSnapshot>> {
        if self.phase == CalibrationPhase::Idle {
            debug!("Ignoring {:?}: no calibration running", direction);
            return Ok(None);
        }
        let Some(search) = self.search.as_mut() else {
            return Ok(None);
        };
        let Some(candidate) = search.candidate else {
            debug!("Ignoring {:?}: no turn measured yet", direction);
            return Ok(None);
        };

        let mut lower = search.lower_limit;
        let mut bound = search.bound;
        match direction {
            Feedback::Under => {
                let upper = match bound {
                    SearchBound::Unbounded => candidate,
                    SearchBound::Bounded { upper } => upper.min(candidate),
                };
                bound = SearchBound::Bounded { upper };
            }
            Feedback::Over => lower = lower.max(candidate),
        }

        let next = match bound {
            SearchBound::Unbounded => candidate * 2.0,
            SearchBound::Bounded { upper } => (lower + upper) / 2.0,
        };
        if !next.is_finite() || next <= 0.0 {
            return Err(EngineError::OutOfRange(format!(
                "yaw search left the representable range ({next})"
            )));
        }

        search.lower_limit = lower;
        search.bound = bound;
        search.candidate = Some(next);
        search.rounds += 1;
        self.phase = CalibrationPhase::Refining;

        debug!(
            "Round {}: {:?} -> yaw {} in [{}, {:?}]",
            search.rounds,
            direction,
            next,
            lower,
            search.upper_limit()
        );
        Ok(Some(search.snapshot()))
    }

    /// Profile the current estimate would be saved as. Changes nothing.
    pub fn profile(&self, name: &str) -> Result<GameProfile> {
        if self.phase == CalibrationPhase::Idle {
            return Err(EngineError::InvalidState(
                "no calibration running".to_string(),
            ));
        }
        let estimate = self
            .search
            .as_ref()
            .and_then(YawSearchState::estimate)
            .ok_or_else(|| EngineError::InvalidState("no turn measured yet".to_string()))?;

        GameProfile::new(name, estimate)
    }

    /// Store the current estimate under a game name and return to idle.
    ///
    /// The search state is kept so a UI can keep showing it.
    pub fn save(&mut self, name: &str) -> Result<GameProfile> {
        let profile = self.profile(name)?;
        self.phase = CalibrationPhase::Idle;
        info!("Saved yaw {:?} for {}", profile.scale.yaw(), profile.name);
        Ok(profile)
    }

    /// In-game sensitivity that gives `rate` with the current estimate
    pub fn sensitivity_for(&self, rate: &TurnRate) -> Result<f64> {
        let estimate = self
            .search
            .as_ref()
            .and_then(YawSearchState::estimate)
            .ok_or_else(|| EngineError::InvalidState("no yaw estimate yet".to_string()))?;
        sensitivity::sensitivity_for(rate.counts_per_360(), estimate)
    }

    /// Drop all calibration data
    pub fn reset(&mut self) {
        self.phase = CalibrationPhase::Idle;
        self.search = None;
    }
}

impl Default for YawCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measuring(counts: f64, sens: f64) -> YawCalibrator {
        let mut cal = YawCalibrator::new();
        cal.start(sens).unwrap();
        cal.observe_turn(counts, sens).unwrap();
        cal
    }

    #[test]
    fn test_start_rejects_zero_sensitivity() {
        let mut cal = YawCalibrator::new();
        assert!(matches!(
            cal.start(0.0),
            Err(EngineError::InvalidParameter(_))
        ));
        assert_eq!(cal.phase(), CalibrationPhase::Idle);
        assert!(cal.search().is_none());
    }

    #[test]
    fn test_start_initial_interval() {
        let mut cal = YawCalibrator::new();
        let snap = cal.start(2.0).unwrap();
        assert_eq!(cal.phase(), CalibrationPhase::Measuring);
        assert_eq!(snap.lower_limit, 0.0);
        assert_eq!(snap.upper_limit, None);
        assert_eq!(snap.yaw, None);
    }

    #[test]
    fn test_observe_turn_seeds_estimate() {
        let cal = measuring(8181.8, 2.0);
        let search = cal.search().unwrap();
        let yaw = search.estimate().unwrap();
        assert!((yaw - 360.0 / (8181.8 * 2.0)).abs() < 1e-12);
        assert_eq!(search.next_turn_counts(), Some(8182));
    }

    #[test]
    fn test_negative_counts_use_magnitude() {
        let cal = measuring(-1000.0, 1.0);
        assert_eq!(cal.search().unwrap().counts_observed(), Some(1000.0));
    }

    #[test]
    fn test_under_first_halves_candidate() {
        let mut cal = measuring(1000.0, 1.0);
        let before = cal.search().unwrap().estimate().unwrap();
        let snap = cal.feedback(Feedback::Under).unwrap().unwrap();
        assert_eq!(cal.phase(), CalibrationPhase::Refining);
        assert_eq!(snap.upper_limit, Some(before));
        assert!((snap.yaw.unwrap() - before / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_over_while_unbounded_doubles() {
        let mut cal = measuring(1000.0, 1.0);
        let before = cal.search().unwrap().estimate().unwrap();
        let snap = cal.feedback(Feedback::Over).unwrap().unwrap();
        assert_eq!(snap.lower_limit, before);
        assert_eq!(snap.upper_limit, None);
        assert_eq!(snap.yaw, Some(before * 2.0));
    }

    #[test]
    fn test_bisection_after_bound() {
        let mut cal = measuring(1000.0, 1.0);
        cal.feedback(Feedback::Over).unwrap();
        cal.feedback(Feedback::Under).unwrap();
        let search = cal.search().unwrap();
        let (lo, hi) = (search.lower_limit(), search.upper_limit().unwrap());
        assert!((search.estimate().unwrap() - (lo + hi) / 2.0).abs() < 1e-15);
        assert!(lo <= hi);
    }

    #[test]
    fn test_feedback_while_idle_is_noop() {
        let mut cal = YawCalibrator::new();
        assert_eq!(cal.feedback(Feedback::Under).unwrap(), None);
        assert!(cal.search().is_none());
        assert_eq!(cal.phase(), CalibrationPhase::Idle);
    }

    #[test]
    fn test_feedback_before_turn_is_noop() {
        let mut cal = YawCalibrator::new();
        cal.start(1.0).unwrap();
        assert_eq!(cal.feedback(Feedback::Over).unwrap(), None);
        assert_eq!(cal.phase(), CalibrationPhase::Measuring);
    }

    #[test]
    fn test_turn_while_idle_is_ignored() {
        let mut cal = YawCalibrator::new();
        assert_eq!(cal.observe_turn(1000.0, 1.0).unwrap(), None);
        assert!(cal.search().is_none());
    }

    #[test]
    fn test_save_returns_profile_and_goes_idle() {
        let mut cal = measuring(1000.0, 1.0);
        cal.feedback(Feedback::Under).unwrap();
        let estimate = cal.search().unwrap().estimate().unwrap();
        let profile = cal.save("Quake Champions").unwrap();
        assert_eq!(profile.name, "Quake Champions");
        assert_eq!(profile.scale.yaw(), Some(estimate));
        assert_eq!(cal.phase(), CalibrationPhase::Idle);
        // Limits survive the save
        assert_eq!(cal.search().unwrap().estimate(), Some(estimate));
        // Feedback after save is ignored
        assert_eq!(cal.feedback(Feedback::Over).unwrap(), None);
    }

    #[test]
    fn test_save_without_estimate_is_invalid_state() {
        let mut cal = YawCalibrator::new();
        assert!(matches!(cal.save("Game"), Err(EngineError::InvalidState(_))));
        cal.start(1.0).unwrap();
        assert!(matches!(cal.save("Game"), Err(EngineError::InvalidState(_))));
    }

    #[test]
    fn test_save_empty_name_keeps_phase() {
        let mut cal = measuring(1000.0, 1.0);
        cal.feedback(Feedback::Over).unwrap();
        assert!(matches!(cal.save("  "), Err(EngineError::InvalidParameter(_))));
        assert_eq!(cal.phase(), CalibrationPhase::Refining);
    }

    #[test]
    fn test_profile_previews_without_leaving_refining() {
        let mut cal = measuring(1000.0, 1.0);
        cal.feedback(Feedback::Under).unwrap();
        let before = cal.search().cloned();
        let profile = cal.profile("Quake").unwrap();
        assert_eq!(profile.scale.yaw(), before.as_ref().and_then(|s| s.estimate()));
        assert_eq!(cal.phase(), CalibrationPhase::Refining);
        assert_eq!(cal.search().cloned(), before);
    }

    #[test]
    fn test_set_trial_sensitivity_keeps_measured_turn() {
        let mut cal = measuring(16000.0, 1.0);
        cal.feedback(Feedback::Under).unwrap();
        let snapshot = cal.set_trial_sensitivity(2.0).unwrap().unwrap();

        let search = cal.search().unwrap();
        assert_eq!(search.counts_observed(), Some(16000.0));
        assert_eq!(search.trial_sensitivity(), 2.0);
        assert_eq!(search.estimate(), Some(360.0 / (16000.0 * 2.0)));
        assert_eq!(search.bound(), SearchBound::Unbounded);
        assert_eq!(search.rounds(), 0);
        assert_eq!(snapshot.sens, 2.0);
        assert_eq!(snapshot.counts, Some(16000));
        assert_eq!(cal.phase(), CalibrationPhase::Measuring);
    }

    #[test]
    fn test_set_trial_sensitivity_before_turn_and_idle() {
        let mut cal = YawCalibrator::new();
        assert_eq!(cal.set_trial_sensitivity(2.0).unwrap(), None);
        assert!(cal.search().is_none());

        cal.start(1.0).unwrap();
        let snapshot = cal.set_trial_sensitivity(3.0).unwrap().unwrap();
        assert_eq!(snapshot.sens, 3.0);
        assert_eq!(snapshot.yaw, None);
    }

    #[test]
    fn test_set_trial_sensitivity_rejects_and_keeps_state() {
        let mut cal = measuring(1000.0, 1.0);
        cal.feedback(Feedback::Over).unwrap();
        let before = cal.search().cloned();
        assert!(matches!(
            cal.set_trial_sensitivity(0.0),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(cal.set_trial_sensitivity(f64::NAN).is_err());
        assert_eq!(cal.search().cloned(), before);
        assert_eq!(cal.phase(), CalibrationPhase::Refining);
    }

    #[test]
    fn test_next_turn_counts_past_i64_is_none() {
        // The next test turn repeats the measured one, here beyond i64
        let cal = measuring(1e20, 1.0);
        let snapshot = cal.search().unwrap().snapshot();
        assert!(snapshot.yaw.is_some_and(f64::is_finite));
        assert_eq!(snapshot.counts, None);

        let cal = measuring(16000.0, 1.0);
        assert_eq!(cal.search().unwrap().next_turn_counts(), Some(16000));
    }

    #[test]
    fn test_sensitivity_for_estimate() {
        let cal = measuring(1000.0, 1.0);
        let rate = TurnRate::new(800, 30.0).unwrap();
        let sens = cal.sensitivity_for(&rate).unwrap();
        let yaw = cal.search().unwrap().estimate().unwrap();
        assert!((sens * yaw * rate.counts_per_360() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_feedback_parse() {
        assert_eq!("u".parse::<Feedback>().unwrap(), Feedback::Under);
        assert_eq!("Over".parse::<Feedback>().unwrap(), Feedback::Over);
        assert!("sideways".parse::<Feedback>().is_err());
    }
}
