//! Serialized calibration event loop
//!
//! Producers (the stdin reader, a mouse listener) only send [`SessionEvent`]s.
//! A single consumer applies them to the [`Session`] in arrival order, so the
//! yaw search state is never modified from two places at once.

use crate::games::GameStore;
use crate::session::Session;
use aimcal_engine::{Feedback, GameProfile, YawSnapshot};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Events delivered to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Start (or restart) a calibration at a trial sensitivity
    StartCalibration { sens: f64 },
    /// Change the trial sensitivity, keeping the measured turn
    SetSensitivity { sens: f64 },
    /// Counts of a measured 360° turn; `None` means the trial sensitivity
    TurnCounted {
        counts_observed: f64,
        sens: Option<f64>,
    },
    /// Judgement of the last test turn
    Feedback(Feedback),
    /// Save the current estimate as a game
    Save { name: String },
    /// Stop the loop
    Quit,
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Calibration values changed
    Updated(YawSnapshot),
    /// A game profile was stored
    Saved(GameProfile),
    /// Nothing to do in the current state
    Ignored,
    /// The event was invalid; nothing changed
    Rejected(String),
}

/// Store the calibrated game, then leave calibration.
///
/// The store is written from a copy, so a failed write leaves both the game
/// list and the calibration untouched and the save can be retried.
fn save_game(session: &mut Session, games: &mut GameStore, name: &str) -> EventOutcome {
    let profile = match session.calibrator().profile(name) {
        Ok(profile) => profile,
        Err(e) => return EventOutcome::Rejected(e.to_string()),
    };

    let mut staged = games.clone();
    if let Err(e) = staged.add(profile.clone()).and_then(|_| staged.save()) {
        warn!("Failed to store {}: {}", profile.name, e);
        return EventOutcome::Rejected(e.to_string());
    }
    *games = staged;

    match session.calibrator_mut().save(name) {
        Ok(saved) => EventOutcome::Saved(saved),
        Err(e) => EventOutcome::Rejected(e.to_string()),
    }
}

/// Apply a single event
pub fn apply(session: &mut Session, games: &mut GameStore, event: SessionEvent) -> EventOutcome {
    let updated = |s: Option<YawSnapshot>| s.map_or(EventOutcome::Ignored, EventOutcome::Updated);
    let calibrator = session.calibrator_mut();
    let result = match event {
        SessionEvent::StartCalibration { sens } => calibrator.start(sens).map(EventOutcome::Updated),
        SessionEvent::SetSensitivity { sens } => calibrator.set_trial_sensitivity(sens).map(updated),
        SessionEvent::TurnCounted {
            counts_observed,
            sens,
        } => {
            let trial = calibrator.search().map(|s| s.trial_sensitivity());
            match sens.or(trial) {
                Some(sens) => calibrator.observe_turn(counts_observed, sens).map(updated),
                None => Ok(EventOutcome::Ignored),
            }
        }
        SessionEvent::Feedback(direction) => calibrator.feedback(direction).map(updated),
        SessionEvent::Save { name } => return save_game(session, games, &name),
        SessionEvent::Quit => return EventOutcome::Ignored,
    };

    result.unwrap_or_else(|e| EventOutcome::Rejected(e.to_string()))
}

/// Consume events until `Quit` or until every sender is gone.
///
/// `report` sees the outcome of each event. Returns the session and store so
/// the caller can flush them.
pub async fn run<F>(
    mut rx: mpsc::Receiver<SessionEvent>,
    mut session: Session,
    mut games: GameStore,
    mut report: F,
) -> (Session, GameStore)
where
    F: FnMut(&EventOutcome),
{
    while let Some(event) = rx.recv().await {
        if event == SessionEvent::Quit {
            info!("Calibration loop stopped");
            break;
        }
        let outcome = apply(&mut session, &mut games, event);
        report(&outcome);
    }
    (session, games)
}
