//! Interactive yaw calibration.
//!
//! A reader thread turns stdin lines into [`SessionEvent`]s; the event loop
//! applies them in order.

use super::{CommandResult, Paths};
use aimcal::events::{self, EventOutcome, SessionEvent};
use aimcal_engine::{Feedback, YawSnapshot};
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  count <n> [sens]  counts of a measured 360° turn (default: trial sens)
  u | under         the test turn came short of 360°
  o | over          the test turn went past 360°
  sens <v>          change the trial sensitivity, keeping the measured turn
  start <v>         start over at a new trial sensitivity
  save <name>       store the estimate as a game
  quit              stop";

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Event(SessionEvent),
    Help,
    Empty,
}

/// Parse one command line
pub fn parse_line(line: &str) -> Result<Line, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Line::Empty);
    };
    let number = |word: Option<&str>, what: &str| -> Result<f64, String> {
        let word = word.ok_or_else(|| format!("{cmd}: missing {what}"))?;
        word.parse::<f64>()
            .map_err(|_| format!("{cmd}: invalid {what} \"{word}\""))
    };

    let event = match cmd.to_ascii_lowercase().as_str() {
        "count" | "c" => {
            let counts_observed = number(words.next(), "counts")?;
            let sens = match words.next() {
                Some(w) => Some(number(Some(w), "sensitivity")?),
                None => None,
            };
            SessionEvent::TurnCounted {
                counts_observed,
                sens,
            }
        }
        "sens" => SessionEvent::SetSensitivity {
            sens: number(words.next(), "sensitivity")?,
        },
        "start" => SessionEvent::StartCalibration {
            sens: number(words.next(), "sensitivity")?,
        },
        "save" => {
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err("save: missing game name".to_string());
            }
            SessionEvent::Save { name }
        }
        "quit" | "q" | "exit" => SessionEvent::Quit,
        "help" | "h" | "?" => return Ok(Line::Help),
        other => SessionEvent::Feedback(other.parse::<Feedback>().map_err(|e| e.to_string())?),
    };
    Ok(Line::Event(event))
}

fn print_snapshot(snapshot: &YawSnapshot) {
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"));
    println!(
        "sens {}  yaw {}  limits [{:.6}, {}]",
        snapshot.sens,
        fmt(snapshot.yaw),
        snapshot.lower_limit,
        fmt(snapshot.upper_limit)
    );
    if let Some(counts) = snapshot.counts {
        println!("Next test turn: {counts} counts");
    }
}

fn report(outcome: &EventOutcome) {
    match outcome {
        EventOutcome::Updated(snapshot) => print_snapshot(snapshot),
        EventOutcome::Saved(game) => {
            let yaw = game.scale.yaw().unwrap_or_default();
            println!("Saved {} with yaw {}", game.name, yaw);
        }
        EventOutcome::Ignored => println!("Nothing to do: measure a turn first"),
        EventOutcome::Rejected(reason) => println!("Rejected: {reason}"),
    }
}

/// Read stdin on a plain thread and forward parsed events
fn spawn_reader(tx: mpsc::Sender<SessionEvent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("stdin: {}", e);
                    break;
                }
            };
            let event = match parse_line(&line) {
                Ok(Line::Event(event)) => event,
                Ok(Line::Help) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(Line::Empty) => continue,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            let quit = event == SessionEvent::Quit;
            if tx.blocking_send(event).is_err() || quit {
                break;
            }
        }
        debug!("stdin reader finished");
    });
}

pub async fn run(paths: &Paths, sens: f64) -> CommandResult {
    let mut session = paths.load_session()?;
    let games = paths.load_games()?;
    session.set_game_sens(sens)?;

    let (tx, rx) = mpsc::channel(32);
    tx.send(SessionEvent::StartCalibration { sens }).await?;

    println!("Yaw calibration at sensitivity {sens}");
    println!("{HELP}");
    spawn_reader(tx);

    let (mut session, _games) = events::run(rx, session, games, report).await;

    let trial = session.calibrator().search().map(|s| s.trial_sensitivity());
    if let Some(trial) = trial.filter(|&t| t != sens) {
        session.set_game_sens(trial)?;
    }
    if let Some(search) = session.calibrator().search() {
        if let (Some(yaw), Ok(rate)) = (search.estimate(), session.settings().turn_rate()) {
            if let Ok(target) = session.calibrator().sensitivity_for(&rate) {
                println!(
                    "Estimated yaw {:.6}: sensitivity {:.6} gives {} cm/360 at {} dpi",
                    yaw,
                    target,
                    rate.cm360(),
                    rate.dpi()
                );
            }
        }
    }
    paths.flush(&mut session)
}
