//! aimcal - sensitivity, FOV and yaw calibration toolkit
//!
//! Settings and game stores, the editing session and the serialized event
//! loop that drive the `aimcal-engine` conversions.

pub mod config;
pub mod error;
pub mod events;
pub mod games;
pub mod session;

pub use config::{AppSettings, Settings};
pub use error::StoreError;
pub use events::{EventOutcome, SessionEvent};
pub use games::GameStore;
pub use session::{Session, SessionState};
