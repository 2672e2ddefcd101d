//! fitlog - Personal fitness tracker
//!
//! Workouts hold exercises, the log keeps one workout per name, and the
//! statistics module reports totals and averages over the log.

pub mod config;
pub mod error;
pub mod exercise;
pub mod export;
pub mod log;
pub mod stats;
pub mod tui;
pub mod workout;

pub use config::Config;
pub use error::{TrackerError, ValidationError};
pub use exercise::Exercise;
pub use log::{SharedWorkoutLog, WorkoutLog};
pub use stats::Statistics;
pub use workout::Workout;
