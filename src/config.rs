//! Runtime configuration for the interactive session

use std::path::PathBuf;

use crate::export::{EXPORT_FILE, SESSION_FILE};

/// Workout created when a session starts
pub const DEFAULT_WORKOUT: &str = "Daily Workout";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the text export is written
    pub export_path: PathBuf,
    /// JSON session file written by the save key
    pub session_path: PathBuf,
    /// Name of the workout every session starts with
    pub default_workout: String,
    /// `tracing` filter directive, used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(EXPORT_FILE),
            session_path: PathBuf::from(SESSION_FILE),
            default_workout: DEFAULT_WORKOUT.to_string(),
            log_filter: "warn".to_string(),
        }
    }
}
