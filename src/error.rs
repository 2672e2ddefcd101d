//! Error types shared by the tracker core and its adapters

use std::path::PathBuf;

use thiserror::Error;

/// Malformed or missing input. Always recoverable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} cannot be blank.")]
    Blank { field: &'static str },
    #[error("Invalid input for {field}: '{value}'. Please ensure it's a valid {expected}.")]
    Unparsable {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{field} must not be negative (got {value}).")]
    Negative { field: &'static str, value: String },
    #[error("{field} must be a finite number.")]
    NotFinite { field: &'static str },
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Workout not found: '{0}'")]
    NotFound(String),
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed session file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
