//! Export and display renderings of the log, plus JSON session files

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, TrackerError};
use crate::log::WorkoutLog;
use crate::workout::Workout;

/// Default export file, created in the working directory
pub const EXPORT_FILE: &str = "WorkoutData.txt";

/// Default JSON session file, written by the TUI's save key
pub const SESSION_FILE: &str = "WorkoutSession.json";

/// Multi-line view: each workout, then its exercises indented below it.
pub fn display_text(log: &WorkoutLog) -> String {
    let mut text = String::new();
    for workout in log.logged_workouts() {
        text.push_str(&workout.describe());
        text.push('\n');
        for exercise in workout.exercises() {
            text.push_str("   - ");
            text.push_str(&exercise.describe());
            text.push('\n');
        }
    }
    text
}

/// Write one `describe()` line per workout.
pub fn write_text<W: Write>(log: &WorkoutLog, out: &mut W) -> std::io::Result<()> {
    for workout in log.logged_workouts() {
        writeln!(out, "{}", workout.describe())?;
    }
    out.flush()
}

/// Export the log as plain text. Returns the absolute path written.
pub fn export_text(log: &WorkoutLog, path: &Path) -> Result<PathBuf> {
    let io_err = |source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "export failed");
        io_err(e)
    })?;
    write_text(log, &mut BufWriter::new(file)).map_err(io_err)?;

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    info!(path = %absolute.display(), workouts = log.count(), "workout data exported");
    Ok(absolute)
}

/// Save the log as a JSON session file.
pub fn export_json(log: &WorkoutLog, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(log.logged_workouts())?;
    fs::write(path, json).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), workouts = log.count(), "session saved");
    Ok(())
}

/// Load a JSON session file into a fresh log.
///
/// Records are validated like form input, and repeated workout names keep
/// only their first occurrence.
pub fn load_json(path: &Path) -> Result<WorkoutLog> {
    let json = fs::read_to_string(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let workouts: Vec<Workout> = serde_json::from_str(&json)?;

    let mut log = WorkoutLog::new();
    let total = workouts.len();
    for workout in workouts {
        log.log(workout);
    }
    info!(
        path = %path.display(),
        loaded = log.count(),
        skipped = total - log.count(),
        "session loaded"
    );
    Ok(log)
}
