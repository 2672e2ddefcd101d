//! Workouts: named, ordered collections of exercises

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::exercise::{Exercise, non_blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkoutRecord")]
pub struct Workout {
    name: String,
    exercises: Vec<Exercise>,
}

impl Workout {
    /// Create an empty workout. The name is stored trimmed.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("Workout name", name)?,
            exercises: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an exercise. Identical exercises are kept as separate entries.
    pub fn add_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    /// Exercises in the order they were added
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn duration_secs(&self) -> u64 {
        self.exercises
            .iter()
            .map(|e| u64::from(e.duration_secs()))
            .sum()
    }

    /// Total duration in whole minutes, truncating any remainder.
    pub fn duration_minutes(&self) -> u64 {
        self.duration_secs() / 60
    }

    pub fn volume(&self) -> f64 {
        // fold from +0.0: an empty f64 sum() is -0.0
        self.exercises
            .iter()
            .map(Exercise::volume)
            .fold(0.0, |acc, v| acc + v)
    }

    /// Workout name followed by each exercise, on a single line.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} ({} exercises, {} min)",
            self.name,
            self.exercises.len(),
            self.duration_minutes()
        );
        if !self.exercises.is_empty() {
            let exercises: Vec<String> = self.exercises.iter().map(Exercise::describe).collect();
            line.push_str(": ");
            line.push_str(&exercises.join("; "));
        }
        line
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Deserialize)]
struct WorkoutRecord {
    name: String,
    #[serde(default)]
    exercises: Vec<Exercise>,
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = ValidationError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let mut workout = Workout::new(&record.name)?;
        workout.exercises = record.exercises;
        Ok(workout)
    }
}
