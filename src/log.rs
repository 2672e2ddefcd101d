//! Workout log - the session's single source of recorded workouts

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::exercise::Exercise;
use crate::workout::Workout;

/// Insertion-ordered workouts, at most one per name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a workout.
    ///
    /// If a workout with the same name is already logged, nothing changes:
    /// the existing entry is kept as is and no error is raised. Returns
    /// `true` when the workout was appended.
    pub fn log(&mut self, workout: Workout) -> bool {
        if self.contains(workout.name()) {
            debug!(name = workout.name(), "workout already logged, skipping");
            return false;
        }
        debug!(name = workout.name(), "workout logged");
        self.workouts.push(workout);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workouts.iter().any(|w| w.name() == name)
    }

    /// All workouts in log order
    pub fn logged_workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find_by_name(&self, name: &str) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.name() == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }

    /// Append an exercise to the named workout.
    pub fn add_exercise(&mut self, workout_name: &str, exercise: Exercise) -> Result<()> {
        let workout = self
            .workouts
            .iter_mut()
            .find(|w| w.name() == workout_name)
            .ok_or_else(|| TrackerError::NotFound(workout_name.to_string()))?;
        debug!(
            workout = workout_name,
            exercise = exercise.name(),
            "exercise added"
        );
        workout.add_exercise(exercise);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.name() == name)?;
        debug!(name, "workout removed");
        Some(self.workouts.remove(index))
    }

    pub fn count(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Workout names in log order
    pub fn names(&self) -> Vec<&str> {
        self.workouts.iter().map(Workout::name).collect()
    }
}

/// Thread-safe handle for serving one log to several callers.
///
/// Every mutation runs under a single lock, so the one-workout-per-name
/// rule holds under concurrent access.
#[derive(Debug, Clone, Default)]
pub struct SharedWorkoutLog {
    inner: Arc<Mutex<WorkoutLog>>,
}

impl SharedWorkoutLog {
    pub fn new(log: WorkoutLog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(log)),
        }
    }

    // Mutations never leave the log half-updated, so a poisoned lock still
    // guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, WorkoutLog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn log(&self, workout: Workout) -> bool {
        self.lock().log(workout)
    }

    pub fn add_exercise(&self, workout_name: &str, exercise: Exercise) -> Result<()> {
        self.lock().add_exercise(workout_name, exercise)
    }

    /// Copy of the current log state
    pub fn snapshot(&self) -> WorkoutLog {
        self.lock().clone()
    }

    /// Run a read-only query against the log while holding the lock.
    pub fn read<T>(&self, f: impl FnOnce(&WorkoutLog) -> T) -> T {
        let guard = self.lock();
        f(&*guard)
    }
}
