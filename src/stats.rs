//! Training statistics over a workout log
//!
//! Everything here is a pure function of the log; nothing is cached.

use std::fmt;

use crate::exercise::Exercise;
use crate::log::WorkoutLog;
use crate::workout::Workout;

pub fn total_workouts(log: &WorkoutLog) -> usize {
    log.count()
}

/// Sum of every exercise's volume across all workouts (kg)
pub fn total_volume(log: &WorkoutLog) -> f64 {
    log.logged_workouts()
        .iter()
        .flat_map(Workout::exercises)
        .map(Exercise::volume)
        .fold(0.0, |acc, v| acc + v)
}

/// Mean of the workouts' durations in whole minutes, 0.0 for an empty log.
pub fn average_duration_minutes(log: &WorkoutLog) -> f64 {
    if log.is_empty() {
        return 0.0;
    }
    let total: u64 = log
        .logged_workouts()
        .iter()
        .map(Workout::duration_minutes)
        .sum();
    total as f64 / log.count() as f64
}

/// Summary figures of one log snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub total_workouts: usize,
    pub total_volume: f64,
    pub average_duration_minutes: f64,
}

impl Statistics {
    pub fn from_log(log: &WorkoutLog) -> Self {
        Self {
            total_workouts: total_workouts(log),
            total_volume: total_volume(log),
            average_duration_minutes: average_duration_minutes(log),
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Workouts: {}\nTotal Volume: {:.2} kg\nAverage Workout Duration: {:.2} minutes",
            self.total_workouts, self.total_volume, self.average_duration_minutes
        )
    }
}

pub fn report(log: &WorkoutLog) -> String {
    Statistics::from_log(log).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn workout(name: &str, exercises: &[(u32, u32, f64, u32)]) -> Workout {
        let mut workout = Workout::new(name).unwrap();
        for (i, &(reps, sets, weight, secs)) in exercises.iter().enumerate() {
            let name = format!("Exercise {}", i + 1);
            workout.add_exercise(Exercise::new(&name, reps, sets, weight, secs).unwrap());
        }
        workout
    }

    #[test]
    fn test_empty_log() {
        let log = WorkoutLog::new();
        assert_eq!(total_workouts(&log), 0);
        assert_eq!(total_volume(&log), 0.0);
        assert_eq!(average_duration_minutes(&log), 0.0);
    }

    #[test]
    fn test_empty_totals_are_positive_zero() {
        let mut log = WorkoutLog::new();
        assert!(!total_volume(&log).is_sign_negative());

        log.log(Workout::new("Rest").unwrap());
        assert!(!total_volume(&log).is_sign_negative());
        assert!(!average_duration_minutes(&log).is_sign_negative());
    }

    #[test]
    fn test_empty_log_report() {
        assert_eq!(
            report(&WorkoutLog::new()),
            "Total Workouts: 0\nTotal Volume: 0.00 kg\nAverage Workout Duration: 0.00 minutes"
        );
    }

    #[test]
    fn test_single_workout_90_seconds() {
        let mut log = WorkoutLog::new();
        log.log(workout("Cardio", &[(1, 1, 0.0, 90)]));
        assert_eq!(average_duration_minutes(&log), 1.0);
    }

    #[test]
    fn test_total_volume_across_workouts() {
        let mut log = WorkoutLog::new();
        log.log(workout("Push", &[(10, 3, 50.0, 0), (8, 4, 20.0, 0)])); // 1500 + 640
        log.log(workout("Legs", &[(5, 5, 100.0, 0)])); // 2500
        log.log(workout("Rest", &[]));
        assert_eq!(total_volume(&log), 4640.0);
    }

    #[test]
    fn test_average_uses_truncated_minutes() {
        let mut log = WorkoutLog::new();
        log.log(workout("A", &[(1, 1, 1.0, 150)])); // 2 min
        log.log(workout("B", &[(1, 1, 1.0, 59)])); // 0 min
        log.log(workout("C", &[(1, 1, 1.0, 60), (1, 1, 1.0, 60)])); // 2 min
        log.log(workout("D", &[])); // 0 min
        assert_eq!(average_duration_minutes(&log), 1.0);
    }

    #[test]
    fn test_duplicate_workout_not_counted_twice() {
        let mut log = WorkoutLog::new();
        log.log(workout("Push", &[(10, 3, 50.0, 600)]));
        log.log(workout("Push", &[(10, 3, 500.0, 6000)]));

        let stats = Statistics::from_log(&log);
        assert_eq!(
            stats,
            Statistics {
                total_workouts: 1,
                total_volume: 1500.0,
                average_duration_minutes: 10.0,
            }
        );
    }

    #[test]
    fn test_report_formatting() {
        let mut log = WorkoutLog::new();
        log.log(workout("Push", &[(10, 3, 52.5, 125)]));
        log.log(workout("Pull", &[(12, 3, 30.25, 60)]));

        assert_eq!(
            report(&log),
            "Total Workouts: 2\nTotal Volume: 2664.00 kg\nAverage Workout Duration: 1.50 minutes"
        );
    }
}
