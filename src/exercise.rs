//! Exercise records and parsing of raw text fields into them

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One exercise performed within a workout.
///
/// Fields are private: an `Exercise` is validated once on construction and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExerciseRecord")]
pub struct Exercise {
    name: String,
    reps: u32,
    sets: u32,
    weight: f64, // kg
    duration_secs: u32,
}

impl Exercise {
    pub fn new(
        name: &str,
        reps: u32,
        sets: u32,
        weight: f64,
        duration_secs: u32,
    ) -> Result<Self, ValidationError> {
        let name = non_blank("Name", name)?;

        if !weight.is_finite() {
            return Err(ValidationError::NotFinite { field: "Weight" });
        }
        if weight < 0.0 {
            return Err(ValidationError::Negative {
                field: "Weight",
                value: weight.to_string(),
            });
        }
        // -0.0 + 0.0 == +0.0
        let weight = weight + 0.0;
        if !(f64::from(reps) * f64::from(sets) * weight).is_finite() {
            return Err(ValidationError::NotFinite { field: "Volume" });
        }

        Ok(Self {
            name,
            reps,
            sets,
            weight,
            duration_secs,
        })
    }

    /// Build an exercise from raw form input, one string per field.
    pub fn parse(
        name: &str,
        reps: &str,
        sets: &str,
        weight: &str,
        duration_secs: &str,
    ) -> Result<Self, ValidationError> {
        let name = non_blank("Name", name)?;
        let reps = parse_int_field(reps, "Reps")?;
        let sets = parse_int_field(sets, "Sets")?;
        let weight = parse_real_field(weight, "Weight")?;
        let duration_secs = parse_int_field(duration_secs, "Seconds")?;
        Self::new(&name, reps, sets, weight, duration_secs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Training volume: reps * sets * weight (kg)
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * f64::from(self.sets) * self.weight
    }

    /// Single-line rendering with all five fields
    pub fn describe(&self) -> String {
        format!(
            "{}: {} reps x {} sets @ {:.2} kg, {} s (volume {:.2} kg)",
            self.name,
            self.reps,
            self.sets,
            self.weight,
            self.duration_secs,
            self.volume()
        )
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Unvalidated shape of an exercise as it appears in session files
#[derive(Deserialize)]
struct ExerciseRecord {
    name: String,
    reps: i64,
    sets: i64,
    weight: f64,
    #[serde(default)]
    duration_secs: i64,
}

impl TryFrom<ExerciseRecord> for Exercise {
    type Error = ValidationError;

    fn try_from(record: ExerciseRecord) -> Result<Self, Self::Error> {
        Exercise::new(
            &record.name,
            non_negative(record.reps, "Reps")?,
            non_negative(record.sets, "Sets")?,
            record.weight,
            non_negative(record.duration_secs, "Seconds")?,
        )
    }
}

/// Trimmed copy of `value`, or `Blank` if nothing is left.
pub(crate) fn non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}

fn non_negative(value: i64, field: &'static str) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field,
            value: value.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::Unparsable {
        field,
        value: value.to_string(),
        expected: "integer",
    })
}

/// Parse a whole, non-negative number typed into a form field.
pub fn parse_int_field(input: &str, field: &'static str) -> Result<u32, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let value: i64 = input.parse().map_err(|_| ValidationError::Unparsable {
        field,
        value: input.to_string(),
        expected: "integer",
    })?;
    non_negative(value, field)
}

/// Parse a non-negative real number typed into a form field.
pub fn parse_real_field(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let value: f64 = input.parse().map_err(|_| ValidationError::Unparsable {
        field,
        value: input.to_string(),
        expected: "number",
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field,
            value: input.to_string(),
        });
    }
    Ok(value + 0.0)
}
