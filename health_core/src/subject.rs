//! # Subject
//!
//! The person a calculation is about. A [`Subject`] can only exist in a
//! validated state: construct it with [`Subject::new`] (or deserialize it,
//! which runs the same checks). Canonical weight and height are computed once
//! during validation, so every calculation downstream is infallible with
//! respect to units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{HealthError, HealthResult};
use crate::units::{to_canonical, HeightUnit, Measurement, MeasurementKind, WeightUnit};

/// Youngest accepted age in years
pub const MIN_AGE: u32 = 1;

/// Oldest accepted age in years
pub const MAX_AGE: u32 = 129;

/// Gender used by the sex-specific regressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validate an age in years.
pub fn validate_age(age: u32) -> HealthResult<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(HealthError::out_of_range("age", age, MIN_AGE, MAX_AGE));
    }
    Ok(())
}

/// Unvalidated subject fields, as deserialized from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInput {
    pub weight: Measurement,
    pub height: Measurement,
    pub age: u32,
    pub gender: Gender,
}

/// A validated subject.
///
/// ## JSON Example
///
/// ```json
/// {
///   "weight": { "unit": "kg", "value": 70.0 },
///   "height": { "unit": "cm", "value": 175.0 },
///   "age": 30,
///   "gender": "male"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubjectInput", into = "SubjectInput")]
pub struct Subject {
    weight: Measurement,
    height: Measurement,
    age: u32,
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
}

impl Subject {
    /// Validate the raw fields and build a subject.
    ///
    /// # Example
    ///
    /// ```rust
    /// use health_core::subject::{Gender, Subject};
    /// use health_core::units::Measurement;
    ///
    /// let subject = Subject::new(Measurement::lbs(154.0), Measurement::feet_inches(5.0, 9.0), 30, Gender::Male).unwrap();
    /// assert!((subject.weight_kg() - 69.853).abs() < 0.001);
    /// ```
    pub fn new(
        weight: Measurement,
        height: Measurement,
        age: u32,
        gender: Gender,
    ) -> HealthResult<Self> {
        let weight_kg = to_canonical(&weight, MeasurementKind::Weight)?;
        let height_cm = to_canonical(&height, MeasurementKind::Height)?;
        validate_age(age)?;

        Ok(Subject {
            weight,
            height,
            age,
            gender,
            weight_kg,
            height_cm,
        })
    }

    /// Weight as entered
    pub fn weight(&self) -> &Measurement {
        &self.weight
    }

    /// Height as entered
    pub fn height(&self) -> &Measurement {
        &self.height
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Canonical weight in kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Canonical height in centimeters
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Canonical height in meters
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    /// Unit the subject entered their weight in; results are reported back in it
    pub fn weight_unit(&self) -> WeightUnit {
        self.weight.weight_unit().unwrap_or_default()
    }

    /// Unit the subject entered their height in
    pub fn height_unit(&self) -> HeightUnit {
        self.height.height_unit().unwrap_or_default()
    }
}

impl TryFrom<SubjectInput> for Subject {
    type Error = HealthError;

    fn try_from(input: SubjectInput) -> Result<Self, Self::Error> {
        Subject::new(input.weight, input.height, input.age, input.gender)
    }
}

impl From<Subject> for SubjectInput {
    fn from(subject: Subject) -> Self {
        SubjectInput {
            weight: subject.weight,
            height: subject.height,
            age: subject.age,
            gender: subject.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_canonical_values() {
        let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male)
            .unwrap();
        assert_eq!(subject.weight_kg(), 70.0);
        assert_eq!(subject.height_cm(), 175.0);
        assert!((subject.height_m() - 1.75).abs() < 1e-12);
        assert_eq!(subject.weight_unit(), WeightUnit::Kg);
    }

    #[test]
    fn test_subject_rejects_bad_age() {
        let err = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 0, Gender::Male)
            .unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        let err = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 130, Gender::Female)
            .unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_subject_rejects_swapped_units() {
        let err = Subject::new(Measurement::cm(175.0), Measurement::kg(70.0), 30, Gender::Male)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_subject_deserialization_validates() {
        let json = r#"{
            "weight": { "unit": "kg", "value": 70.0 },
            "height": { "unit": "cm", "value": -175.0 },
            "age": 30,
            "gender": "male"
        }"#;
        assert!(serde_json::from_str::<Subject>(json).is_err());

        let json = json.replace("-175.0", "175.0");
        let subject: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(subject.height_cm(), 175.0);
        assert_eq!(subject.gender(), Gender::Male);
    }

    #[test]
    fn test_subject_serialization_roundtrip() {
        let subject = Subject::new(
            Measurement::lbs(180.0),
            Measurement::feet_inches(6.0, 1.0),
            45,
            Gender::Female,
        )
        .unwrap();
        let json = serde_json::to_string(&subject).unwrap();
        let roundtrip: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(subject, roundtrip);
    }
}
