//! # Input Parsing
//!
//! Strict parse-and-validate step for text entered by a user. No calculation
//! function accepts raw strings; everything passes through here first and
//! comes out as a typed [`Subject`] (or number/enum) or a validation error.
//!
//! ## Example
//!
//! ```rust
//! use health_core::input::RawSubject;
//!
//! let raw = RawSubject {
//!     weight: "154".into(),
//!     weight_unit: "lbs".into(),
//!     height: "5.9".into(),
//!     height_unit: "ft".into(),
//!     age: "30".into(),
//!     gender: "male".into(),
//! };
//! let subject = raw.parse().unwrap();
//! assert!((subject.height_cm() - 175.26).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{HealthError, HealthResult};
use crate::subject::{validate_age, Gender, Subject};
use crate::units::{parse_feet_inches, HeightUnit, Measurement, WeightUnit};

/// Parse a required decimal number.
pub fn parse_number(field: &str, text: &str) -> HealthResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HealthError::missing_field(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| HealthError::invalid_input(field, trimmed, "Not a number"))?;
    if !value.is_finite() {
        return Err(HealthError::invalid_input(field, trimmed, "Number must be finite"));
    }
    Ok(value)
}

/// Parse an optional decimal number; blank text is `None`.
pub fn parse_optional_number(field: &str, text: &str) -> HealthResult<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_number(field, text).map(Some)
}

/// Parse an age in whole years.
pub fn parse_age(text: &str) -> HealthResult<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HealthError::missing_field("age"));
    }
    let age: u32 = trimmed
        .parse()
        .map_err(|_| HealthError::invalid_input("age", trimmed, "Age must be a whole number of years"))?;
    validate_age(age)?;
    Ok(age)
}

/// Parse a gender (`male`/`female`, or `m`/`f`, any case).
pub fn parse_gender(text: &str) -> HealthResult<Gender> {
    let trimmed = text.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Err(HealthError::missing_field("gender")),
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        _ => Err(HealthError::invalid_input(
            "gender",
            trimmed,
            "Expected 'male' or 'female'",
        )),
    }
}

/// Parse a weight unit (`kg`, `lbs`/`lb`).
pub fn parse_weight_unit(text: &str) -> HealthResult<WeightUnit> {
    let trimmed = text.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "kg" | "kgs" | "metric" => Ok(WeightUnit::Kg),
        "lb" | "lbs" | "imperial" => Ok(WeightUnit::Lbs),
        _ => Err(HealthError::invalid_input(
            "weight_unit",
            trimmed,
            "Expected 'kg' or 'lbs'",
        )),
    }
}

/// Parse a height unit (`cm`, `in`/`inches`, `ft`/`feet-inches`).
pub fn parse_height_unit(text: &str) -> HealthResult<HeightUnit> {
    let trimmed = text.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "cm" | "metric" => Ok(HeightUnit::Cm),
        "in" | "inch" | "inches" => Ok(HeightUnit::Inches),
        "ft" | "feet" | "feet-inches" | "ft-in" | "imperial" => Ok(HeightUnit::FeetInches),
        _ => Err(HealthError::invalid_input(
            "height_unit",
            trimmed,
            "Expected 'cm', 'in' or 'ft'",
        )),
    }
}

/// Parse a weight value in the given unit.
pub fn parse_weight(text: &str, unit: WeightUnit) -> HealthResult<Measurement> {
    let value = parse_number("weight", text)?;
    Ok(match unit {
        WeightUnit::Kg => Measurement::kg(value),
        WeightUnit::Lbs => Measurement::lbs(value),
    })
}

/// Parse a height value in the given unit.
///
/// For [`HeightUnit::FeetInches`] the text uses the `feet.inches` notation
/// where `"6.10"` means 6 ft 10 in.
pub fn parse_height(text: &str, unit: HeightUnit) -> HealthResult<Measurement> {
    match unit {
        HeightUnit::Cm => Ok(Measurement::cm(parse_number("height", text)?)),
        HeightUnit::Inches => Ok(Measurement::inches(parse_number("height", text)?)),
        HeightUnit::FeetInches => parse_feet_inches(text),
    }
}

/// A subject exactly as typed into a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubject {
    pub weight: String,
    pub weight_unit: String,
    pub height: String,
    pub height_unit: String,
    pub age: String,
    pub gender: String,
}

impl RawSubject {
    /// Parse and validate every field, failing on the first problem.
    pub fn parse(&self) -> HealthResult<Subject> {
        let weight_unit = parse_weight_unit(&self.weight_unit)?;
        let height_unit = parse_height_unit(&self.height_unit)?;
        let weight = parse_weight(&self.weight, weight_unit)?;
        let height = parse_height(&self.height, height_unit)?;
        let age = parse_age(&self.age)?;
        let gender = parse_gender(&self.gender)?;
        Subject::new(weight, height, age, gender)
    }
}
