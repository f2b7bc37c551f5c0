//! # Army Body Fat (AR 600-9 tape test)
//!
//! Circumference-based body fat estimate and compliance check against the
//! age/gender banded maximums.
//!
//! ## Formulas (all lengths in inches)
//!
//! ```text
//! Male:   86.010·log10(waist − neck)       − 70.041·log10(height) + 36.76
//! Female: 163.205·log10(waist + hip − neck) − 97.684·log10(height) − 78.387
//! ```
//!
//! ## Maximum Body Fat
//!
//! | Age   | Male | Female |
//! |-------|------|--------|
//! | ≤ 20  | 20%  | 30%    |
//! | 21–27 | 22%  | 32%    |
//! | 28–39 | 24%  | 34%    |
//! | 40+   | 26%  | 36%    |
//!
//! The rounded estimate is graded as a fraction of the maximum: ≤ 70%
//! Excellent, ≤ 85% Good, ≤ 100% Acceptable, ≤ 110% Over Standard, otherwise
//! Significantly Over. Only the first three pass.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{HealthError, HealthResult};
use crate::subject::{validate_age, Gender};
use crate::units::round_to;

/// Tape measurements for one soldier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmyMeasurements {
    pub gender: Gender,
    pub age: u32,
    pub height_in: f64,
    pub neck_in: f64,
    pub waist_in: f64,
    /// Required for women, ignored for men
    #[serde(default)]
    pub hip_in: Option<f64>,
    /// Enables the fat/lean mass split
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

fn require_positive(field: &str, value: f64) -> HealthResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HealthError::invalid_measurement(
            field,
            value.to_string(),
            "Measurement must be positive",
        ));
    }
    Ok(())
}

impl ArmyMeasurements {
    pub fn validate(&self) -> HealthResult<()> {
        validate_age(self.age)?;
        require_positive("height", self.height_in)?;
        require_positive("neck", self.neck_in)?;
        require_positive("waist", self.waist_in)?;

        if self.gender == Gender::Female {
            match self.hip_in {
                Some(hip) => require_positive("hip", hip)?,
                None => return Err(HealthError::missing_field("hip")),
            }
        }

        if let Some(weight) = self.weight_kg {
            require_positive("weight", weight)?;
        }

        Ok(())
    }
}

/// Compliance grade relative to the maximum allowed body fat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmyCategory {
    Excellent,
    Good,
    Acceptable,
    #[serde(rename = "Over Standard")]
    OverStandard,
    #[serde(rename = "Significantly Over")]
    SignificantlyOver,
}

impl ArmyCategory {
    /// Grade a body fat percentage against a maximum.
    ///
    /// Both sides are compared in whole tenths of a percent, so a value
    /// sitting exactly on a threshold (15.4 against 0.70 × 22) lands in the
    /// better category.
    pub fn grade(body_fat: f64, max_allowed: f64) -> Self {
        let tenths = |value: f64| (value * 10.0).round() as i64;
        let body_fat = tenths(body_fat);

        if body_fat <= tenths(max_allowed * 0.7) {
            ArmyCategory::Excellent
        } else if body_fat <= tenths(max_allowed * 0.85) {
            ArmyCategory::Good
        } else if body_fat <= tenths(max_allowed) {
            ArmyCategory::Acceptable
        } else if body_fat <= tenths(max_allowed * 1.1) {
            ArmyCategory::OverStandard
        } else {
            ArmyCategory::SignificantlyOver
        }
    }

    pub fn passes(&self) -> bool {
        matches!(
            self,
            ArmyCategory::Excellent | ArmyCategory::Good | ArmyCategory::Acceptable
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArmyCategory::Excellent => "Excellent",
            ArmyCategory::Good => "Good",
            ArmyCategory::Acceptable => "Acceptable",
            ArmyCategory::OverStandard => "Over Standard",
            ArmyCategory::SignificantlyOver => "Significantly Over",
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ArmyCategory::Excellent => "PASS - Well within Army standards",
            ArmyCategory::Good => "PASS - Within Army standards",
            ArmyCategory::Acceptable => "PASS - At Army standard limit",
            ArmyCategory::OverStandard => "FAIL - Exceeds Army standards",
            ArmyCategory::SignificantlyOver => "FAIL - Significantly exceeds standards",
        }
    }

    pub fn recommendations(&self) -> [&'static str; 3] {
        match self {
            ArmyCategory::Excellent => [
                "Maintain current fitness level",
                "Continue regular PT",
                "Monitor body composition",
            ],
            ArmyCategory::Good => [
                "Maintain current fitness routine",
                "Monitor body fat levels",
                "Consider additional cardio",
            ],
            ArmyCategory::Acceptable => [
                "Focus on body fat reduction",
                "Increase cardio training",
                "Monitor diet closely",
            ],
            ArmyCategory::OverStandard => [
                "Immediate body composition program",
                "Consult with nutritionist",
                "Intensive fitness plan required",
            ],
            ArmyCategory::SignificantlyOver => [
                "Urgent body composition program",
                "Medical evaluation recommended",
                "Risk of administrative action",
            ],
        }
    }
}

impl fmt::Display for ArmyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maximum allowed body fat percentage for an age and gender.
pub fn max_body_fat(age: u32, gender: Gender) -> f64 {
    let (male, female) = match age {
        0..=20 => (20.0, 30.0),
        21..=27 => (22.0, 32.0),
        28..=39 => (24.0, 34.0),
        _ => (26.0, 36.0),
    };
    match gender {
        Gender::Male => male,
        Gender::Female => female,
    }
}

/// Raw (unrounded) tape-test estimate.
///
/// # Errors
///
/// `InvalidMeasurement` when the circumference term is not positive, since
/// its logarithm would be undefined.
pub fn tape_body_fat(m: &ArmyMeasurements) -> HealthResult<f64> {
    let circumference = match m.gender {
        Gender::Male => m.waist_in - m.neck_in,
        Gender::Female => {
            let hip = m.hip_in.ok_or_else(|| HealthError::missing_field("hip"))?;
            m.waist_in + hip - m.neck_in
        }
    };

    if circumference <= 0.0 {
        return Err(HealthError::invalid_measurement(
            "waist",
            m.waist_in.to_string(),
            "Waist measurement must exceed neck measurement",
        ));
    }

    let height = m.height_in.log10();
    Ok(match m.gender {
        Gender::Male => 86.010 * circumference.log10() - 70.041 * height + 36.76,
        Gender::Female => 163.205 * circumference.log10() - 97.684 * height - 78.387,
    })
}

/// Army tape-test assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmyAssessment {
    /// Estimated body fat, 1 decimal
    pub body_fat_percent: f64,
    pub max_allowed: f64,
    pub category: ArmyCategory,
    pub pass: bool,
    pub status: String,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
}

/// Calculate body fat and Army compliance from tape measurements.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::army::{calculate_army_body_fat, ArmyCategory, ArmyMeasurements};
/// use health_core::subject::Gender;
///
/// let m = ArmyMeasurements {
///     gender: Gender::Male,
///     age: 25,
///     height_in: 70.0,
///     neck_in: 16.0,
///     waist_in: 34.0,
///     hip_in: None,
///     weight_kg: None,
/// };
/// let result = calculate_army_body_fat(&m).unwrap();
/// assert_eq!(result.body_fat_percent, 15.5);
/// assert_eq!(result.category, ArmyCategory::Good);
/// assert!(result.pass);
/// ```
pub fn calculate_army_body_fat(measurements: &ArmyMeasurements) -> HealthResult<ArmyAssessment> {
    measurements.validate()?;

    let body_fat_percent = round_to(tape_body_fat(measurements)?, 1);
    let max_allowed = max_body_fat(measurements.age, measurements.gender);
    let category = ArmyCategory::grade(body_fat_percent, max_allowed);

    let (fat_mass_kg, lean_mass_kg) = match measurements.weight_kg {
        Some(weight) => {
            let fat = weight * body_fat_percent / 100.0;
            (Some(round_to(fat, 1)), Some(round_to(weight - fat, 1)))
        }
        None => (None, None),
    };

    tracing::debug!(
        body_fat_percent,
        max_allowed,
        category = category.label(),
        "calculated army body fat"
    );

    Ok(ArmyAssessment {
        body_fat_percent,
        max_allowed,
        category,
        pass: category.passes(),
        status: category.status().to_string(),
        recommendations: category.recommendations().iter().map(|s| s.to_string()).collect(),
        fat_mass_kg,
        lean_mass_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn male(neck: f64, waist: f64) -> ArmyMeasurements {
        ArmyMeasurements {
            gender: Gender::Male,
            age: 25,
            height_in: 70.0,
            neck_in: neck,
            waist_in: waist,
            hip_in: None,
            weight_kg: None,
        }
    }

    #[test]
    fn test_male_reference() {
        // 86.010·log10(18) − 70.041·log10(70) + 36.76 = 15.49
        let result = calculate_army_body_fat(&male(16.0, 34.0)).unwrap();
        assert_eq!(result.body_fat_percent, 15.5);
        assert_eq!(result.max_allowed, 22.0);
        // 15.4 < 15.5 ≤ 18.7
        assert_eq!(result.category, ArmyCategory::Good);
        assert!(result.pass);
        assert_eq!(result.status, "PASS - Within Army standards");
        assert_eq!(result.recommendations[2], "Consider additional cardio");
        assert!(result.fat_mass_kg.is_none());
    }

    #[test]
    fn test_female_reference() {
        // 163.205·log10(57) − 97.684·log10(65) − 78.387 = 31.09
        let m = ArmyMeasurements {
            gender: Gender::Female,
            age: 30,
            height_in: 65.0,
            neck_in: 13.0,
            waist_in: 30.0,
            hip_in: Some(40.0),
            weight_kg: Some(60.0),
        };
        let result = calculate_army_body_fat(&m).unwrap();
        assert_eq!(result.body_fat_percent, 31.1);
        assert_eq!(result.max_allowed, 34.0);
        assert_eq!(result.category, ArmyCategory::Acceptable);
        // 60 · 0.311 = 18.66
        assert_eq!(result.fat_mass_kg, Some(18.7));
        assert_eq!(result.lean_mass_kg, Some(41.3));
    }

    #[test]
    fn test_waist_not_above_neck_rejected() {
        let err = calculate_army_body_fat(&male(40.0, 35.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MEASUREMENT");
        let err = calculate_army_body_fat(&male(35.0, 35.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MEASUREMENT");
    }

    #[test]
    fn test_female_requires_hip() {
        let mut m = male(13.0, 30.0);
        m.gender = Gender::Female;
        assert_eq!(calculate_army_body_fat(&m).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_nonpositive_measurements_rejected() {
        let mut m = male(16.0, 34.0);
        m.height_in = 0.0;
        assert_eq!(calculate_army_body_fat(&m).unwrap_err().error_code(), "INVALID_MEASUREMENT");
        let mut m = male(16.0, 34.0);
        m.weight_kg = Some(-5.0);
        assert_eq!(calculate_army_body_fat(&m).unwrap_err().error_code(), "INVALID_MEASUREMENT");
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(max_body_fat(17, Gender::Male), 20.0);
        assert_eq!(max_body_fat(20, Gender::Female), 30.0);
        assert_eq!(max_body_fat(21, Gender::Male), 22.0);
        assert_eq!(max_body_fat(27, Gender::Female), 32.0);
        assert_eq!(max_body_fat(39, Gender::Male), 24.0);
        assert_eq!(max_body_fat(40, Gender::Female), 36.0);
    }

    #[test]
    fn test_grading() {
        assert_eq!(ArmyCategory::grade(15.0, 22.0), ArmyCategory::Excellent);
        assert_eq!(ArmyCategory::grade(18.7, 22.0), ArmyCategory::Good);
        assert_eq!(ArmyCategory::grade(22.0, 22.0), ArmyCategory::Acceptable);
        assert_eq!(ArmyCategory::grade(24.0, 22.0), ArmyCategory::OverStandard);
        assert_eq!(ArmyCategory::grade(24.3, 22.0), ArmyCategory::SignificantlyOver);
        assert!(!ArmyCategory::OverStandard.passes());
        assert!(ArmyCategory::Acceptable.passes());
    }

    #[test]
    fn test_grading_on_exact_thresholds() {
        for max in [20.0, 22.0, 24.0, 26.0, 30.0, 32.0, 34.0, 36.0] {
            let excellent = round_to(max * 0.7, 1);
            let good = round_to(max * 0.85, 1);
            let over = round_to(max * 1.1, 1);

            assert_eq!(ArmyCategory::grade(excellent, max), ArmyCategory::Excellent, "{excellent} of {max}");
            assert_eq!(ArmyCategory::grade(excellent + 0.1, max), ArmyCategory::Good, "{excellent}+0.1 of {max}");
            assert_eq!(ArmyCategory::grade(good, max), ArmyCategory::Good, "{good} of {max}");
            assert_eq!(ArmyCategory::grade(good + 0.1, max), ArmyCategory::Acceptable, "{good}+0.1 of {max}");
            assert_eq!(ArmyCategory::grade(max, max), ArmyCategory::Acceptable, "{max} of {max}");
            assert_eq!(ArmyCategory::grade(max + 0.1, max), ArmyCategory::OverStandard, "{max}+0.1 of {max}");
            assert_eq!(ArmyCategory::grade(over, max), ArmyCategory::OverStandard, "{over} of {max}");
            assert_eq!(ArmyCategory::grade(over + 0.1, max), ArmyCategory::SignificantlyOver, "{over}+0.1 of {max}");
        }
        // 22·0.7 is 15.399999999999999 in floating point
        assert_eq!(ArmyCategory::grade(15.4, 22.0), ArmyCategory::Excellent);
        assert_eq!(ArmyCategory::grade(22.1, 26.0), ArmyCategory::Good);
        assert_eq!(ArmyCategory::grade(30.6, 36.0), ArmyCategory::Good);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ArmyCategory::OverStandard).unwrap(),
            "\"Over Standard\""
        );
    }
}
