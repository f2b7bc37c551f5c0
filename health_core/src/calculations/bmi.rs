//! # BMI Calculation
//!
//! Body Mass Index from canonical weight and height, classified against the
//! WHO cut points.
//!
//! ## Category Boundaries
//!
//! Each band includes its lower bound and excludes its upper bound:
//!
//! | Category    | BMI range     |
//! |-------------|---------------|
//! | Underweight | < 18.5        |
//! | Normal      | 18.5 – < 25   |
//! | Overweight  | 25 – < 30     |
//! | Obese I     | 30 – < 35     |
//! | Obese II    | 35 – < 40     |
//! | Obese III   | ≥ 40          |
//!
//! ## Example
//!
//! ```rust
//! use health_core::calculations::bmi::{compute_bmi, BmiCategory};
//!
//! let bmi = compute_bmi(70.0, 175.0).unwrap();
//! assert_eq!(bmi, 22.9);
//! assert_eq!(BmiCategory::classify(bmi), BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{HealthError, HealthResult};
use crate::subject::Subject;
use crate::units::round_to;

/// Lower bound of the healthy weight range (BMI)
pub const HEALTHY_BMI_MIN: f64 = 18.5;

/// Upper value used for the healthy weight range (BMI)
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// WHO BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    #[serde(rename = "Obese I")]
    ObeseI,
    #[serde(rename = "Obese II")]
    ObeseII,
    #[serde(rename = "Obese III")]
    ObeseIII,
}

impl BmiCategory {
    /// All categories in ascending BMI order
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::ObeseI,
        BmiCategory::ObeseII,
        BmiCategory::ObeseIII,
    ];

    /// Classify a BMI value.
    pub fn classify(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObeseI
        } else if bmi < 40.0 {
            BmiCategory::ObeseII
        } else {
            BmiCategory::ObeseIII
        }
    }

    /// Inclusive lower and exclusive upper bound; `None` means unbounded.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            BmiCategory::Underweight => (None, Some(18.5)),
            BmiCategory::Normal => (Some(18.5), Some(25.0)),
            BmiCategory::Overweight => (Some(25.0), Some(30.0)),
            BmiCategory::ObeseI => (Some(30.0), Some(35.0)),
            BmiCategory::ObeseII => (Some(35.0), Some(40.0)),
            BmiCategory::ObeseIII => (Some(40.0), None),
        }
    }

    /// Full display name
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseI => "Obesity Class 1",
            BmiCategory::ObeseII => "Obesity Class 2",
            BmiCategory::ObeseIII => "Obesity Class 3",
        }
    }

    /// Short name used on the range chart
    pub fn chart_label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseI => "Obese I",
            BmiCategory::ObeseII => "Obese II",
            BmiCategory::ObeseIII => "Obese III",
        }
    }

    pub fn is_obese(&self) -> bool {
        matches!(
            self,
            BmiCategory::ObeseI | BmiCategory::ObeseII | BmiCategory::ObeseIII
        )
    }

    /// Health risk narrative for this category
    pub fn health_risk(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Increased risk of nutritional deficiency and osteoporosis",
            BmiCategory::Normal => "Lower risk of weight-related health problems",
            BmiCategory::Overweight => "Increased risk of cardiovascular disease and diabetes",
            _ => "High risk of serious health conditions",
        }
    }

    /// Short fixed advice list for this category
    pub fn advice(&self) -> &'static [&'static str] {
        match self {
            BmiCategory::Underweight => &[
                "Consult with a healthcare provider",
                "Consider a balanced diet to gain healthy weight",
                "Include strength training exercises",
            ],
            BmiCategory::Normal => &[
                "Maintain current lifestyle",
                "Continue regular physical activity",
                "Keep eating a balanced diet",
            ],
            BmiCategory::Overweight => &[
                "Consider gradual weight loss",
                "Increase physical activity",
                "Focus on portion control and healthy eating",
            ],
            _ => &[
                "Consult healthcare provider immediately",
                "Consider professional weight management program",
                "Focus on lifestyle changes with medical supervision",
            ],
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A weight range in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    /// Weights that give `bmi_min..=bmi_max` at the given height, 1 decimal.
    pub fn for_bmi_bounds(bmi_min: f64, bmi_max: f64, height_m: f64) -> Self {
        let h2 = height_m * height_m;
        WeightRange {
            min: round_to(bmi_min * h2, 1),
            max: round_to(bmi_max * h2, 1),
        }
    }
}

/// BMI result for a subject.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bmi": 22.9,
///   "category": "Normal",
///   "health_risk": "Lower risk of weight-related health problems",
///   "advice": ["Maintain current lifestyle", "..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to 1 decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub health_risk: String,
    pub advice: Vec<String>,
}

/// Compute BMI from kilograms and centimeters, rounded to 1 decimal.
///
/// # Errors
///
/// `InvalidMeasurement` if either value is zero, negative or not finite.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> HealthResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(HealthError::invalid_measurement(
            "weight",
            weight_kg.to_string(),
            "Weight must be positive",
        ));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(HealthError::invalid_measurement(
            "height",
            height_cm.to_string(),
            "Height must be positive",
        ));
    }

    let height_m = height_cm / 100.0;
    Ok(round_to(weight_kg / (height_m * height_m), 1))
}

/// Classify a BMI value (see [`BmiCategory::classify`]).
pub fn classify(bmi: f64) -> BmiCategory {
    BmiCategory::classify(bmi)
}

/// Calculate BMI and category for a subject.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::bmi::{calculate_bmi, BmiCategory};
/// use health_core::subject::{Gender, Subject};
/// use health_core::units::Measurement;
///
/// let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male).unwrap();
/// let result = calculate_bmi(&subject).unwrap();
/// assert_eq!(result.bmi, 22.9);
/// assert_eq!(result.category, BmiCategory::Normal);
/// ```
pub fn calculate_bmi(subject: &Subject) -> HealthResult<BmiResult> {
    let bmi = compute_bmi(subject.weight_kg(), subject.height_cm())?;
    let category = BmiCategory::classify(bmi);

    tracing::debug!(bmi, category = category.label(), "calculated BMI");

    Ok(BmiResult {
        bmi,
        category,
        health_risk: category.health_risk().to_string(),
        advice: category.advice().iter().map(|s| s.to_string()).collect(),
    })
}
