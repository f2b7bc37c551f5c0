//! # Body Composition
//!
//! Estimates derived from BMI, age and gender:
//!
//! - Body fat percentage (Deurenberg regression)
//! - Ideal body weight (Devine regression with an age adjustment)
//! - BMI Prime and Ponderal Index
//!
//! ## Formulas
//!
//! ```text
//! Body fat (male)   = 1.20·BMI + 0.23·age − 16.2
//! Body fat (female) = 1.20·BMI + 0.23·age − 5.4
//! Ideal (male)      = 50.0 + 2.3·(height_in − 60)  [+ 0.1·(age − 25) if age > 25]
//! Ideal (female)    = 45.5 + 2.3·(height_in − 60)  [+ 0.1·(age − 25) if age > 25]
//! BMI Prime         = BMI / 25
//! Ponderal Index    = kg / m³
//! ```
//!
//! The age term is not part of the published Devine formula. It is kept as
//! the calculator has always applied it.
//!
//! ## Example
//!
//! ```rust
//! use health_core::calculations::body_composition::estimate_body_fat;
//! use health_core::subject::Gender;
//!
//! // 1.20·22.9 + 0.23·30 − 16.2 = 18.18
//! assert_eq!(estimate_body_fat(22.9, 30, Gender::Male), 18.2);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::bmi::{WeightRange, HEALTHY_BMI_MAX, HEALTHY_BMI_MIN};
use crate::subject::{Gender, Subject};
use crate::units::{round_to, Centimeters, Inches, WeightUnit};

/// Healthy body fat range (percent) used by the recommendation rules
pub fn healthy_body_fat_range(gender: Gender) -> (f64, f64) {
    match gender {
        Gender::Male => (10.0, 20.0),
        Gender::Female => (16.0, 30.0),
    }
}

/// Estimate body fat percentage with the Deurenberg formula.
///
/// Never negative; rounded to 1 decimal.
pub fn estimate_body_fat(bmi: f64, age: u32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 16.2,
        Gender::Female => 5.4,
    };
    let body_fat = 1.20 * bmi + 0.23 * f64::from(age) - offset;
    round_to(body_fat, 1).max(0.0)
}

fn devine_kg(height_cm: f64, age: u32, gender: Gender) -> f64 {
    let height_in = Inches::from(Centimeters(height_cm)).0;
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };
    let mut ideal = base + 2.3 * (height_in - 60.0);
    if age > 25 {
        ideal += f64::from(age - 25) * 0.1;
    }
    ideal
}

/// Ideal body weight in kilograms (Devine with age adjustment), 1 decimal.
pub fn ideal_weight(height_cm: f64, age: u32, gender: Gender) -> f64 {
    round_to(devine_kg(height_cm, age, gender), 1)
}

/// Ideal body weight in the requested unit, 1 decimal.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::body_composition::ideal_weight_in;
/// use health_core::subject::Gender;
/// use health_core::units::WeightUnit;
///
/// // 70 in tall man, age 25: 50 + 2.3·10 = 73 kg
/// assert_eq!(ideal_weight_in(177.8, 25, Gender::Male, WeightUnit::Kg), 73.0);
/// assert_eq!(ideal_weight_in(177.8, 25, Gender::Male, WeightUnit::Lbs), 160.9);
/// ```
pub fn ideal_weight_in(height_cm: f64, age: u32, gender: Gender, unit: WeightUnit) -> f64 {
    round_to(unit.from_kg(devine_kg(height_cm, age, gender)), 1)
}

/// BMI Prime band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiPrimeCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiPrimeCategory {
    pub fn classify(prime: f64) -> Self {
        if prime < 0.74 {
            BmiPrimeCategory::Underweight
        } else if prime <= 1.0 {
            BmiPrimeCategory::Normal
        } else if prime <= 1.2 {
            BmiPrimeCategory::Overweight
        } else {
            BmiPrimeCategory::Obese
        }
    }
}

/// Ponderal Index band (normal is 11–15 kg/m³)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PonderalCategory {
    Low,
    Normal,
    High,
}

impl PonderalCategory {
    pub fn classify(index: f64) -> Self {
        if index < 11.0 {
            PonderalCategory::Low
        } else if index <= 15.0 {
            PonderalCategory::Normal
        } else {
            PonderalCategory::High
        }
    }
}

/// BMI divided by 25, 2 decimals.
pub fn bmi_prime(bmi: f64) -> f64 {
    round_to(bmi / 25.0, 2)
}

/// Weight over height cubed (kg/m³), 1 decimal.
pub fn ponderal_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to(weight_kg / height_m.powi(3), 1)
}

/// Which side of the ideal weight a subject is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightDirection {
    Above,
    Below,
    At,
}

/// Distance between actual and ideal weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightStatus {
    /// Absolute difference, same unit as the inputs, 1 decimal
    pub difference: f64,
    pub direction: WeightDirection,
}

/// Compare an actual weight to an ideal weight (both in the same unit).
pub fn weight_status(actual: f64, ideal: f64) -> WeightStatus {
    let direction = if actual > ideal {
        WeightDirection::Above
    } else if actual < ideal {
        WeightDirection::Below
    } else {
        WeightDirection::At
    };
    WeightStatus {
        difference: round_to((actual - ideal).abs(), 1),
        direction,
    }
}

/// Derived body composition metrics for a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    pub body_fat_percent: f64,
    /// Devine ideal weight (kg)
    pub ideal_weight_kg: f64,
    /// Weights (kg) giving a BMI of 18.5 to 24.9
    pub ideal_weight_range: WeightRange,
    pub bmi_prime: f64,
    pub bmi_prime_category: BmiPrimeCategory,
    pub ponderal_index: f64,
    pub ponderal_category: PonderalCategory,
}

/// Calculate body composition for a subject whose BMI is already known.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::body_composition::calculate_body_composition;
/// use health_core::subject::{Gender, Subject};
/// use health_core::units::Measurement;
///
/// let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male).unwrap();
/// let composition = calculate_body_composition(&subject, 22.9);
/// assert_eq!(composition.body_fat_percent, 18.2);
/// ```
pub fn calculate_body_composition(subject: &Subject, bmi: f64) -> BodyComposition {
    let body_fat_percent = estimate_body_fat(bmi, subject.age(), subject.gender());
    let prime = bmi_prime(bmi);
    let ponderal = ponderal_index(subject.weight_kg(), subject.height_cm());

    tracing::debug!(
        body_fat_percent,
        bmi_prime = prime,
        ponderal_index = ponderal,
        "calculated body composition"
    );

    BodyComposition {
        body_fat_percent,
        ideal_weight_kg: ideal_weight(subject.height_cm(), subject.age(), subject.gender()),
        ideal_weight_range: WeightRange::for_bmi_bounds(
            HEALTHY_BMI_MIN,
            HEALTHY_BMI_MAX,
            subject.height_m(),
        ),
        bmi_prime: prime,
        bmi_prime_category: BmiPrimeCategory::classify(prime),
        ponderal_index: ponderal,
        ponderal_category: PonderalCategory::classify(ponderal),
    }
}
