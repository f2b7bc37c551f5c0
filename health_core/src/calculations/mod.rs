//! # Health Calculations
//!
//! Every calculation is a pure function over validated inputs:
//!
//! - `calculate_*(input) -> HealthResult<*Result>` when the inputs can still
//!   be rejected (for example a logarithm of a non-positive circumference)
//! - plain return values when validation already happened upstream
//!
//! ## Available Calculations
//!
//! - [`bmi`] - BMI and WHO category
//! - [`body_composition`] - Body fat, ideal weight, BMI Prime, Ponderal Index
//! - [`ethnicity`] - Ethnicity-adjusted BMI categories
//! - [`army`] - AR 600-9 tape-test body fat
//!
//! [`assess`] runs the general pipeline (BMI, body composition,
//! recommendations, workout plans) in one call and returns a
//! [`ResultBundle`] ready for reporting.

pub mod army;
pub mod bmi;
pub mod body_composition;
pub mod ethnicity;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::HealthResult;
use crate::recommendations::{recommend, Recommendation};
use crate::subject::Subject;
use crate::workout::{build_weekly_schedule, select_plan, WeeklySchedule, WorkoutPlan};

pub use army::{calculate_army_body_fat, ArmyAssessment, ArmyCategory, ArmyMeasurements};
pub use bmi::{calculate_bmi, BmiCategory, BmiResult, WeightRange};
pub use body_composition::{calculate_body_composition, BodyComposition, WeightStatus};
pub use ethnicity::{calculate_ethnicity_adjusted_bmi, EthnicCategory, Ethnicity, EthnicityResult};

/// Everything the general calculator produces for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub subject: Subject,
    pub bmi: BmiResult,
    pub body_composition: BodyComposition,
    /// Actual weight against the Devine ideal weight, in the subject's weight unit
    pub weight_status: WeightStatus,
    pub recommendations: Vec<Recommendation>,
    pub workout_plans: Vec<WorkoutPlan>,
    pub schedule: WeeklySchedule,
    pub generated_on: NaiveDate,
}

impl ResultBundle {
    /// Devine ideal weight in the subject's weight unit
    pub fn ideal_weight(&self) -> f64 {
        body_composition::ideal_weight_in(
            self.subject.height_cm(),
            self.subject.age(),
            self.subject.gender(),
            self.subject.weight_unit(),
        )
    }
}

/// Run the full pipeline for a subject, dated today.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::assess;
/// use health_core::subject::{Gender, Subject};
/// use health_core::units::Measurement;
///
/// let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male).unwrap();
/// let bundle = assess(&subject).unwrap();
/// assert_eq!(bundle.bmi.bmi, 22.9);
/// assert_eq!(bundle.workout_plans.len(), 2);
/// ```
pub fn assess(subject: &Subject) -> HealthResult<ResultBundle> {
    assess_on(subject, chrono::Local::now().date_naive())
}

/// Run the full pipeline for a subject with an explicit report date.
pub fn assess_on(subject: &Subject, generated_on: NaiveDate) -> HealthResult<ResultBundle> {
    let bmi = calculate_bmi(subject)?;
    let composition = calculate_body_composition(subject, bmi.bmi);

    let unit = subject.weight_unit();
    let actual = crate::units::round_to(unit.from_kg(subject.weight_kg()), 1);
    let ideal = body_composition::ideal_weight_in(
        subject.height_cm(),
        subject.age(),
        subject.gender(),
        unit,
    );
    let weight_status = body_composition::weight_status(actual, ideal);

    let recommendations = recommend(
        bmi.bmi,
        composition.body_fat_percent,
        subject.age(),
        subject.gender(),
    );
    let workout_plans = select_plan(bmi.bmi, subject.age(), subject.gender());
    let schedule = build_weekly_schedule(&workout_plans);

    Ok(ResultBundle {
        subject: subject.clone(),
        bmi,
        body_composition: composition,
        weight_status,
        recommendations,
        workout_plans,
        schedule,
        generated_on,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::body_composition::WeightDirection;
    use crate::subject::Gender;
    use crate::units::Measurement;

    #[test]
    fn test_assess_reference_subject() {
        let subject = Subject::new(Measurement::kg(70.0), Measurement::cm(175.0), 30, Gender::Male)
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bundle = assess_on(&subject, date).unwrap();

        assert_eq!(bundle.bmi.bmi, 22.9);
        assert_eq!(bundle.bmi.category, BmiCategory::Normal);
        assert_eq!(bundle.body_composition.body_fat_percent, 18.2);
        assert_eq!(bundle.recommendations.len(), 1);
        assert_eq!(bundle.workout_plans[0].category, "Balanced Fitness");
        assert_eq!(bundle.generated_on, date);
        // Devine ideal ≈ 71.0 kg
        assert_eq!(bundle.weight_status.direction, WeightDirection::Below);
    }

    #[test]
    fn test_assess_reports_in_entered_unit() {
        let subject = Subject::new(
            Measurement::lbs(220.0),
            Measurement::feet_inches(5.0, 10.0),
            50,
            Gender::Male,
        )
        .unwrap();
        let bundle = assess(&subject).unwrap();
        // 99.79 kg / 1.778² = 31.6
        assert_eq!(bundle.bmi.category, BmiCategory::ObeseI);
        assert_eq!(bundle.weight_status.direction, WeightDirection::Above);
        // 70 in, age 50: 73 + 2.5 = 75.5 kg = 166.4 lbs
        assert_eq!(bundle.ideal_weight(), 166.4);
    }

    #[test]
    fn test_bundle_serializes() {
        let subject = Subject::new(Measurement::kg(95.0), Measurement::cm(170.0), 45, Gender::Female)
            .unwrap();
        let bundle = assess(&subject).unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["subject"]["gender"], "female");
        assert_eq!(json["recommendations"][0]["type"], "nutrition");
        assert_eq!(json["schedule"]["days"].as_array().unwrap().len(), 7);
    }
}
