//! # Health Recommendations
//!
//! Rule-based advice from BMI, body fat, age and gender. Rules fire in a
//! fixed order and the output keeps that order:
//!
//! 1. BMI below 18.5: caloric intake + strength training
//! 2. BMI 25 or above: caloric deficit + cardio
//! 3. Body fat above the healthy maximum for the gender: body fat reduction
//! 4. Age above 40: regular checkups
//! 5. Always: hydration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculations::body_composition::healthy_body_fat_range;
use crate::subject::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Nutrition,
    Exercise,
    Lifestyle,
    Health,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendationKind::Nutrition => "nutrition",
            RecommendationKind::Exercise => "exercise",
            RecommendationKind::Lifestyle => "lifestyle",
            RecommendationKind::Health => "health",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(name)
    }
}

/// A single piece of advice.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "lifestyle",
///   "title": "Stay Hydrated",
///   "description": "Drink 8-10 glasses of water daily for optimal health and metabolism.",
///   "priority": "low"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: &str, description: &str, priority: Priority) -> Self {
        Recommendation {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }
}

/// Build the recommendation list.
///
/// # Example
///
/// ```rust
/// use health_core::recommendations::recommend;
/// use health_core::subject::Gender;
///
/// let recs = recommend(22.9, 18.2, 30, Gender::Male);
/// assert_eq!(recs.len(), 1);
/// assert_eq!(recs[0].title, "Stay Hydrated");
/// ```
pub fn recommend(bmi: f64, body_fat: f64, age: u32, gender: Gender) -> Vec<Recommendation> {
    use Priority::*;
    use RecommendationKind::*;

    let mut recs = Vec::new();

    if bmi < 18.5 {
        recs.push(Recommendation::new(
            Nutrition,
            "Increase Caloric Intake",
            "Focus on nutrient-dense, high-calorie foods to gain healthy weight.",
            High,
        ));
        recs.push(Recommendation::new(
            Exercise,
            "Strength Training",
            "Include resistance exercises to build lean muscle mass.",
            Medium,
        ));
    } else if bmi >= 25.0 {
        recs.push(Recommendation::new(
            Nutrition,
            "Caloric Deficit",
            "Create a moderate caloric deficit through portion control and healthy food choices.",
            High,
        ));
        recs.push(Recommendation::new(
            Exercise,
            "Cardio Exercise",
            "150+ minutes of moderate-intensity cardio per week.",
            High,
        ));
    }

    let (_, body_fat_max) = healthy_body_fat_range(gender);
    if body_fat > body_fat_max {
        recs.push(Recommendation::new(
            Lifestyle,
            "Body Fat Reduction",
            "Focus on combining cardio with strength training to reduce body fat percentage.",
            Medium,
        ));
    }

    if age > 40 {
        recs.push(Recommendation::new(
            Health,
            "Regular Health Checkups",
            "Schedule regular health screenings for diabetes, cardiovascular health, and bone density.",
            Medium,
        ));
    }

    recs.push(Recommendation::new(
        Lifestyle,
        "Stay Hydrated",
        "Drink 8-10 glasses of water daily for optimal health and metabolism.",
        Low,
    ));

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_underweight_young() {
        let recs = recommend(17.0, 8.0, 22, Gender::Male);
        assert_eq!(
            titles(&recs),
            vec!["Increase Caloric Intake", "Strength Training", "Stay Hydrated"]
        );
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn test_overweight_older_all_rules() {
        let recs = recommend(31.0, 35.0, 50, Gender::Female);
        assert_eq!(
            titles(&recs),
            vec![
                "Caloric Deficit",
                "Cardio Exercise",
                "Body Fat Reduction",
                "Regular Health Checkups",
                "Stay Hydrated"
            ]
        );
    }

    #[test]
    fn test_body_fat_threshold_is_gender_specific() {
        // 25% is above the male maximum but inside the female range
        assert_eq!(recommend(22.0, 25.0, 30, Gender::Male).len(), 2);
        assert_eq!(recommend(22.0, 25.0, 30, Gender::Female).len(), 1);
    }

    #[test]
    fn test_age_boundary() {
        assert_eq!(recommend(22.0, 15.0, 40, Gender::Male).len(), 1);
        assert_eq!(recommend(22.0, 15.0, 41, Gender::Male).len(), 2);
    }

    #[test]
    fn test_hydration_always_last() {
        for bmi in [15.0, 22.0, 27.0, 45.0] {
            let recs = recommend(bmi, 40.0, 70, Gender::Male);
            let last = recs.last().unwrap();
            assert_eq!(last.title, "Stay Hydrated");
            assert_eq!(last.priority, Priority::Low);
        }
    }

    #[test]
    fn test_json_uses_type_key() {
        let recs = recommend(22.0, 15.0, 30, Gender::Male);
        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["type"], "lifestyle");
        assert_eq!(json["priority"], "low");
    }
}
