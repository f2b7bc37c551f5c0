//! # Ethnicity-Adjusted BMI
//!
//! Classifies BMI against ethnicity-specific cut points. Several populations
//! carry higher metabolic risk at lower BMI, so the normal/overweight bounds
//! move down (East and South Asian) or up (Pacific Islander).
//!
//! ## Profiles
//!
//! | Key(s)                                   | Profile                  | Cut points (U/N/O/Ob) |
//! |------------------------------------------|--------------------------|-----------------------|
//! | `asian`, `east-asian`                    | East Asian               | 18.5 / 23 / 25 / 30   |
//! | `south-asian`                            | South Asian              | 18.5 / 23 / 25 / 30   |
//! | `pacific-islander`                       | Pacific Islander         | 18.5 / 26 / 32 / 37   |
//! | `african`                                | African/African American | 18.5 / 25 / 30 / 35   |
//! | `hispanic`                               | Hispanic/Latino          | 18.5 / 25 / 30 / 35   |
//! | everything else (including unknown keys) | Standard/Mixed Ethnicity | 18.5 / 25 / 30 / 35   |
//!
//! The `underweight`, `normal` and `overweight` cut points are exclusive
//! upper bounds of their category. A BMI at or above `overweight` is Obese.
//!
//! The ideal weight range here is derived from the profile's cut points and
//! is deliberately independent of the Devine ideal weight in
//! [`body_composition`](crate::calculations::body_composition).
//!
//! ## Example
//!
//! ```rust
//! use health_core::calculations::ethnicity::{classify, EthnicCategory, Ethnicity};
//!
//! assert_eq!(classify(23.5, Ethnicity::EastAsian), EthnicCategory::Overweight);
//! assert_eq!(classify(23.5, Ethnicity::Caucasian), EthnicCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculations::bmi::{compute_bmi, WeightRange};
use crate::errors::{HealthError, HealthResult};
use crate::subject::Subject;

/// Ethnicity selection (11 keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ethnicity {
    Asian,
    SouthAsian,
    EastAsian,
    SoutheastAsian,
    PacificIslander,
    African,
    Caucasian,
    Hispanic,
    MiddleEastern,
    Indigenous,
    Mixed,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 11] = [
        Ethnicity::Asian,
        Ethnicity::SouthAsian,
        Ethnicity::EastAsian,
        Ethnicity::SoutheastAsian,
        Ethnicity::PacificIslander,
        Ethnicity::African,
        Ethnicity::Caucasian,
        Ethnicity::Hispanic,
        Ethnicity::MiddleEastern,
        Ethnicity::Indigenous,
        Ethnicity::Mixed,
    ];

    /// The stable key for this ethnicity
    pub fn key(&self) -> &'static str {
        match self {
            Ethnicity::Asian => "asian",
            Ethnicity::SouthAsian => "south-asian",
            Ethnicity::EastAsian => "east-asian",
            Ethnicity::SoutheastAsian => "southeast-asian",
            Ethnicity::PacificIslander => "pacific-islander",
            Ethnicity::African => "african",
            Ethnicity::Caucasian => "caucasian",
            Ethnicity::Hispanic => "hispanic",
            Ethnicity::MiddleEastern => "middle-eastern",
            Ethnicity::Indigenous => "indigenous",
            Ethnicity::Mixed => "mixed",
        }
    }

    /// Selection label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Ethnicity::Asian => "Asian",
            Ethnicity::SouthAsian => "South Asian (Indian, Pakistani, Bangladeshi, Sri Lankan)",
            Ethnicity::EastAsian => "East Asian (Chinese, Japanese, Korean)",
            Ethnicity::SoutheastAsian => {
                "Southeast Asian (Filipino, Thai, Vietnamese, Malaysian)"
            }
            Ethnicity::PacificIslander => "Pacific Islander",
            Ethnicity::African => "African/African American",
            Ethnicity::Caucasian => "Caucasian/White",
            Ethnicity::Hispanic => "Hispanic/Latino",
            Ethnicity::MiddleEastern => "Middle Eastern",
            Ethnicity::Indigenous => "Indigenous/Native American",
            Ethnicity::Mixed => "Mixed/Multi-ethnic",
        }
    }

    /// Map a key to an ethnicity. Unrecognized keys fall back to `Mixed`.
    pub fn from_key(key: &str) -> Ethnicity {
        let normalized = key.trim().to_ascii_lowercase().replace('_', "-");
        Ethnicity::ALL
            .into_iter()
            .find(|e| e.key() == normalized)
            .unwrap_or(Ethnicity::Mixed)
    }

    /// The reference profile used for this ethnicity
    pub fn profile(&self) -> &'static EthnicityProfile {
        match self {
            Ethnicity::Asian | Ethnicity::EastAsian => &EAST_ASIAN,
            Ethnicity::SouthAsian => &SOUTH_ASIAN,
            Ethnicity::PacificIslander => &PACIFIC_ISLANDER,
            Ethnicity::African => &AFRICAN,
            Ethnicity::Hispanic => &HISPANIC,
            Ethnicity::SoutheastAsian
            | Ethnicity::Caucasian
            | Ethnicity::MiddleEastern
            | Ethnicity::Indigenous
            | Ethnicity::Mixed => &STANDARD,
        }
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// BMI cut points of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EthnicThresholds {
    pub underweight: f64,
    pub normal: f64,
    pub overweight: f64,
    pub obese: f64,
}

/// Risk narratives for the upper categories
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskNarratives {
    pub overweight: &'static str,
    pub obese: &'static str,
}

/// Static reference data for one ethnicity profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EthnicityProfile {
    pub name: &'static str,
    pub thresholds: EthnicThresholds,
    pub risks: RiskNarratives,
    pub factors: &'static [&'static str],
    pub cultural_considerations: &'static [&'static str],
    pub specific_risks: &'static [&'static str],
}

static EAST_ASIAN: EthnicityProfile = EthnicityProfile {
    name: "East Asian",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 23.0, overweight: 25.0, obese: 30.0 },
    risks: RiskNarratives {
        overweight: "Higher risk of type 2 diabetes and cardiovascular disease at lower BMI",
        obese: "Significantly increased risk of metabolic syndrome and diabetes",
    },
    factors: &[
        "Higher body fat percentage at same BMI compared to Caucasians",
        "Increased risk of diabetes at lower BMI thresholds",
        "Different fat distribution patterns",
        "Lower muscle mass relative to body weight",
    ],
    cultural_considerations: &[
        "Traditional diets may be high in refined carbohydrates",
        "Cultural emphasis on food in social situations",
        "Varying physical activity traditions across cultures",
        "Different body image ideals and weight perceptions",
    ],
    specific_risks: &[
        "Type 2 diabetes risk increases at BMI >23",
        "Cardiovascular disease risk higher at lower BMI",
        "Metabolic syndrome more common",
        "Higher visceral fat accumulation",
    ],
};

static SOUTH_ASIAN: EthnicityProfile = EthnicityProfile {
    name: "South Asian",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 23.0, overweight: 25.0, obese: 30.0 },
    risks: RiskNarratives {
        overweight: "Highest risk of diabetes and heart disease among all ethnic groups at lower BMI",
        obese: "Extremely high risk of metabolic complications",
    },
    factors: &[
        "Highest risk of diabetes at lowest BMI thresholds",
        "Tendency to store fat in abdominal area",
        "Lower muscle mass and higher body fat percentage",
        "Genetic predisposition to insulin resistance",
    ],
    cultural_considerations: &[
        "Traditional diets rich in refined grains and sweets",
        "Cultural celebrations often centered around food",
        "Limited tradition of recreational physical activity",
        "Different concepts of ideal body weight",
    ],
    specific_risks: &[
        "Diabetes risk increases at BMI >21",
        "Heart disease risk significantly elevated",
        "Higher rates of metabolic syndrome",
        "Increased risk of gestational diabetes in women",
    ],
};

static PACIFIC_ISLANDER: EthnicityProfile = EthnicityProfile {
    name: "Pacific Islander",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 26.0, overweight: 32.0, obese: 37.0 },
    risks: RiskNarratives {
        overweight: "Moderate risk with consideration for naturally larger body frame",
        obese: "Increased risk of diabetes and cardiovascular disease",
    },
    factors: &[
        "Naturally larger body frame and higher muscle mass",
        "Different body composition compared to other ethnicities",
        "Higher bone density",
        "Genetic adaptation to island environment",
    ],
    cultural_considerations: &[
        "Traditional foods often high in natural fats",
        "Cultural value placed on larger body size",
        "Traditional physical activities vs. modern sedentary lifestyle",
        "Food as expression of hospitality and community",
    ],
    specific_risks: &[
        "High rates of type 2 diabetes in community",
        "Cardiovascular disease prevalence",
        "Higher rates of obesity-related complications",
        "Genetic predisposition to metabolic disorders",
    ],
};

static AFRICAN: EthnicityProfile = EthnicityProfile {
    name: "African/African American",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 25.0, overweight: 30.0, obese: 35.0 },
    risks: RiskNarratives {
        overweight: "Moderate risk with consideration for higher muscle mass",
        obese: "Increased risk of hypertension and diabetes",
    },
    factors: &[
        "Higher muscle mass and bone density",
        "Different fat distribution patterns",
        "Lower risk of osteoporosis",
        "Genetic variations affecting metabolism",
    ],
    cultural_considerations: &[
        "Historical and cultural relationship with food",
        "Traditional foods and cooking methods",
        "Cultural beauty standards and body image",
        "Socioeconomic factors affecting food access",
    ],
    specific_risks: &[
        "Higher rates of hypertension",
        "Increased risk of type 2 diabetes",
        "Stroke risk elevation",
        "Kidney disease predisposition",
    ],
};

static HISPANIC: EthnicityProfile = EthnicityProfile {
    name: "Hispanic/Latino",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 25.0, overweight: 30.0, obese: 35.0 },
    risks: RiskNarratives {
        overweight: "Increased risk of diabetes and cardiovascular disease",
        obese: "High risk of metabolic complications",
    },
    factors: &[
        "Genetic predisposition to diabetes",
        "Variable body composition across Hispanic subgroups",
        "Cultural and dietary diversity within ethnicity",
        "Mixed ancestry affecting body composition",
    ],
    cultural_considerations: &[
        "Diverse traditional diets across regions",
        "Cultural importance of family meals",
        "Varying physical activity traditions",
        "Language barriers in healthcare settings",
    ],
    specific_risks: &[
        "High rates of type 2 diabetes",
        "Increased cardiovascular disease risk",
        "Higher rates of gestational diabetes",
        "Metabolic syndrome prevalence",
    ],
};

static STANDARD: EthnicityProfile = EthnicityProfile {
    name: "Standard/Mixed Ethnicity",
    thresholds: EthnicThresholds { underweight: 18.5, normal: 25.0, overweight: 30.0, obese: 35.0 },
    risks: RiskNarratives {
        overweight: "Increased risk of health complications",
        obese: "High risk of chronic diseases",
    },
    factors: &[
        "Standard BMI categories apply",
        "Individual variation should be considered",
        "Mixed ancestry may affect body composition",
        "Lifestyle factors are primary considerations",
    ],
    cultural_considerations: &[
        "Diverse cultural influences on diet and lifestyle",
        "Individual assessment needed",
        "Consider family health history",
        "Personalized approach recommended",
    ],
    specific_risks: &[
        "Standard health risks apply",
        "Individual risk factors should be assessed",
        "Family history considerations",
        "Lifestyle-related risk factors",
    ],
};

/// Ethnicity-adjusted category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EthnicCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl EthnicCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EthnicCategory::Underweight => "Underweight",
            EthnicCategory::Normal => "Normal Weight",
            EthnicCategory::Overweight => "Overweight",
            EthnicCategory::Obese => "Obese",
        }
    }

    fn health_risk(&self, profile: &EthnicityProfile) -> &'static str {
        match self {
            EthnicCategory::Underweight => "Increased risk of malnutrition and health complications",
            EthnicCategory::Normal => "Optimal weight range for your ethnic background",
            EthnicCategory::Overweight => profile.risks.overweight,
            EthnicCategory::Obese => profile.risks.obese,
        }
    }

    fn recommendations(&self) -> &'static [&'static str] {
        match self {
            EthnicCategory::Underweight => &[
                "Focus on nutrient-dense foods to gain healthy weight",
                "Include protein-rich foods at every meal",
                "Consider consulting with a healthcare provider",
                "Monitor for underlying health conditions",
            ],
            EthnicCategory::Normal => &[
                "Maintain current healthy lifestyle",
                "Continue balanced diet and regular exercise",
                "Monitor weight changes over time",
                "Focus on overall wellness and fitness",
            ],
            EthnicCategory::Overweight => &[
                "Consider gradual weight loss through diet and exercise",
                "Focus on whole foods and portion control",
                "Increase physical activity levels",
                "Monitor for early signs of metabolic conditions",
                "Consider professional guidance for weight management",
            ],
            EthnicCategory::Obese => &[
                "Seek professional medical guidance for weight management",
                "Focus on sustainable lifestyle changes",
                "Regular monitoring of blood sugar, blood pressure, and cholesterol",
                "Consider structured weight loss programs",
                "Address cultural and dietary factors with a nutritionist",
            ],
        }
    }
}

impl fmt::Display for EthnicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a BMI against the cut points of an ethnicity's profile.
pub fn classify(bmi: f64, ethnicity: Ethnicity) -> EthnicCategory {
    let t = &ethnicity.profile().thresholds;
    if bmi < t.underweight {
        EthnicCategory::Underweight
    } else if bmi < t.normal {
        EthnicCategory::Normal
    } else if bmi < t.overweight {
        EthnicCategory::Overweight
    } else {
        EthnicCategory::Obese
    }
}

/// Ideal weight range from a profile's cut points: `underweight·h²` to
/// `(normal − 0.1)·h²` kilograms.
pub fn ethnic_ideal_weight_range(ethnicity: Ethnicity, height_m: f64) -> WeightRange {
    let t = &ethnicity.profile().thresholds;
    WeightRange::for_bmi_bounds(t.underweight, t.normal - 0.1, height_m)
}

/// Ethnicity-adjusted BMI result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EthnicityResult {
    pub ethnicity: Ethnicity,
    pub profile_name: String,
    /// Standard BMI, 1 decimal
    pub standard_bmi: f64,
    pub category: EthnicCategory,
    pub thresholds: EthnicThresholds,
    pub health_risk: String,
    pub recommendations: Vec<String>,
    /// Ideal weight range (kg) from the profile's cut points
    pub ideal_weight_range: WeightRange,
    pub factors: Vec<String>,
    pub cultural_considerations: Vec<String>,
    pub specific_risks: Vec<String>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Calculate an ethnicity-adjusted BMI result.
///
/// Unrecognized keys use the standard profile; a blank key is an error.
///
/// # Example
///
/// ```rust
/// use health_core::calculations::ethnicity::{calculate_ethnicity_adjusted_bmi, EthnicCategory};
/// use health_core::subject::{Gender, Subject};
/// use health_core::units::Measurement;
///
/// let subject = Subject::new(Measurement::kg(72.0), Measurement::cm(175.0), 40, Gender::Male).unwrap();
/// let result = calculate_ethnicity_adjusted_bmi(&subject, "east-asian").unwrap();
/// assert_eq!(result.standard_bmi, 23.5);
/// assert_eq!(result.category, EthnicCategory::Overweight);
/// ```
pub fn calculate_ethnicity_adjusted_bmi(
    subject: &Subject,
    ethnicity_key: &str,
) -> HealthResult<EthnicityResult> {
    if ethnicity_key.trim().is_empty() {
        return Err(HealthError::missing_field("ethnicity"));
    }

    let ethnicity = Ethnicity::from_key(ethnicity_key);
    if ethnicity == Ethnicity::Mixed && ethnicity_key.trim() != Ethnicity::Mixed.key() {
        tracing::warn!(key = ethnicity_key, "unrecognized ethnicity key, using standard profile");
    }

    let profile = ethnicity.profile();
    let standard_bmi = compute_bmi(subject.weight_kg(), subject.height_cm())?;
    let category = classify(standard_bmi, ethnicity);

    tracing::debug!(
        ethnicity = ethnicity.key(),
        standard_bmi,
        category = category.label(),
        "calculated ethnicity-adjusted BMI"
    );

    Ok(EthnicityResult {
        ethnicity,
        profile_name: profile.name.to_string(),
        standard_bmi,
        category,
        thresholds: profile.thresholds,
        health_risk: category.health_risk(profile).to_string(),
        recommendations: to_strings(category.recommendations()),
        ideal_weight_range: ethnic_ideal_weight_range(ethnicity, subject.height_m()),
        factors: to_strings(profile.factors),
        cultural_considerations: to_strings(profile.cultural_considerations),
        specific_risks: to_strings(profile.specific_risks),
    })
}
