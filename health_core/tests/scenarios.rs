//! Reference scenarios run through the public API.

use health_core::calculations::army::{calculate_army_body_fat, ArmyCategory, ArmyMeasurements};
use health_core::calculations::bmi::{classify, BmiCategory};
use health_core::calculations::body_composition::estimate_body_fat;
use health_core::calculations::ethnicity::{calculate_ethnicity_adjusted_bmi, EthnicCategory};
use health_core::calculations::{calculate_bmi, calculate_body_composition};
use health_core::input::RawSubject;
use health_core::units::{Centimeters, Inches, Kilograms, Measurement, Pounds};
use health_core::workout::{build_weekly_schedule, select_plan};
use health_core::{Gender, Subject};

fn subject(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> Subject {
    Subject::new(Measurement::kg(weight_kg), Measurement::cm(height_cm), age, gender).unwrap()
}

#[test]
fn reference_adult_male() {
    let subject = subject(70.0, 175.0, 30, Gender::Male);
    let bmi = calculate_bmi(&subject).unwrap();
    assert_eq!(bmi.bmi, 22.9);
    assert_eq!(bmi.category, BmiCategory::Normal);

    // 1.20·22.9 + 0.23·30 − 16.2 = 18.18
    let composition = calculate_body_composition(&subject, bmi.bmi);
    assert_eq!(composition.body_fat_percent, 18.2);
}

#[test]
fn category_boundaries() {
    assert_eq!(classify(18.5), BmiCategory::Normal);
    assert_eq!(classify(24.999), BmiCategory::Normal);
    assert_eq!(classify(25.0), BmiCategory::Overweight);
    assert_eq!(classify(40.0), BmiCategory::ObeseIII);
    assert_eq!(classify(18.49), BmiCategory::Underweight);
}

#[test]
fn bmi_is_linear_in_weight() {
    let light = calculate_bmi(&subject(50.0, 180.0, 30, Gender::Male)).unwrap();
    let heavy = calculate_bmi(&subject(100.0, 180.0, 30, Gender::Male)).unwrap();
    assert!((heavy.bmi - 2.0 * light.bmi).abs() < 0.15);
}

#[test]
fn unit_round_trips() {
    for kg in [0.5, 45.0, 70.0, 123.4, 250.0] {
        let back = Kilograms::from(Pounds::from(Kilograms(kg))).0;
        assert!((back - kg).abs() < 0.01, "{} kg came back as {}", kg, back);
    }
    for cm in [50.0, 152.4, 175.0, 210.0] {
        let back = Centimeters::from(Inches::from(Centimeters(cm))).0;
        assert!((back - cm).abs() < 0.01);
    }
}

#[test]
fn body_fat_is_floored_at_zero() {
    assert_eq!(estimate_body_fat(10.0, 10, Gender::Male), 0.0);
}

#[test]
fn army_male_passes() {
    let assessment = calculate_army_body_fat(&ArmyMeasurements {
        gender: Gender::Male,
        age: 25,
        height_in: 70.0,
        neck_in: 16.0,
        waist_in: 34.0,
        hip_in: None,
        weight_kg: None,
    })
    .unwrap();

    // 86.010·log10(18) − 70.041·log10(70) + 36.76
    assert_eq!(assessment.body_fat_percent, 15.5);
    assert_eq!(assessment.max_allowed, 22.0);
    assert_eq!(assessment.category, ArmyCategory::Good);
    assert!(assessment.pass);
}

#[test]
fn army_rejects_waist_not_above_neck() {
    let err = calculate_army_body_fat(&ArmyMeasurements {
        gender: Gender::Male,
        age: 25,
        height_in: 70.0,
        neck_in: 40.0,
        waist_in: 35.0,
        hip_in: None,
        weight_kg: None,
    })
    .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_MEASUREMENT");
    assert!(err.is_validation());
}

#[test]
fn east_asian_cut_points_are_stricter() {
    // 72 kg at 175 cm = 23.5
    let subject = subject(72.0, 175.0, 40, Gender::Male);
    assert_eq!(calculate_bmi(&subject).unwrap().category, BmiCategory::Normal);

    let adjusted = calculate_ethnicity_adjusted_bmi(&subject, "east-asian").unwrap();
    assert_eq!(adjusted.standard_bmi, 23.5);
    assert_eq!(adjusted.category, EthnicCategory::Overweight);
}

#[test]
fn unknown_ethnicity_uses_standard_profile() {
    let subject = subject(72.0, 175.0, 40, Gender::Male);
    let adjusted = calculate_ethnicity_adjusted_bmi(&subject, "martian").unwrap();
    assert_eq!(adjusted.category, EthnicCategory::Normal);
    assert_eq!(adjusted.thresholds.normal, 25.0);
}

#[test]
fn workout_selection_is_deterministic() {
    let first = select_plan(27.3, 52, Gender::Female);
    let second = select_plan(27.3, 52, Gender::Female);
    assert_eq!(first, second);
    assert_eq!(build_weekly_schedule(&first), build_weekly_schedule(&second));
}

#[test]
fn form_input_with_feet_and_inches() {
    let raw = RawSubject {
        weight: "154".into(),
        weight_unit: "lbs".into(),
        height: "5.10".into(),
        height_unit: "ft".into(),
        age: "30".into(),
        gender: "Male".into(),
    };
    let subject = raw.parse().unwrap();
    assert!((subject.height_cm() - 177.8).abs() < 0.01);
    // 69.85 kg / 1.778² = 22.1
    assert_eq!(calculate_bmi(&subject).unwrap().bmi, 22.1);
}

#[test]
fn form_input_failures_are_validation_errors() {
    let raw = RawSubject {
        weight: "".into(),
        weight_unit: "kg".into(),
        height: "175".into(),
        height_unit: "cm".into(),
        age: "30".into(),
        gender: "male".into(),
    };
    let err = raw.parse().unwrap_err();
    assert_eq!(err.error_code(), "MISSING_FIELD");

    let negative = RawSubject {
        weight: "70".into(),
        height: "-175".into(),
        ..raw
    };
    assert!(negative.parse().unwrap_err().is_validation());
}
