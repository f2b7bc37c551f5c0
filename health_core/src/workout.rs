//! # Workout Plans
//!
//! Selects two workout plans from the WHO band of a BMI, adds age-specific
//! tips, and lays the plans out over a week.
//!
//! | BMI band    | Primary plan       | Secondary plan           |
//! |-------------|--------------------|--------------------------|
//! | < 18.5      | Strength Training  | Resistance Training      |
//! | 18.5 – < 25 | Balanced Fitness   | Functional Training      |
//! | 25 – < 30   | Cardio Focus       | Strength & Cardio Combo  |
//! | ≥ 30        | Low-Impact Cardio  | Gentle Strength Training |
//!
//! Selection is a pure function of its inputs: the same `(bmi, age, gender)`
//! always yields the same plans and the same schedule.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::subject::Gender;

/// Plan intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub category: String,
    /// e.g. "4-5 times per week"
    pub frequency: String,
    pub duration: String,
    pub intensity: Intensity,
    pub exercises: Vec<Exercise>,
    pub tips: Vec<String>,
}

impl WorkoutPlan {
    /// Sessions per week: the leading integer of the frequency text.
    pub fn frequency_per_week(&self) -> u32 {
        let digits: String = self
            .frequency
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

type ExerciseRow = (&'static str, &'static str, &'static str, &'static str);

fn plan(
    category: &str,
    frequency: &str,
    duration: &str,
    intensity: Intensity,
    exercises: &[ExerciseRow],
    tips: &[&str],
) -> WorkoutPlan {
    WorkoutPlan {
        category: category.to_string(),
        frequency: frequency.to_string(),
        duration: duration.to_string(),
        intensity,
        exercises: exercises
            .iter()
            .map(|(name, sets, reps, description)| Exercise {
                name: name.to_string(),
                sets: sets.to_string(),
                reps: reps.to_string(),
                description: description.to_string(),
            })
            .collect(),
        tips: tips.iter().map(|t| t.to_string()).collect(),
    }
}

fn underweight_plans() -> Vec<WorkoutPlan> {
    vec![
        plan(
            "Strength Training",
            "4-5 times per week",
            "45-60 minutes",
            Intensity::High,
            &[
                ("Push-ups", "3-4", "8-12", "Build upper body strength"),
                ("Squats", "3-4", "10-15", "Strengthen lower body and core"),
                ("Pull-ups/Assisted Pull-ups", "3", "5-10", "Build back and arm muscles"),
                ("Planks", "3", "30-60 seconds", "Core strengthening"),
                ("Deadlifts (bodyweight/light weights)", "3", "8-12", "Full body strength"),
            ],
            &[
                "Focus on progressive overload - gradually increase difficulty",
                "Eat protein-rich meals before and after workouts",
                "Allow adequate rest between sessions for muscle recovery",
                "Consider compound movements that work multiple muscle groups",
            ],
        ),
        plan(
            "Resistance Training",
            "3-4 times per week",
            "30-45 minutes",
            Intensity::Moderate,
            &[
                ("Resistance Band Exercises", "3", "12-15", "Low-impact muscle building"),
                ("Dumbbell Curls", "3", "10-12", "Arm muscle development"),
                ("Lunges", "3", "10 each leg", "Leg and glute strengthening"),
                ("Shoulder Press", "3", "8-12", "Upper body strength"),
            ],
            &[
                "Start with lighter weights and focus on proper form",
                "Increase weight gradually as you get stronger",
                "Track your progress to stay motivated",
            ],
        ),
    ]
}

fn normal_plans() -> Vec<WorkoutPlan> {
    vec![
        plan(
            "Balanced Fitness",
            "4-5 times per week",
            "45-60 minutes",
            Intensity::Moderate,
            &[
                ("Running/Jogging", "1", "20-30 minutes", "Cardiovascular health"),
                ("Strength Training", "3", "8-12", "Maintain muscle mass"),
                ("Yoga/Stretching", "1", "15-20 minutes", "Flexibility and recovery"),
                ("Swimming", "1", "30-45 minutes", "Full body low-impact exercise"),
                ("Cycling", "1", "30-60 minutes", "Leg strength and cardio"),
            ],
            &[
                "Mix cardio and strength training for balanced fitness",
                "Try different activities to stay engaged",
                "Listen to your body and adjust intensity as needed",
                "Maintain consistency rather than intensity",
            ],
        ),
        plan(
            "Functional Training",
            "3-4 times per week",
            "30-45 minutes",
            Intensity::Moderate,
            &[
                ("Burpees", "3", "8-12", "Full body conditioning"),
                ("Mountain Climbers", "3", "20-30", "Core and cardio"),
                ("Kettlebell Swings", "3", "15-20", "Power development"),
                ("Box Jumps", "3", "8-12", "Explosive leg power"),
            ],
            &[
                "Focus on movement quality over quantity",
                "Incorporate variety to prevent boredom",
                "Challenge yourself progressively",
            ],
        ),
    ]
}

fn overweight_plans() -> Vec<WorkoutPlan> {
    vec![
        plan(
            "Cardio Focus",
            "5-6 times per week",
            "45-60 minutes",
            Intensity::High,
            &[
                ("Brisk Walking", "1", "45-60 minutes", "Low-impact fat burning"),
                ("Cycling", "1", "30-45 minutes", "Joint-friendly cardio"),
                ("Swimming", "1", "30-45 minutes", "Full body low-impact workout"),
                ("Elliptical Training", "1", "30-40 minutes", "Low-impact high-intensity cardio"),
                ("Dancing/Zumba", "1", "45-60 minutes", "Fun cardio workout"),
            ],
            &[
                "Start slowly and gradually increase intensity",
                "Stay hydrated throughout workouts",
                "Choose activities you enjoy for long-term success",
                "Monitor heart rate to stay in fat-burning zone",
            ],
        ),
        plan(
            "Strength & Cardio Combo",
            "3-4 times per week",
            "40-50 minutes",
            Intensity::Moderate,
            &[
                (
                    "Circuit Training",
                    "3-4",
                    "45 seconds work, 15 seconds rest",
                    "Combines strength and cardio",
                ),
                ("Bodyweight Squats", "3", "12-15", "Lower body strength"),
                ("Modified Push-ups", "3", "8-12", "Upper body strength"),
                ("Step-ups", "3", "10 each leg", "Leg strength and cardio"),
            ],
            &[
                "Keep rest periods short to maintain heart rate",
                "Focus on proper form to prevent injury",
                "Combine with healthy eating for best results",
            ],
        ),
    ]
}

fn obese_plans() -> Vec<WorkoutPlan> {
    vec![
        plan(
            "Low-Impact Cardio",
            "5-6 times per week",
            "30-45 minutes",
            Intensity::Moderate,
            &[
                ("Water Walking/Swimming", "1", "30-45 minutes", "Joint-friendly full body workout"),
                ("Seated Exercise", "3", "10-15", "Upper body and core strengthening"),
                ("Gentle Walking", "1", "20-30 minutes", "Start building endurance"),
                ("Chair Yoga", "1", "20-30 minutes", "Flexibility and gentle movement"),
                ("Stationary Bike (recumbent)", "1", "20-30 minutes", "Low-impact leg exercise"),
            ],
            &[
                "Start with short sessions and gradually increase duration",
                "Focus on consistency over intensity",
                "Listen to your body and rest when needed",
                "Consult with healthcare provider before starting",
                "Choose exercises that don't stress joints",
            ],
        ),
        plan(
            "Gentle Strength Training",
            "2-3 times per week",
            "20-30 minutes",
            Intensity::Low,
            &[
                ("Wall Push-ups", "2-3", "5-10", "Gentle upper body strengthening"),
                ("Seated Leg Extensions", "2-3", "8-12", "Quadriceps strengthening"),
                ("Arm Circles", "2-3", "10-15", "Shoulder mobility and strength"),
                ("Seated Marching", "2-3", "20-30", "Core and leg activation"),
            ],
            &[
                "Use light weights or no weights initially",
                "Focus on range of motion and control",
                "Progress very gradually to avoid injury",
                "Consider working with a qualified trainer",
            ],
        ),
    ]
}

/// Select workout plans for a BMI and age.
///
/// Gender is accepted for parity with the other rule sets; the current plans
/// do not vary by it.
///
/// # Example
///
/// ```rust
/// use health_core::subject::Gender;
/// use health_core::workout::select_plan;
///
/// let plans = select_plan(27.0, 45, Gender::Female);
/// assert_eq!(plans[0].category, "Cardio Focus");
/// assert!(plans[0].tips.contains(&"Pay extra attention to recovery time".to_string()));
/// ```
pub fn select_plan(bmi: f64, age: u32, _gender: Gender) -> Vec<WorkoutPlan> {
    let mut plans = if bmi < 18.5 {
        underweight_plans()
    } else if bmi < 25.0 {
        normal_plans()
    } else if bmi < 30.0 {
        overweight_plans()
    } else {
        obese_plans()
    };

    let age_tips: &[&str] = if age > 65 {
        &[
            "Include balance exercises to prevent falls",
            "Warm up thoroughly before exercising",
            "Cool down with gentle stretching",
        ]
    } else if age > 40 {
        &[
            "Pay extra attention to recovery time",
            "Include flexibility exercises in your routine",
        ]
    } else {
        &[]
    };

    for plan in &mut plans {
        plan.tips.extend(age_tips.iter().map(|t| t.to_string()));
    }

    plans
}

/// One session on the weekly calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub category: String,
    pub duration: String,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub activities: Vec<ScheduledActivity>,
}

impl DaySchedule {
    pub fn is_rest_day(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> &[ScheduledActivity] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.activities.as_slice())
            .unwrap_or(&[])
    }
}

/// English day name ("Monday")
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const SLOTS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Wed,
    Weekday::Fri,
    Weekday::Tue,
    Weekday::Thu,
    Weekday::Sat,
];

/// Spread plans over the week.
///
/// Plan `i` starts at slot `3·i mod 6` of `[Mon, Wed, Fri, Tue, Thu, Sat]`
/// and takes `min(frequency, 6)` consecutive slots, wrapping around. Sunday
/// stays free.
///
/// # Example
///
/// ```rust
/// use chrono::Weekday;
/// use health_core::subject::Gender;
/// use health_core::workout::{build_weekly_schedule, select_plan};
///
/// let schedule = build_weekly_schedule(&select_plan(22.0, 30, Gender::Male));
/// assert_eq!(schedule.day(Weekday::Mon)[0].category, "Balanced Fitness");
/// assert_eq!(schedule.day(Weekday::Thu)[0].category, "Functional Training");
/// assert!(schedule.day(Weekday::Sun).is_empty());
/// ```
pub fn build_weekly_schedule(plans: &[WorkoutPlan]) -> WeeklySchedule {
    let mut days: Vec<DaySchedule> = WEEK
        .iter()
        .map(|&day| DaySchedule {
            day,
            activities: Vec::new(),
        })
        .collect();

    for (i, plan) in plans.iter().enumerate() {
        let start = (3 * i) % SLOTS.len();
        let sessions = (plan.frequency_per_week() as usize).min(SLOTS.len());

        for k in 0..sessions {
            let weekday = SLOTS[(start + k) % SLOTS.len()];
            let index = weekday.num_days_from_monday() as usize;
            days[index].activities.push(ScheduledActivity {
                category: plan.category.clone(),
                duration: plan.duration.clone(),
                intensity: plan.intensity,
            });
        }
    }

    WeeklySchedule { days }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressWeek {
    pub week: u32,
    pub target: String,
    pub focus: String,
}

/// The fixed four-week progression.
pub fn progress_plan() -> Vec<ProgressWeek> {
    [
        ("Build routine consistency", "Form and technique"),
        ("Increase duration by 10%", "Endurance building"),
        ("Add intensity variations", "Progressive overload"),
        ("Full routine mastery", "Assessment and adjustment"),
    ]
    .iter()
    .zip(1..)
    .map(|((target, focus), week)| ProgressWeek {
        week,
        target: target.to_string(),
        focus: focus.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(plans: &[WorkoutPlan]) -> Vec<&str> {
        plans.iter().map(|p| p.category.as_str()).collect()
    }

    #[test]
    fn test_plan_selection_by_band() {
        assert_eq!(
            categories(&select_plan(17.0, 30, Gender::Male)),
            vec!["Strength Training", "Resistance Training"]
        );
        assert_eq!(
            categories(&select_plan(18.5, 30, Gender::Male)),
            vec!["Balanced Fitness", "Functional Training"]
        );
        assert_eq!(
            categories(&select_plan(25.0, 30, Gender::Male)),
            vec!["Cardio Focus", "Strength & Cardio Combo"]
        );
        assert_eq!(
            categories(&select_plan(30.0, 30, Gender::Female)),
            vec!["Low-Impact Cardio", "Gentle Strength Training"]
        );
    }

    #[test]
    fn test_intensity_mapping() {
        let plans = select_plan(17.0, 30, Gender::Male);
        assert_eq!(plans[0].intensity, Intensity::High);
        assert_eq!(plans[1].intensity, Intensity::Moderate);
        let plans = select_plan(35.0, 30, Gender::Male);
        assert_eq!(plans[0].intensity, Intensity::Moderate);
        assert_eq!(plans[1].intensity, Intensity::Low);
    }

    #[test]
    fn test_age_tips() {
        let young = select_plan(22.0, 40, Gender::Male);
        assert_eq!(young[0].tips.len(), 4);

        let middle = select_plan(22.0, 41, Gender::Male);
        assert_eq!(middle[0].tips.len(), 6);
        assert_eq!(middle[1].tips.last().unwrap(), "Include flexibility exercises in your routine");

        let senior = select_plan(22.0, 66, Gender::Male);
        assert_eq!(senior[0].tips.len(), 7);
        assert_eq!(senior[0].tips[4], "Include balance exercises to prevent falls");
    }

    #[test]
    fn test_frequency_per_week() {
        let plans = select_plan(35.0, 30, Gender::Male);
        assert_eq!(plans[0].frequency_per_week(), 5);
        assert_eq!(plans[1].frequency_per_week(), 2);
    }

    #[test]
    fn test_schedule_normal_band() {
        // Balanced Fitness ×4 from Mon, Functional Training ×3 from Tue
        let schedule = build_weekly_schedule(&select_plan(22.0, 30, Gender::Male));
        let at = |d| {
            schedule
                .day(d)
                .iter()
                .map(|a| a.category.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(at(Weekday::Mon), vec!["Balanced Fitness"]);
        assert_eq!(at(Weekday::Tue), vec!["Balanced Fitness", "Functional Training"]);
        assert_eq!(at(Weekday::Wed), vec!["Balanced Fitness"]);
        assert_eq!(at(Weekday::Thu), vec!["Functional Training"]);
        assert_eq!(at(Weekday::Fri), vec!["Balanced Fitness"]);
        assert_eq!(at(Weekday::Sat), vec!["Functional Training"]);
        assert!(at(Weekday::Sun).is_empty());
    }

    #[test]
    fn test_schedule_wraps_round_robin() {
        // Cardio Focus ×5: Mon Wed Fri Tue Thu; Combo ×3: Tue Thu Sat
        let schedule = build_weekly_schedule(&select_plan(27.0, 30, Gender::Male));
        assert_eq!(schedule.days.len(), 7);
        assert_eq!(schedule.day(Weekday::Tue).len(), 2);
        assert_eq!(schedule.day(Weekday::Sat).len(), 1);
        assert!(schedule.days[6].is_rest_day());

        let total: usize = schedule.days.iter().map(|d| d.activities.len()).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let a = build_weekly_schedule(&select_plan(31.2, 52, Gender::Female));
        let b = build_weekly_schedule(&select_plan(31.2, 52, Gender::Female));
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_plan() {
        let weeks = progress_plan();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].week, 1);
        assert_eq!(weeks[1].target, "Increase duration by 10%");
        assert_eq!(weeks[3].focus, "Assessment and adjustment");
    }
}
