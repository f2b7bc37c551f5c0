//! # BMI Calculator Pro CLI
//!
//! Terminal front end for `health_core`: BMI, body composition,
//! ethnicity-adjusted categories, the Army tape test, workout plans, PDF
//! reports and the saved BMI history.
//!
//! Every command prints a human-readable summary, or the result as JSON with
//! `--json`.

mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use health_core::calculations::army::{calculate_army_body_fat, ArmyMeasurements};
use health_core::calculations::body_composition::WeightDirection;
use health_core::calculations::ethnicity::calculate_ethnicity_adjusted_bmi;
use health_core::calculations::{
    assess, calculate_bmi, calculate_body_composition, BmiCategory, BmiResult, BodyComposition,
};
use health_core::file_io::{write_atomic, FileStore};
use health_core::history::{self, BmiHistory, BmiRecord, Period, SortKey, TrendDirection};
use health_core::input::{parse_gender, RawSubject};
use health_core::pdf::render_document_pdf;
use health_core::report::{format_report_with, ReportOptions};
use health_core::units::{format_height, format_weight, round_to, HeightUnit};
use health_core::workout::{
    build_weekly_schedule, day_name, progress_plan, select_plan, ProgressWeek, WeeklySchedule,
    WorkoutPlan,
};
use health_core::{HealthError, Subject};

use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "health", version, about = "BMI, body composition and fitness planning")]
struct Cli {
    /// Settings file (defaults to ./health.toml if present)
    #[arg(long, global = true, env = "HEALTH_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// BMI, category and body composition
    Bmi {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Do not append the result to the history
        #[arg(long)]
        no_record: bool,
    },
    /// BMI category using ethnicity-specific cut points
    Ethnicity {
        #[command(flatten)]
        subject: SubjectArgs,

        /// e.g. east-asian, south-asian, african, hispanic, caucasian
        #[arg(long)]
        ethnicity: String,
    },
    /// Army (AR 600-9) tape-test body fat
    Army(ArmyArgs),
    /// Workout plans, weekly schedule and 4-week progression
    Workout {
        #[command(flatten)]
        subject: SubjectArgs,
    },
    /// Write the full PDF report
    Report {
        #[command(flatten)]
        subject: SubjectArgs,

        /// Output file (defaults to <report.output_dir>/bmi-report-<date>.pdf)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Saved BMI results
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Args)]
struct SubjectArgs {
    /// Weight value
    #[arg(long, short)]
    weight: String,

    /// kg or lbs
    #[arg(long)]
    weight_unit: Option<String>,

    /// Height value; with feet-inches, "5.10" means 5 ft 10 in
    #[arg(long = "height", short = 'H')]
    height: String,

    /// cm, in or ft
    #[arg(long)]
    height_unit: Option<String>,

    #[arg(long, short)]
    age: String,

    /// male or female
    #[arg(long, short)]
    gender: String,
}

impl SubjectArgs {
    fn parse(&self, settings: &Settings) -> Result<Subject, HealthError> {
        let weight_unit = self
            .weight_unit
            .clone()
            .unwrap_or_else(|| settings.defaults.weight_unit.suffix().to_string());
        let height_unit = self
            .height_unit
            .clone()
            .unwrap_or_else(|| match settings.defaults.height_unit {
                HeightUnit::FeetInches => "ft".to_string(),
                unit => unit.suffix().to_string(),
            });

        RawSubject {
            weight: self.weight.clone(),
            weight_unit,
            height: self.height.clone(),
            height_unit,
            age: self.age.clone(),
            gender: self.gender.clone(),
        }
        .parse()
    }
}

#[derive(Debug, Args)]
struct ArmyArgs {
    #[arg(long, short)]
    gender: String,

    #[arg(long, short)]
    age: u32,

    /// Height in inches
    #[arg(long)]
    height_in: f64,

    /// Neck circumference in inches
    #[arg(long)]
    neck_in: f64,

    /// Waist circumference in inches
    #[arg(long)]
    waist_in: f64,

    /// Hip circumference in inches (required for women)
    #[arg(long)]
    hip_in: Option<f64>,

    /// Body weight in kg, for the fat/lean mass split
    #[arg(long)]
    weight_kg: Option<f64>,
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List saved results
    List {
        #[arg(long, value_enum, default_value_t = PeriodArg::All)]
        period: PeriodArg,

        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
    },
    /// Change between the two most recent results
    Trend,
    /// Delete one saved result
    Remove { id: String },
    /// Delete all saved results
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PeriodArg {
    Week,
    Month,
    ThreeMonths,
    All,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::ThreeMonths => Period::ThreeMonths,
            PeriodArg::All => Period::All,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Bmi,
    Weight,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Bmi => SortKey::Bmi,
            SortArg::Weight => SortKey::Weight,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(health_error) = e.downcast_ref::<HealthError>() {
                if let Ok(json) = serde_json::to_string_pretty(health_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    match &cli.command {
        Command::Bmi { subject, no_record } => {
            run_bmi(&subject.parse(settings)?, settings, !no_record, cli.json)
        }
        Command::Ethnicity { subject, ethnicity } => {
            run_ethnicity(&subject.parse(settings)?, ethnicity, cli.json)
        }
        Command::Army(args) => run_army(args, cli.json),
        Command::Workout { subject } => run_workout(&subject.parse(settings)?, cli.json),
        Command::Report { subject, output } => {
            run_report(&subject.parse(settings)?, output.as_deref(), settings)
        }
        Command::History { action } => run_history(action, settings, cli.json),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn run_bmi(subject: &Subject, settings: &Settings, record: bool, json: bool) -> Result<()> {
    let bmi = calculate_bmi(subject)?;
    let composition = calculate_body_composition(subject, bmi.bmi);

    if record && settings.storage.record_history {
        append_history(settings, BmiRecord::new(subject, &bmi));
    }

    if json {
        #[derive(Serialize)]
        struct BmiOutput<'a> {
            bmi: &'a BmiResult,
            body_composition: &'a BodyComposition,
        }
        return print_json(&BmiOutput {
            bmi: &bmi,
            body_composition: &composition,
        });
    }

    let unit = subject.weight_unit();
    banner("BMI RESULTS");
    println!();
    println!("Input:");
    println!("  Weight: {}", format_weight(subject.weight_kg(), unit));
    println!("  Height: {}", format_height(subject.height_cm(), subject.height_unit()));
    println!("  Age:    {}", subject.age());
    println!("  Gender: {}", subject.gender());
    println!();
    println!(
        "  BMI = {:.1}  ({})  {}",
        bmi.bmi,
        bmi.category.label(),
        status_icon(bmi.category == BmiCategory::Normal)
    );
    println!("  {}", bmi.health_risk);
    println!();
    println!("Body Composition:");
    println!("  Body fat:      {:.1}%", composition.body_fat_percent);
    println!("  Ideal weight:  {}", format_weight(composition.ideal_weight_kg, unit));
    println!(
        "  Healthy range: {} - {}",
        format_weight(composition.ideal_weight_range.min, unit),
        format_weight(composition.ideal_weight_range.max, unit)
    );
    println!("  BMI Prime:     {:.2}", composition.bmi_prime);
    println!("  Ponderal:      {:.1} kg/m³", composition.ponderal_index);
    println!();
    println!("Advice:");
    for line in &bmi.advice {
        println!("  - {}", line);
    }
    Ok(())
}

/// Append a record; storage problems are logged, never fatal to the calculation.
fn append_history(settings: &Settings, record: BmiRecord) {
    let mut store = FileStore::new(&settings.storage.data_dir);
    match history::record_result(&mut store, record) {
        Ok(saved) => tracing::debug!(records = saved.len(), "recorded BMI result"),
        Err(e) => tracing::warn!(error = %e, "BMI result not recorded"),
    }
}

fn run_ethnicity(subject: &Subject, ethnicity: &str, json: bool) -> Result<()> {
    let result = calculate_ethnicity_adjusted_bmi(subject, ethnicity)?;
    if json {
        return print_json(&result);
    }

    let unit = subject.weight_unit();
    banner("ETHNICITY-ADJUSTED BMI");
    println!();
    println!("  Profile:  {}", result.profile_name);
    println!("  BMI:      {:.1}", result.standard_bmi);
    println!("  Category: {}", result.category.label());
    println!(
        "  Cut points: underweight <{}, normal <{}, overweight <{}, obese ≥{}",
        result.thresholds.underweight,
        result.thresholds.normal,
        result.thresholds.overweight,
        result.thresholds.obese
    );
    println!(
        "  Ideal weight: {} - {}",
        format_weight(result.ideal_weight_range.min, unit),
        format_weight(result.ideal_weight_range.max, unit)
    );
    println!();
    println!("Health risk:");
    println!("  {}", result.health_risk);
    println!();
    println!("Recommendations:");
    for line in &result.recommendations {
        println!("  - {}", line);
    }
    println!();
    println!("Specific risks:");
    for line in &result.specific_risks {
        println!("  - {}", line);
    }
    Ok(())
}

fn run_army(args: &ArmyArgs, json: bool) -> Result<()> {
    let measurements = ArmyMeasurements {
        gender: parse_gender(&args.gender)?,
        age: args.age,
        height_in: args.height_in,
        neck_in: args.neck_in,
        waist_in: args.waist_in,
        hip_in: args.hip_in,
        weight_kg: args.weight_kg,
    };
    let assessment = calculate_army_body_fat(&measurements)?;
    if json {
        return print_json(&assessment);
    }

    banner("ARMY BODY FAT ASSESSMENT");
    println!();
    println!(
        "  Body fat:    {:.1}% (max {:.0}%)",
        assessment.body_fat_percent, assessment.max_allowed
    );
    println!("  Category:    {}", assessment.category.label());
    if let (Some(fat), Some(lean)) = (assessment.fat_mass_kg, assessment.lean_mass_kg) {
        println!("  Fat mass:    {:.1} kg", fat);
        println!("  Lean mass:   {:.1} kg", lean);
    }
    println!();
    for line in &assessment.recommendations {
        println!("  - {}", line);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} {}",
        assessment.status,
        status_icon(assessment.pass)
    );
    println!("═══════════════════════════════════════");
    Ok(())
}

fn run_workout(subject: &Subject, json: bool) -> Result<()> {
    let bmi = calculate_bmi(subject)?;
    let plans = select_plan(bmi.bmi, subject.age(), subject.gender());
    let schedule = build_weekly_schedule(&plans);
    let progress = progress_plan();

    if json {
        #[derive(Serialize)]
        struct WorkoutOutput<'a> {
            plans: &'a [WorkoutPlan],
            schedule: &'a WeeklySchedule,
            progress: &'a [ProgressWeek],
        }
        return print_json(&WorkoutOutput {
            plans: &plans,
            schedule: &schedule,
            progress: &progress,
        });
    }

    banner(&format!("WORKOUT PLAN (BMI {:.1})", bmi.bmi));
    for plan in &plans {
        println!();
        println!("{} - {}, {}, {} intensity", plan.category, plan.frequency, plan.duration, plan.intensity);
        for exercise in &plan.exercises {
            println!("  • {} ({} × {})", exercise.name, exercise.sets, exercise.reps);
        }
        for tip in &plan.tips {
            println!("  Tip: {}", tip);
        }
    }

    println!();
    println!("Weekly Schedule:");
    for day in &schedule.days {
        let activities: Vec<String> = day
            .activities
            .iter()
            .map(|a| format!("{} ({})", a.category, a.duration))
            .collect();
        let text = if day.is_rest_day() {
            "Rest".to_string()
        } else {
            activities.join(", ")
        };
        println!("  {:<10} {}", day_name(day.day), text);
    }

    println!();
    println!("4-Week Progression:");
    for week in &progress {
        println!("  Week {}: {} ({})", week.week, week.target, week.focus);
    }
    Ok(())
}

fn run_report(subject: &Subject, output: Option<&std::path::Path>, settings: &Settings) -> Result<()> {
    let bundle = assess(subject)?;

    let mut options = ReportOptions::default();
    if let Some(title) = &settings.report.title {
        options.title = title.clone();
    }
    let document = format_report_with(&bundle, &options);
    let pdf = render_document_pdf(&document)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(&settings.report.output_dir).with_context(|| {
                format!("Cannot create {}", settings.report.output_dir.display())
            })?;
            settings
                .report
                .output_dir
                .join(format!("bmi-report-{}.pdf", bundle.generated_on))
        }
    };
    write_atomic(&path, &pdf)?;
    tracing::info!(path = %path.display(), pages = document.pages.len(), "exported report");

    println!(
        "Report written to {} ({} pages) {}",
        path.display(),
        document.pages.len(),
        status_icon(true)
    );
    let status = &bundle.weight_status;
    let relation = match status.direction {
        WeightDirection::Above => "above",
        WeightDirection::Below => "below",
        WeightDirection::At => "at",
    };
    println!(
        "  BMI {:.1} ({}), {:.1} {} {} ideal weight",
        bundle.bmi.bmi,
        bundle.bmi.category.label(),
        status.difference,
        subject.weight_unit().suffix(),
        relation
    );
    Ok(())
}

fn run_history(action: &HistoryAction, settings: &Settings, json: bool) -> Result<()> {
    let mut store = FileStore::new(&settings.storage.data_dir);
    let load = |store: &FileStore| {
        history::load_history(store)
            .with_context(|| format!("Cannot read history in {}", store.dir().display()))
    };

    match action {
        HistoryAction::List { period, sort } => {
            let saved = load(&store)?;
            let records = saved.filtered((*period).into(), (*sort).into());
            if json {
                return print_json(&records);
            }
            print_records(&records);
        }
        HistoryAction::Trend => {
            let trend = load(&store)?.trend();
            if json {
                return print_json(&trend);
            }
            match trend {
                Some(trend) => {
                    let arrow = match trend.direction {
                        TrendDirection::Up => "up",
                        TrendDirection::Down => "down",
                        TrendDirection::Stable => "stable",
                    };
                    println!("BMI trend: {} ({:.1})", arrow, trend.change);
                }
                None => println!("Not enough history for a trend (need 2 results)"),
            }
        }
        HistoryAction::Remove { id } => {
            let mut saved = load(&store)?;
            let Some(record) = saved.records.iter().find(|r| r.id.to_string() == *id) else {
                bail!("No history record with id {}", id);
            };
            let record_id = record.id;
            saved.remove(record_id);
            history::save_history(&mut store, &saved)?;
            println!("Removed {} {}", record_id, status_icon(true));
        }
        // Never reads the stored file, so an unreadable history can still be cleared
        HistoryAction::Clear => {
            history::clear_history(&mut store)?;
            if json {
                return print_json(&BmiHistory::new());
            }
            println!("History cleared {}", status_icon(true));
        }
    }
    Ok(())
}

fn print_records(records: &[&BmiRecord]) {
    if records.is_empty() {
        println!("No saved results");
        return;
    }
    banner("BMI HISTORY");
    for record in records {
        println!(
            "  {}  BMI {:>4.1}  {:<18} {:>6.1} kg  {}",
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.bmi,
            record.category.label(),
            round_to(record.weight_kg, 1),
            record.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_core::file_io::KeyValueStore;

    fn subject_args(weight: &str, height: &str) -> SubjectArgs {
        SubjectArgs {
            weight: weight.to_string(),
            weight_unit: None,
            height: height.to_string(),
            height_unit: None,
            age: "30".to_string(),
            gender: "male".to_string(),
        }
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "health", "bmi", "-w", "70", "-H", "175", "-a", "30", "-g", "male", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Bmi { no_record: false, .. }));

        let cli = Cli::try_parse_from([
            "health", "history", "list", "--period", "three-months", "--sort", "bmi",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::List { period: PeriodArg::ThreeMonths, sort: SortArg::Bmi }
            }
        ));
    }

    #[test]
    fn test_subject_uses_default_units() {
        let mut settings = Settings::default();
        let subject = subject_args("70", "175").parse(&settings).unwrap();
        assert_eq!(subject.weight_kg(), 70.0);

        settings.defaults.weight_unit = health_core::units::WeightUnit::Lbs;
        settings.defaults.height_unit = HeightUnit::FeetInches;
        let subject = subject_args("154", "5.10").parse(&settings).unwrap();
        assert!((subject.height_cm() - 177.8).abs() < 0.01);
        assert!((subject.weight_kg() - 69.853).abs() < 0.01);
    }

    #[test]
    fn test_subject_validation_errors_surface() {
        let settings = Settings::default();
        let err = subject_args("abc", "175").parse(&settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_clear_recovers_unreadable_history() {
        let dir = std::env::temp_dir().join(format!("health_cli_clear_{}", std::process::id()));
        let mut settings = Settings::default();
        settings.storage.data_dir = dir.clone();
        let mut store = FileStore::new(&dir);

        for stored in ["{ not json", r#"{"version": "9.0.0", "records": []}"#] {
            store.set(history::HISTORY_KEY, stored).unwrap();
            let list = HistoryAction::List { period: PeriodArg::All, sort: SortArg::Date };
            assert!(run_history(&list, &settings, true).is_err());

            run_history(&HistoryAction::Clear, &settings, true).unwrap();
            assert_eq!(store.get(history::HISTORY_KEY).unwrap(), None);
            assert!(run_history(&list, &settings, true).is_ok());
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unit_flags_override_defaults() {
        let settings = Settings::default();
        let mut args = subject_args("154", "69");
        args.weight_unit = Some("lbs".to_string());
        args.height_unit = Some("in".to_string());
        let subject = args.parse(&settings).unwrap();
        assert!((subject.height_cm() - 175.26).abs() < 0.01);
        assert!((subject.weight_kg() - 69.853).abs() < 0.01);
    }
}
