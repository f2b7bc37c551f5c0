//! # Unit Types
//!
//! Type-safe wrappers for body measurements plus the conversions that bring
//! every user-entered value into canonical SI form (kilograms, centimeters).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Body metrics only need a handful of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Feet+inches convention
//!
//! The feet+inches height unit accepts a single field written as
//! `feet.inches`. The fractional part is read as *whole inches*, so `"6.10"`
//! is 6 ft 10 in and `"5.1"` is 5 ft 1 in. A value with no fractional part is
//! whole feet. See [`parse_feet_inches`].
//!
//! ## Example
//!
//! ```rust
//! use health_core::units::{Kilograms, Pounds, Inches, Centimeters};
//!
//! let weight: Kilograms = Pounds(154.0).into();
//! assert!((weight.0 - 69.853).abs() < 0.001);
//!
//! let height: Centimeters = Inches(70.0).into();
//! assert!((height.0 - 177.8).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::errors::{HealthError, HealthResult};

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Pounds per kilogram (used when reporting weights back in imperial)
pub const LB_PER_KG: f64 = 2.20462;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Weight Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_INCH)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_INCH)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Kilograms);
impl_arithmetic!(Pounds);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Inches);
impl_arithmetic!(Meters);

// ============================================================================
// Unit Selectors
// ============================================================================

/// Unit a weight is entered in or reported back in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Short unit suffix for display
    pub fn suffix(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Convert a canonical kilogram value into this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => Pounds::from(Kilograms(kg)).0,
        }
    }
}

/// Unit a height is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
    FeetInches,
}

impl HeightUnit {
    /// Short unit suffix for display
    pub fn suffix(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "in",
            HeightUnit::FeetInches => "ft/in",
        }
    }
}

/// Which physical quantity a measurement is expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Weight,
    Height,
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementKind::Weight => write!(f, "weight"),
            MeasurementKind::Height => write!(f, "height"),
        }
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// A raw body measurement as entered, tagged with its unit.
///
/// ## JSON Example
///
/// ```json
/// { "unit": "lbs", "value": 154.0 }
/// { "unit": "feet-inches", "feet": 5.0, "inches": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "kebab-case")]
pub enum Measurement {
    Kg { value: f64 },
    Lbs { value: f64 },
    Cm { value: f64 },
    Inches { value: f64 },
    FeetInches { feet: f64, inches: f64 },
}

impl Measurement {
    /// Weight in kilograms
    pub fn kg(value: f64) -> Self {
        Measurement::Kg { value }
    }

    /// Weight in pounds
    pub fn lbs(value: f64) -> Self {
        Measurement::Lbs { value }
    }

    /// Height in centimeters
    pub fn cm(value: f64) -> Self {
        Measurement::Cm { value }
    }

    /// Height in inches
    pub fn inches(value: f64) -> Self {
        Measurement::Inches { value }
    }

    /// Height in feet plus inches
    pub fn feet_inches(feet: f64, inches: f64) -> Self {
        Measurement::FeetInches { feet, inches }
    }

    /// The quantity this unit measures
    pub fn kind(&self) -> MeasurementKind {
        match self {
            Measurement::Kg { .. } | Measurement::Lbs { .. } => MeasurementKind::Weight,
            Measurement::Cm { .. } | Measurement::Inches { .. } | Measurement::FeetInches { .. } => {
                MeasurementKind::Height
            }
        }
    }

    /// Weight unit of this measurement, if it is a weight
    pub fn weight_unit(&self) -> Option<WeightUnit> {
        match self {
            Measurement::Kg { .. } => Some(WeightUnit::Kg),
            Measurement::Lbs { .. } => Some(WeightUnit::Lbs),
            _ => None,
        }
    }

    /// Height unit of this measurement, if it is a height
    pub fn height_unit(&self) -> Option<HeightUnit> {
        match self {
            Measurement::Cm { .. } => Some(HeightUnit::Cm),
            Measurement::Inches { .. } => Some(HeightUnit::Inches),
            Measurement::FeetInches { .. } => Some(HeightUnit::FeetInches),
            _ => None,
        }
    }

    /// Human-readable rendering in the unit it was entered in
    pub fn display(&self) -> String {
        match self {
            Measurement::Kg { value } => format!("{} kg", trim_number(*value)),
            Measurement::Lbs { value } => format!("{} lbs", trim_number(*value)),
            Measurement::Cm { value } => format!("{} cm", trim_number(*value)),
            Measurement::Inches { value } => format!("{} in", trim_number(*value)),
            Measurement::FeetInches { feet, inches } => {
                format!("{}'{}\"", trim_number(*feet), trim_number(*inches))
            }
        }
    }
}

/// Convert a measurement to its canonical SI number.
///
/// Weights come back in kilograms, heights in centimeters.
///
/// # Errors
///
/// * `InvalidInput` - the unit does not measure `kind` (e.g. kg for a height)
/// * `InvalidMeasurement` - the value is zero, negative, or not finite
///
/// # Example
///
/// ```rust
/// use health_core::units::{to_canonical, Measurement, MeasurementKind};
///
/// let cm = to_canonical(&Measurement::feet_inches(6.0, 10.0), MeasurementKind::Height).unwrap();
/// assert!((cm - 208.28).abs() < 1e-9);
/// ```
pub fn to_canonical(measurement: &Measurement, kind: MeasurementKind) -> HealthResult<f64> {
    if measurement.kind() != kind {
        return Err(HealthError::invalid_input(
            kind.to_string(),
            measurement.display(),
            format!("Unit is not a {} unit", kind),
        ));
    }

    let field = kind.to_string();
    let canonical = match *measurement {
        Measurement::Kg { value } => {
            require_positive(&field, value)?;
            value
        }
        Measurement::Lbs { value } => {
            require_positive(&field, value)?;
            Kilograms::from(Pounds(value)).0
        }
        Measurement::Cm { value } => {
            require_positive(&field, value)?;
            value
        }
        Measurement::Inches { value } => {
            require_positive(&field, value)?;
            Centimeters::from(Inches(value)).0
        }
        Measurement::FeetInches { feet, inches } => {
            if !feet.is_finite() || feet < 0.0 {
                return Err(HealthError::invalid_measurement(
                    "height.feet",
                    feet.to_string(),
                    "Feet must be zero or positive",
                ));
            }
            if !inches.is_finite() || inches < 0.0 {
                return Err(HealthError::invalid_measurement(
                    "height.inches",
                    inches.to_string(),
                    "Inches must be zero or positive",
                ));
            }
            let total = feet * INCHES_PER_FOOT + inches;
            require_positive(&field, total)?;
            Centimeters::from(Inches(total)).0
        }
    };

    Ok(canonical)
}

fn require_positive(field: &str, value: f64) -> HealthResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HealthError::invalid_measurement(
            field,
            value.to_string(),
            "Value must be a positive number",
        ));
    }
    Ok(())
}

/// Parse the single-field `feet.inches` notation.
///
/// The text is split on the decimal point and the fractional digits are read
/// as whole inches: `"6.10"` → 6 ft 10 in, `"5.1"` → 5 ft 1 in, `"6"` → 6 ft.
///
/// # Example
///
/// ```rust
/// use health_core::units::{parse_feet_inches, Measurement};
///
/// assert_eq!(parse_feet_inches("6.10").unwrap(), Measurement::feet_inches(6.0, 10.0));
/// ```
pub fn parse_feet_inches(text: &str) -> HealthResult<Measurement> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HealthError::missing_field("height"));
    }

    let mut parts = trimmed.split('.');
    let feet_text = parts.next().unwrap_or("");
    let inches_text = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(HealthError::invalid_input(
            "height",
            trimmed,
            "Expected feet.inches, e.g. 5.10 for 5 ft 10 in",
        ));
    }

    let feet = parse_whole_part("height.feet", feet_text, trimmed)?;
    let inches = parse_whole_part("height.inches", inches_text, trimmed)?;

    Ok(Measurement::feet_inches(feet, inches))
}

fn parse_whole_part(field: &str, part: &str, original: &str) -> HealthResult<f64> {
    if part.is_empty() {
        return Ok(0.0);
    }
    if !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(HealthError::invalid_input(
            field,
            original,
            "Expected digits only in feet.inches notation",
        ));
    }
    part.parse::<u32>()
        .map(f64::from)
        .map_err(|e| HealthError::invalid_input(field, original, e.to_string()))
}

// ============================================================================
// Rounding and Formatting
// ============================================================================

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Format a canonical weight in the requested unit, e.g. `"154.3 lbs"`.
pub fn format_weight(kg: f64, unit: WeightUnit) -> String {
    format!("{:.1} {}", unit.from_kg(kg), unit.suffix())
}

/// Format a canonical height in the requested unit, e.g. `5'10"`.
pub fn format_height(cm: f64, unit: HeightUnit) -> String {
    match unit {
        HeightUnit::Cm => format!("{:.1} cm", cm),
        HeightUnit::Inches => format!("{:.1} in", Inches::from(Centimeters(cm)).0),
        HeightUnit::FeetInches => {
            let total_inches = Inches::from(Centimeters(cm)).0.round() as i64;
            let feet = total_inches / 12;
            let inches = total_inches % 12;
            format!("{}'{}\"", feet, inches)
        }
    }
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
