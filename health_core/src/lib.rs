//! # health_core - Health Metric Calculation Engine
//!
//! `health_core` computes BMI, body composition, ethnicity-adjusted BMI
//! categories and the Army tape-test body fat, derives recommendations and
//! workout plans from them, and lays the results out as a paginated report.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take validated input and return results
//! - **Validate at the boundary**: Raw strings are parsed once into a [`Subject`]
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use health_core::input::RawSubject;
//!
//! let raw = RawSubject {
//!     weight: "70".into(),
//!     weight_unit: "kg".into(),
//!     height: "175".into(),
//!     height_unit: "cm".into(),
//!     age: "30".into(),
//!     gender: "male".into(),
//! };
//! let subject = raw.parse().unwrap();
//! let bundle = health_core::assess(&subject).unwrap();
//! assert_eq!(bundle.bmi.bmi, 22.9);
//!
//! let json = serde_json::to_string_pretty(&bundle).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`subject`] / [`input`] - Validated subject and string parsing
//! - [`units`] - Type-safe unit wrappers and conversions
//! - [`calculations`] - BMI, body composition, ethnicity, Army tape test
//! - [`recommendations`] / [`workout`] - Advice, workout plans, weekly schedule
//! - [`report`] / [`pdf`] - Report layout and PDF export
//! - [`history`] / [`file_io`] - Saved BMI results and atomic storage
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod history;
pub mod input;
pub mod pdf;
pub mod recommendations;
pub mod report;
pub mod subject;
pub mod units;
pub mod workout;

// Re-export commonly used types at crate root for convenience
pub use calculations::{assess, ResultBundle};
pub use errors::{HealthError, HealthResult};
pub use file_io::{FileStore, KeyValueStore, MemoryStore};
pub use history::{BmiHistory, BmiRecord};
pub use subject::{Gender, Subject};
