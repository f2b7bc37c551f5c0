//! # BMI History
//!
//! A newest-first log of past BMI results, persisted as one JSON document
//! under the key [`HISTORY_KEY`] of a [`KeyValueStore`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "records": [
//!     {
//!       "id": "550e8400-e29b-41d4-a716-446655440000",
//!       "recorded_at": "2024-03-01T09:30:00Z",
//!       "bmi": 22.9,
//!       "category": "Normal",
//!       "weight_kg": 70.0,
//!       "height_cm": 175.0,
//!       "age": 30,
//!       "gender": "male"
//!     }
//!   ]
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::bmi::{BmiCategory, BmiResult};
use crate::errors::{HealthError, HealthResult};
use crate::file_io::KeyValueStore;
use crate::subject::{Gender, Subject};
use crate::units::round_to;

/// Store key the history lives under
pub const HISTORY_KEY: &str = "bmi-history";

/// Current history schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One saved BMI result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub bmi: f64,
    pub category: BmiCategory,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
}

impl BmiRecord {
    /// Record a result, stamped now.
    pub fn new(subject: &Subject, result: &BmiResult) -> Self {
        Self::recorded_at(subject, result, Utc::now())
    }

    pub fn recorded_at(subject: &Subject, result: &BmiResult, at: DateTime<Utc>) -> Self {
        BmiRecord {
            id: Uuid::new_v4(),
            recorded_at: at,
            bmi: result.bmi,
            category: result.category,
            weight_kg: round_to(subject.weight_kg(), 1),
            height_cm: round_to(subject.height_cm(), 1),
            age: subject.age(),
            gender: subject.gender(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// BMI change between the two newest records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute change, 1 decimal
    pub change: f64,
}

/// Time window for listing records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Week,
    Month,
    ThreeMonths,
    #[default]
    All,
}

impl Period {
    pub fn days(&self) -> Option<i64> {
        match self {
            Period::Week => Some(7),
            Period::Month => Some(30),
            Period::ThreeMonths => Some(90),
            Period::All => None,
        }
    }
}

/// Sort key for listing records; every key sorts descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Bmi,
    Weight,
}

/// Saved BMI results, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiHistory {
    pub version: String,
    pub records: Vec<BmiRecord>,
}

impl Default for BmiHistory {
    fn default() -> Self {
        BmiHistory {
            version: SCHEMA_VERSION.to_string(),
            records: Vec::new(),
        }
    }
}

impl BmiHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend a record.
    pub fn add(&mut self, record: BmiRecord) {
        self.records.insert(0, record);
    }

    /// Remove a record by id, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<BmiRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn latest(&self) -> Option<&BmiRecord> {
        self.records.first()
    }

    /// Direction and size of the change from the second-newest to the newest
    /// record; `None` with fewer than two records.
    pub fn trend(&self) -> Option<Trend> {
        let latest = self.records.first()?;
        let previous = self.records.get(1)?;
        let change = round_to(latest.bmi - previous.bmi, 1);
        let direction = if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        Some(Trend {
            direction,
            change: change.abs(),
        })
    }

    /// Records inside `period` (relative to `now`), sorted descending by `sort`.
    pub fn filtered_at(&self, period: Period, sort: SortKey, now: DateTime<Utc>) -> Vec<&BmiRecord> {
        let cutoff = period.days().map(|d| now - Duration::days(d));
        let mut records: Vec<&BmiRecord> = self
            .records
            .iter()
            .filter(|r| cutoff.map_or(true, |c| r.recorded_at >= c))
            .collect();

        match sort {
            SortKey::Date => records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at)),
            SortKey::Bmi => records.sort_by(|a, b| b.bmi.total_cmp(&a.bmi)),
            SortKey::Weight => records.sort_by(|a, b| b.weight_kg.total_cmp(&a.weight_kg)),
        }
        records
    }

    /// [`filtered_at`](Self::filtered_at) relative to the current time.
    pub fn filtered(&self, period: Period, sort: SortKey) -> Vec<&BmiRecord> {
        self.filtered_at(period, sort, Utc::now())
    }
}

/// Check a stored schema version against [`SCHEMA_VERSION`].
///
/// Major versions must match; within 0.x a newer minor version is rejected.
pub fn validate_version(stored_version: &str) -> HealthResult<()> {
    let mismatch = || HealthError::VersionMismatch {
        stored_version: stored_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let stored: Vec<u32> = stored_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if stored.is_empty() || current.is_empty() || stored[0] != current[0] {
        return Err(mismatch());
    }

    if current[0] == 0 && stored.len() > 1 && current.len() > 1 && stored[1] > current[1] {
        return Err(mismatch());
    }

    Ok(())
}

/// Load the history from a store; a missing key yields an empty history.
///
/// # Errors
///
/// `SerializationError` for unreadable JSON, `VersionMismatch` for an
/// incompatible schema.
pub fn load_history(store: &dyn KeyValueStore) -> HealthResult<BmiHistory> {
    let Some(json) = store.get(HISTORY_KEY)? else {
        return Ok(BmiHistory::new());
    };

    let history: BmiHistory = serde_json::from_str(&json).map_err(|e| {
        tracing::warn!(error = %e, "stored BMI history is unreadable");
        HealthError::SerializationError {
            reason: format!("Invalid history JSON: {}", e),
        }
    })?;
    validate_version(&history.version)?;

    Ok(history)
}

/// Save the history to a store.
pub fn save_history(store: &mut dyn KeyValueStore, history: &BmiHistory) -> HealthResult<()> {
    let json = serde_json::to_string_pretty(history).map_err(|e| HealthError::SerializationError {
        reason: e.to_string(),
    })?;
    store.set(HISTORY_KEY, &json)?;
    tracing::info!(records = history.len(), "saved BMI history");
    Ok(())
}

/// Delete the stored history without reading it.
pub fn clear_history(store: &mut dyn KeyValueStore) -> HealthResult<()> {
    store.remove(HISTORY_KEY)?;
    tracing::info!("cleared BMI history");
    Ok(())
}

/// Append a record to the stored history.
pub fn record_result(store: &mut dyn KeyValueStore, record: BmiRecord) -> HealthResult<BmiHistory> {
    let mut history = load_history(store)?;
    history.add(record);
    save_history(store, &history)?;
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bmi::calculate_bmi;
    use crate::file_io::MemoryStore;
    use crate::units::Measurement;
    use chrono::TimeZone;

    fn record(weight_kg: f64, days_ago: i64, now: DateTime<Utc>) -> BmiRecord {
        let subject = Subject::new(Measurement::kg(weight_kg), Measurement::cm(175.0), 30, Gender::Male)
            .unwrap();
        let result = calculate_bmi(&subject).unwrap();
        BmiRecord::recorded_at(&subject, &result, now - Duration::days(days_ago))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_is_newest_first() {
        let mut history = BmiHistory::new();
        history.add(record(70.0, 10, now()));
        history.add(record(72.0, 0, now()));
        assert_eq!(history.latest().unwrap().weight_kg, 72.0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut history = BmiHistory::new();
        let kept = record(70.0, 1, now());
        let dropped = record(80.0, 0, now());
        let dropped_id = dropped.id;
        history.add(kept);
        history.add(dropped);

        assert_eq!(history.remove(dropped_id).unwrap().weight_kg, 80.0);
        assert!(history.remove(dropped_id).is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_trend() {
        let mut history = BmiHistory::new();
        history.add(record(70.0, 10, now()));
        assert!(history.trend().is_none());

        // 22.9 → 24.2
        history.add(record(74.0, 0, now()));
        let trend = history.trend().unwrap();
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.change, 1.3);

        history.add(record(74.0, 0, now()));
        assert_eq!(history.trend().unwrap().direction, TrendDirection::Stable);

        history.add(record(68.0, 0, now()));
        assert_eq!(history.trend().unwrap().direction, TrendDirection::Down);
    }

    #[test]
    fn test_filtered_by_period_and_sort() {
        let mut history = BmiHistory::new();
        history.add(record(90.0, 100, now()));
        history.add(record(70.0, 40, now()));
        history.add(record(85.0, 20, now()));
        history.add(record(75.0, 3, now()));

        assert_eq!(history.filtered_at(Period::Week, SortKey::Date, now()).len(), 1);
        assert_eq!(history.filtered_at(Period::Month, SortKey::Date, now()).len(), 2);
        assert_eq!(history.filtered_at(Period::ThreeMonths, SortKey::Date, now()).len(), 3);

        let by_weight = history.filtered_at(Period::All, SortKey::Weight, now());
        let weights: Vec<f64> = by_weight.iter().map(|r| r.weight_kg).collect();
        assert_eq!(weights, vec![90.0, 85.0, 75.0, 70.0]);

        let by_bmi = history.filtered_at(Period::Month, SortKey::Bmi, now());
        assert!(by_bmi[0].bmi >= by_bmi[1].bmi);

        let by_date = history.filtered_at(Period::All, SortKey::Date, now());
        assert_eq!(by_date[0].weight_kg, 75.0);
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(load_history(&store).unwrap().is_empty());

        record_result(&mut store, record(70.0, 1, now())).unwrap();
        let history = record_result(&mut store, record(72.0, 0, now())).unwrap();
        assert_eq!(history.len(), 2);

        let loaded = load_history(&store).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.latest().unwrap().weight_kg, 72.0);
        assert_eq!(loaded.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_corrupt_history_rejected() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "not json").unwrap();
        assert_eq!(load_history(&store).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_newer_schema_rejected() {
        let mut store = MemoryStore::new();
        store
            .set(HISTORY_KEY, r#"{"version": "0.2.0", "records": []}"#)
            .unwrap();
        assert_eq!(load_history(&store).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_clear_ignores_unreadable_history() {
        let mut store = MemoryStore::new();
        for stored in ["{ not json", r#"{"version": "1.0.0", "records": []}"#] {
            store.set(HISTORY_KEY, stored).unwrap();
            assert!(load_history(&store).is_err());

            clear_history(&mut store).unwrap();
            assert!(load_history(&store).unwrap().is_empty());
        }
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("latest").is_err());
    }
}
