//! # File I/O Module
//!
//! Key-value persistence for small JSON documents such as the BMI history.
//!
//! - [`KeyValueStore`] - the storage seam used by [`crate::history`]
//! - [`FileStore`] - one `<key>.json` file per key in a directory, written
//!   atomically
//! - [`MemoryStore`] - in-process store for tests and one-off sessions
//!
//! ## Atomic Writes
//!
//! [`write_atomic`] writes to `<name>.tmp`, syncs it to disk, then renames it
//! over the target, so readers never see a half-written file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use health_core::file_io::{FileStore, KeyValueStore};
//!
//! let mut store = FileStore::new("./health-data");
//! store.set("bmi-history", "{\"version\":\"0.1.0\",\"records\":[]}")?;
//! assert!(store.get("bmi-history")?.is_some());
//! # Ok::<(), health_core::errors::HealthError>(())
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::errors::{HealthError, HealthResult};

/// String values stored under string keys.
pub trait KeyValueStore {
    /// Value for `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> HealthResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> HealthResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> HealthResult<()>;
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_key(key: &str) -> HealthResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(HealthError::invalid_input(
            "key",
            key,
            "Keys may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

/// Write bytes to a file with atomic replace semantics.
///
/// 1. Write to a sibling `.tmp` file
/// 2. Sync to disk (fsync)
/// 3. Rename over the target
pub fn write_atomic(path: &Path, contents: &[u8]) -> HealthResult<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        HealthError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        HealthError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        HealthError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        HealthError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> HealthResult<Option<String>> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HealthError::file_error("read", path.display().to_string(), e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> HealthResult<()> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            HealthError::file_error("create directory", self.dir.display().to_string(), e.to_string())
        })?;
        write_atomic(&self.path_for(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> HealthResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HealthError::file_error("remove", path.display().to_string(), e.to_string())),
        }
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> HealthResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> HealthResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HealthResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_store_dir(name: &str) -> PathBuf {
        temp_dir().join(format!("health_store_test_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_store_dir("roundtrip");
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("bmi-history").unwrap(), None);
        store.set("bmi-history", "[1,2,3]").unwrap();
        assert_eq!(store.get("bmi-history").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(store.path_for("bmi-history").ends_with("bmi-history.json"));

        store.set("bmi-history", "[]").unwrap();
        assert_eq!(store.get("bmi-history").unwrap().as_deref(), Some("[]"));

        store.remove("bmi-history").unwrap();
        assert_eq!(store.get("bmi-history").unwrap(), None);
        // Removing again is fine
        store.remove("bmi-history").unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let dir = temp_store_dir("atomic");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.pdf");

        write_atomic(&path, b"%PDF-1.7").unwrap();

        assert!(path.exists());
        assert!(!dir.join("report.pdf.tmp").exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let mut store = FileStore::new(temp_store_dir("keys"));
        assert_eq!(store.get("../escape").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(store.set("", "x").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(store.remove("a/b").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
