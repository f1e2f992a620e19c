//! Local JSON storage for records.
//!
//! The store is a single pretty-printed JSON array, in insertion order.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so a crash mid-write never leaves a truncated store. A
//! file that is not JSON at all is moved aside to `<stem>.corrupt.json` and
//! the store starts over empty.
//!
//! One process writes at a time; the file is not locked.

use crate::error::{DopError, Result};
use crate::record::Record;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Default data file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// File-backed record store
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a corrupt store is moved to
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("corrupt.json")
    }

    /// Create an empty store if the file does not exist
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, "[]\n")?;
            debug!(path = %self.path.display(), "created empty store");
        }
        Ok(())
    }

    /// Load every record in insertion order
    pub fn load_all(&self) -> Result<Vec<Record>> {
        self.ensure_exists()?;
        let text = fs::read_to_string(&self.path)?;

        let payload: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                let backup = self.backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "data file is not valid JSON, starting over"
                );
                fs::rename(&self.path, &backup)?;
                self.ensure_exists()?;
                return Ok(Vec::new());
            }
        };

        let items = match payload {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(DopError::CorruptRecord(
                    "expected a list of entries".to_string(),
                ))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let record: Record = serde_json::from_value(item)
                .map_err(|e| DopError::CorruptRecord(e.to_string()))?;
            record
                .validate()
                .map_err(|e| DopError::CorruptRecord(format!("{}: {}", record.date, e)))?;
            if records.iter().any(|r: &Record| r.date == record.date) {
                return Err(DopError::CorruptRecord(format!(
                    "duplicate date {}",
                    record.date
                )));
            }
            records.push(record);
        }

        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    /// Replace the store contents atomically
    pub fn save_all(&self, records: &[Record]) -> Result<()> {
        self.ensure_exists()?;
        let mut json = serde_json::to_string_pretty(records)
            .map_err(|e| DopError::SerializationError(e.to_string()))?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| DopError::Io(e.error))?;

        info!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }

    /// Append a record; one entry per date
    pub fn add(&self, record: Record) -> Result<()> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.date == record.date) {
            return Err(DopError::DuplicateDate(record.date));
        }
        records.push(record);
        self.save_all(&records)
    }

    /// Record for a given date, if any
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Option<Record>> {
        Ok(self.load_all()?.into_iter().find(|r| r.date == date))
    }

    /// Drop the record for a date; no-op when absent
    pub fn remove_by_date(&self, date: NaiveDate) -> Result<()> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.date != date);
        if records.len() != before {
            debug!(%date, "removing record");
        }
        self.save_all(&records)
    }

    /// Overwrite a day: delete then reinsert at the end
    pub fn replace(&self, record: Record) -> Result<()> {
        self.remove_by_date(record.date)?;
        self.add(record)
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record_on;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]\n");
    }

    #[test]
    fn test_add_get_remove() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        store.add(record_on(day(2), 1, 0, 7.0, 5.0, 5.0)).unwrap();
        store.add(record_on(day(1), 2, 1, 6.0, 7.5, 5.0)).unwrap();

        // Insertion order, not date order
        let all = store.load_all().unwrap();
        assert_eq!(all[0].date, day(2));
        assert_eq!(all[1].date, day(1));

        assert_eq!(store.get_by_date(day(1)).unwrap().unwrap().coffee, 2);
        assert!(store.get_by_date(day(3)).unwrap().is_none());

        store.remove_by_date(day(2)).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        store.add(record_on(day(5), 1, 0, 7.0, 5.0, 5.0)).unwrap();
        let err = store.add(record_on(day(5), 3, 0, 7.0, 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, DopError::DuplicateDate(d) if d == day(5)));
    }

    #[test]
    fn test_replace_moves_to_end() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        store.add(record_on(day(1), 1, 0, 7.0, 5.0, 5.0)).unwrap();
        store.add(record_on(day(2), 1, 0, 7.0, 5.0, 5.0)).unwrap();
        store.replace(record_on(day(1), 4, 0, 7.0, 5.0, 5.0)).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].date, day(1));
        assert_eq!(all[1].coffee, 4);
    }

    #[test]
    fn test_corrupt_json_is_moved_aside() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), "{ not json");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]\n");
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        fs::write(store.path(), "{\"date\": \"2024-01-01\"}").unwrap();
        assert!(matches!(store.load_all(), Err(DopError::CorruptRecord(_))));

        fs::write(store.path(), "[{\"date\": \"2024-01-01\"}]").unwrap();
        assert!(matches!(store.load_all(), Err(DopError::CorruptRecord(_))));
    }

    #[test]
    fn test_out_of_range_record_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        let mut bad = record_on(day(1), 1, 0, 7.0, 5.0, 5.0);
        bad.sleep = 30.0;
        store.save_all(&[bad]).unwrap();

        assert!(matches!(store.load_all(), Err(DopError::CorruptRecord(_))));
    }
}
