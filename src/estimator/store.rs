//! Best-effort local lead storage.
//!
//! Leads are appended to a JSON array in a single file named after
//! [`LEAD_STORE_KEY`]. A missing file is an empty list. A file that cannot
//! be parsed is moved aside to `<name>.json.corrupt-<timestamp>` before the
//! next append, so earlier leads are never overwritten.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{EstimateBreakdown, EstimateInputs};

/// Fixed name of the lead list.
pub const LEAD_STORE_KEY: &str = "countertop_leads";

/// One saved lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Unique record identifier
    pub id: String,
    /// When the lead was saved
    pub timestamp: DateTime<Utc>,
    /// Form inputs as submitted
    pub inputs: EstimateInputs,
    /// Estimate shown to the visitor
    pub breakdown: EstimateBreakdown,
}

impl LeadRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(inputs: EstimateInputs, breakdown: EstimateBreakdown) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            inputs,
            breakdown,
        }
    }
}

/// Append-only lead list backed by a JSON file.
#[derive(Debug, Clone)]
pub struct LeadStore {
    path: PathBuf,
}

impl LeadStore {
    /// Opens the store file inside `dir` (the file is created on first append).
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(format!("{LEAD_STORE_KEY}.json")))
    }

    /// Opens the store at an explicit file path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all saved leads in insertion order.
    ///
    /// A missing file is an empty list; unreadable or malformed content is an error.
    pub fn load(&self) -> Result<Vec<LeadRecord>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).context(format!(
                    "Failed to read lead store: {}",
                    self.path.display()
                ))
            }
        };

        serde_json::from_slice(&content).context(format!(
            "Failed to parse lead store: {}",
            self.path.display()
        ))
    }

    /// Reads all saved leads, logging and skipping a damaged file.
    #[must_use]
    pub fn list(&self) -> Vec<LeadRecord> {
        self.load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable lead store: {e:#}");
            Vec::new()
        })
    }

    /// Moves a damaged store file out of the way and returns its new path.
    fn quarantine(&self) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%3fZ");
        let target = self.path.with_extension(format!("json.corrupt-{stamp}"));
        fs::rename(&self.path, &target).context(format!(
            "Failed to move damaged lead store to: {}",
            target.display()
        ))?;
        Ok(target)
    }

    /// Appends a record and rewrites the file atomically.
    ///
    /// A damaged file is quarantined first; if that fails the record is not written.
    pub fn append(&self, record: LeadRecord) -> Result<()> {
        let mut records = match self.load() {
            Ok(records) => records,
            Err(e) => {
                let moved = self.quarantine()?;
                warn!("{e:#}; moved it to {}", moved.display());
                Vec::new()
            }
        };
        records.push(record);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create lead store directory: {}",
                    parent.display()
                ))?;
            }
        }

        let content =
            serde_json::to_string_pretty(&records).context("Failed to serialize leads")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp lead store: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp lead store to: {}",
            self.path.display()
        ))?;

        info!(
            "Saved lead #{} to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoneyRange;
    use tempfile::TempDir;

    fn record(name: &str) -> LeadRecord {
        let mut inputs = EstimateInputs::new("Quartz", 50.0);
        inputs.name = name.to_string();
        LeadRecord::new(
            inputs,
            EstimateBreakdown {
                material: MoneyRange::new(2000, 3000),
                labor: MoneyRange::new(500, 1000),
                add_ons: MoneyRange::new(0, 0),
                buffer: MoneyRange::new(125, 480),
                total: MoneyRange::new(2625, 4480),
                currency: "CAD".to_string(),
            },
        )
    }

    #[test]
    fn test_append_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeadStore::in_dir(temp_dir.path());
        assert!(store.list().is_empty());

        store.append(record("First")).unwrap();
        store.append(record("Second")).unwrap();

        let leads = store.list();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].inputs.name, "First");
        assert_eq!(leads[1].inputs.name, "Second");
        assert!(store.path().ends_with("countertop_leads.json"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeadStore::in_dir(temp_dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_store_listed_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeadStore::in_dir(temp_dir.path());
        fs::write(store.path(), "not json").unwrap();

        assert!(store.load().is_err());
        assert!(store.list().is_empty());
    }

    fn corrupt_copies(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.to_string_lossy().contains(".json.corrupt-"))
            .collect()
    }

    #[test]
    fn test_damaged_store_keeps_earlier_leads() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeadStore::in_dir(temp_dir.path());
        store.append(record("First")).unwrap();
        store.append(record("Second")).unwrap();

        // A stray invalid UTF-8 byte makes the whole file unparseable
        let mut bytes = fs::read(store.path()).unwrap();
        bytes.push(0xFF);
        fs::write(store.path(), &bytes).unwrap();

        store.append(record("Third")).unwrap();

        let leads = store.list();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].inputs.name, "Third");

        let copies = corrupt_copies(temp_dir.path());
        assert_eq!(copies.len(), 1);
        assert_eq!(fs::read(&copies[0]).unwrap(), bytes);

        let earlier: Vec<LeadRecord> = serde_json::from_slice(&bytes[..bytes.len() - 1]).unwrap();
        let names: Vec<_> = earlier.iter().map(|r| r.inputs.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeadStore::at(temp_dir.path().join("nested/dir/leads.json"));
        store.append(record("Nested")).unwrap();
        assert_eq!(store.list().len(), 1);
    }
}
