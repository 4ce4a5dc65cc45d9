//! Backup snapshot envelope.
//!
//! A remote backup service accepts the history wrapped as
//! `{"jsonData": {"data": {...}}, "filename": "...", "status": "..."}`.
//! Building and writing that document lives here; sending it does not.

use crate::{HistoryMap, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Status given to freshly built snapshots
pub const STATUS_PENDING: &str = "pending";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryData {
    pub data: HistoryMap,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub json_data: HistoryData,
    pub filename: String,
    pub status: String,
}

impl HistorySnapshot {
    pub fn new(history: &HistoryMap, filename: impl Into<String>) -> Self {
        Self {
            json_data: HistoryData {
                data: history.clone(),
            },
            filename: filename.into(),
            status: STATUS_PENDING.to_string(),
        }
    }

    /// Snapshot named after the moment it was taken,
    /// e.g. `workoutHistory_20261017T093000Z.json`
    pub fn timestamped(history: &HistoryMap, taken_at: DateTime<Utc>) -> Self {
        let filename = format!(
            "{}_{}.json",
            crate::codec::STORAGE_KEY,
            taken_at.format("%Y%m%dT%H%M%SZ")
        );
        Self::new(history, filename)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as pretty JSON to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!("Wrote history snapshot {} to {:?}", self.filename, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SetEntry, WorkoutSet};
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_envelope_layout() {
        let mut history = HistoryMap::new();
        history.insert(
            "Squat".into(),
            vec![WorkoutSet::new(SetEntry::new(5, 100.0), Utc::now())],
        );

        let snapshot = HistorySnapshot::new(&history, "backup.json");
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["filename"], "backup.json");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["jsonData"]["data"]["Squat"][0]["reps"], 5);

        let parsed: HistorySnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_timestamped_filename() {
        let taken_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let snapshot = HistorySnapshot::timestamped(&HistoryMap::new(), taken_at);
        assert_eq!(snapshot.filename, "workoutHistory_20261017T093000Z.json");
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("snap.json");

        HistorySnapshot::new(&HistoryMap::new(), "snap.json")
            .write_to(&path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"jsonData\""));
    }
}
