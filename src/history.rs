//! Durable score history: append-only JSON log with aggregate stats.
//!
//! The backing file is a JSON array of entries at an injected path. Writers
//! take an exclusive advisory lock for the whole read-modify-write, then
//! publish through a temp file + rename, so concurrent runs never lose
//! entries and a failed write leaves the prior log intact.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::types::{HistoryEntry, HistoryStats};

/// Handle to the history log at one backing path.
pub struct HistoryStore {
  path: PathBuf,
}

impl HistoryStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Append one entry durably.
  ///
  /// The write is flushed to disk before this returns; a restart after a
  /// successful `record` always observes the entry.
  pub fn record(&self, entry: &HistoryEntry) -> Result<(), EngineError> {
    let _lock = self.acquire_lock()?;

    let mut entries = self.load()?;
    entries.push(entry.clone());

    let json = serde_json::to_vec_pretty(&entries)
      .map_err(|e| self.failed(format!("encode history: {e}")))?;

    // Write to a temp file first, then rename (atomic on POSIX).
    let tmp = self.path.with_extension("tmp");
    let mut file = File::create(&tmp).map_err(|e| self.failed(format!("create temp log: {e}")))?;
    file
      .write_all(&json)
      .map_err(|e| self.failed(format!("write temp log: {e}")))?;
    file
      .sync_all()
      .map_err(|e| self.failed(format!("flush temp log: {e}")))?;
    fs::rename(&tmp, &self.path).map_err(|e| self.failed(format!("publish log: {e}")))?;

    tracing::debug!(path = %self.path.display(), entries = entries.len(), "history updated");
    Ok(())
  }

  /// Aggregate statistics, recomputed from the full log on every call.
  ///
  /// An empty log reports zero analyses with average and best fixed at zero.
  pub fn stats(&self) -> Result<HistoryStats, EngineError> {
    let entries = self.load()?;
    if entries.is_empty() {
      return Ok(HistoryStats::empty());
    }

    let sum: u64 = entries.iter().map(|e| u64::from(e.score)).sum();
    let best = entries.iter().map(|e| e.score).max().unwrap_or(0);
    Ok(HistoryStats {
      total_analyses: entries.len() as u64,
      average_score: sum as f64 / entries.len() as f64,
      best_score: best,
    })
  }

  /// All entries in insertion order, oldest first.
  ///
  /// Reloads the log each call; call again to restart the sequence.
  pub fn all_entries(&self) -> Result<impl Iterator<Item = HistoryEntry>, EngineError> {
    Ok(self.load()?.into_iter())
  }

  /// Load the full log. Missing or blank file = empty log (first-ever use);
  /// unparseable content is an error, never a silent reset.
  fn load(&self) -> Result<Vec<HistoryEntry>, EngineError> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(self.failed(format!("read history: {e}"))),
    };
    if raw.trim().is_empty() {
      return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| self.failed(format!("history log corrupt: {e}")))
  }

  /// Exclusive advisory lock on a sibling lock file, held until the returned
  /// handle drops. Serializes concurrent writers across processes.
  fn acquire_lock(&self) -> Result<File, EngineError> {
    let lock_path = self.path.with_extension("lock");
    let file = OpenOptions::new()
      .create(true)
      .write(true)
      .open(&lock_path)
      .map_err(|e| self.failed(format!("open lock file: {e}")))?;
    file
      .lock()
      .map_err(|e| self.failed(format!("acquire lock: {e}")))?;
    Ok(file)
  }

  fn failed(&self, reason: String) -> EngineError {
    EngineError::persistence(&self.path, reason)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};
  use tempfile::TempDir;

  fn entry(score: u8, minute: u32) -> HistoryEntry {
    HistoryEntry {
      timestamp: Utc.with_ymd_and_hms(2025, 1, 15, 10, minute, 0).unwrap(),
      filename: "sample.py".to_string(),
      score,
    }
  }

  fn store_in(dir: &TempDir) -> HistoryStore {
    HistoryStore::new(dir.path().join("history.json"))
  }

  #[test]
  fn first_use_reports_empty_stats() {
    let dir = TempDir::new().unwrap();
    let stats = store_in(&dir).stats().unwrap();
    assert_eq!(stats, HistoryStats::empty());
  }

  #[test]
  fn blank_file_is_an_empty_log() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "\n").unwrap();
    assert_eq!(store.stats().unwrap().total_analyses, 0);
  }

  #[test]
  fn record_then_stats_reflects_the_entry() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.record(&entry(80, 0)).unwrap();
    let stats = store.stats().unwrap();
    assert_eq!(stats.total_analyses, 1);
    assert_eq!(stats.best_score, 80);

    store.record(&entry(60, 1)).unwrap();
    let stats = store.stats().unwrap();
    assert_eq!(stats.total_analyses, 2);
    assert!((stats.average_score - 70.0).abs() < f64::EPSILON);
    assert_eq!(stats.best_score, 80);
  }

  #[test]
  fn best_score_only_moves_up() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.record(&entry(90, 0)).unwrap();
    store.record(&entry(40, 1)).unwrap();
    assert_eq!(store.stats().unwrap().best_score, 90);
  }

  #[test]
  fn entries_round_trip_through_a_fresh_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let recorded = vec![entry(50, 0), entry(75, 1), entry(100, 2)];

    let store = HistoryStore::new(&path);
    for e in &recorded {
      store.record(e).unwrap();
    }

    let reloaded: Vec<HistoryEntry> = HistoryStore::new(&path).all_entries().unwrap().collect();
    assert_eq!(reloaded, recorded);
  }

  #[test]
  fn all_entries_is_restartable() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.record(&entry(10, 0)).unwrap();
    store.record(&entry(20, 1)).unwrap();

    let first: Vec<_> = store.all_entries().unwrap().collect();
    let second: Vec<_> = store.all_entries().unwrap().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
  }

  #[test]
  fn corrupt_log_is_surfaced_not_reset() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "{not valid json").unwrap();

    let err = store.stats().unwrap_err();
    assert!(matches!(err, EngineError::Persistence { .. }));

    let err = store.record(&entry(80, 0)).unwrap_err();
    assert!(matches!(err, EngineError::Persistence { .. }));

    // Prior (corrupt) content is left intact for inspection.
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{not valid json");
  }

  #[test]
  fn persisted_file_is_valid_json_after_every_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    for i in 0..3 {
      store.record(&entry(50 + i, u32::from(i))).unwrap();
      let raw = fs::read_to_string(store.path()).unwrap();
      let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
      assert_eq!(parsed.as_array().unwrap().len(), usize::from(i) + 1);
    }
  }

  #[test]
  fn timestamps_serialize_as_iso8601() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.record(&entry(80, 30)).unwrap();
    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("2025-01-15T10:30:00Z"));
  }

  #[test]
  fn concurrent_writers_lose_no_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let handles: Vec<_> = (0..8u8)
      .map(|t| {
        let path = path.clone();
        std::thread::spawn(move || {
          let store = HistoryStore::new(path);
          for i in 0..5 {
            store.record(&entry(t * 10 + i, u32::from(i))).unwrap();
          }
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }

    let stats = HistoryStore::new(&path).stats().unwrap();
    assert_eq!(stats.total_analyses, 40);
  }
}
