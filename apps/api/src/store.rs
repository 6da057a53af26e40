//! File-backed shot store.
//!
//! The whole collection lives in one pretty-printed JSON array on disk and
//! every operation is a full load-modify-store of that document. A mutex per
//! store instance serializes those sequences so concurrent writers cannot
//! lose an update; the dataset is assumed small enough that re-reading the
//! file on every call is acceptable.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

use crate::models::shot::{ShotPatch, ShotRecord};

const SHOTS_FILE: &str = "shots.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Store for the full shot collection, holding its target path explicitly.
/// Construct once at startup and share behind an `Arc`.
pub struct ShotStore {
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl ShotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ShotStore {
            file_path: data_dir.into().join(SHOTS_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Returns the full collection in stored order.
    ///
    /// A missing file, an unreadable file, and an unparseable document all
    /// yield an empty collection; read failures are logged and swallowed,
    /// never raised. The next successful write overwrites whatever was there.
    pub fn get_all(&self) -> Vec<ShotRecord> {
        let _guard = self.lock.lock().unwrap();
        self.load()
    }

    /// Overwrites the entire persisted collection with exactly `shots`,
    /// creating the data directory if it does not exist yet.
    pub fn replace_all(&self, shots: &[ShotRecord]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        self.save(shots)
    }

    /// Shallow-merges `patch` onto the record whose id matches.
    ///
    /// When no record matches, the unchanged collection is still written back
    /// and the call still succeeds, so callers cannot distinguish "updated"
    /// from "no such id" here. Check existence first where it matters.
    pub fn update(&self, id: &str, patch: ShotPatch) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut shots = self.load();
        if let Some(shot) = shots.iter_mut().find(|s| s.id == id) {
            patch.apply(shot);
        }
        self.save(&shots)
    }

    /// Appends one record. Duplicate ids are not rejected; lookups resolve
    /// by first match.
    pub fn add(&self, shot: ShotRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut shots = self.load();
        shots.push(shot);
        self.save(&shots)
    }

    /// Removes every record whose id matches, preserving the relative order
    /// of the rest. Succeeds when zero records matched.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut shots = self.load();
        shots.retain(|s| s.id != id);
        self.save(&shots)
    }

    fn load(&self) -> Vec<ShotRecord> {
        let raw = match fs::read_to_string(&self.file_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {e}", self.file_path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(shots) => shots,
            Err(e) => {
                warn!(
                    "Ignoring unparseable shot document {}: {e}",
                    self.file_path.display()
                );
                Vec::new()
            }
        }
    }

    fn save(&self, shots: &[ShotRecord]) -> Result<(), StoreError> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(shots)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::shot::ShotStatus;

    fn sample_shot(id: &str, title: &str) -> ShotRecord {
        ShotRecord {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn temp_store() -> (tempfile::TempDir, ShotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ShotStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_get_all_returns_empty_when_file_missing() {
        let (_dir, store) = temp_store();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_get_all_swallows_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shots.json"), "not json at all").unwrap();
        let store = ShotStore::new(dir.path());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_replace_all_round_trips_in_order() {
        let (_dir, store) = temp_store();
        let shots = vec![
            sample_shot("shot_1", "Opening"),
            sample_shot("shot_2", "Interview"),
            sample_shot("shot_3", "Finale"),
        ];
        store.replace_all(&shots).unwrap();
        assert_eq!(store.get_all(), shots);
    }

    #[test]
    fn test_replace_all_creates_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShotStore::new(dir.path().join("nested").join("data"));
        store.replace_all(&[sample_shot("shot_1", "Opening")]).unwrap();
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_add_appends_to_end() {
        let (_dir, store) = temp_store();
        store.replace_all(&[sample_shot("shot_1", "Opening")]).unwrap();
        store.add(sample_shot("shot_2", "Interview")).unwrap();

        let shots = store.get_all();
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[1].id, "shot_2");
    }

    #[test]
    fn test_update_patches_matching_record_only() {
        let (_dir, store) = temp_store();
        store
            .replace_all(&[sample_shot("shot_1", "Opening"), sample_shot("shot_2", "Interview")])
            .unwrap();

        let patch = ShotPatch {
            status: Some(ShotStatus::PromptGenerated),
            prompt: Some("A wide establishing shot.".to_string()),
            ..Default::default()
        };
        store.update("shot_2", patch).unwrap();

        let shots = store.get_all();
        assert_eq!(shots[0].status, ShotStatus::PromptNotYetGenerated);
        assert_eq!(shots[1].status, ShotStatus::PromptGenerated);
        assert_eq!(shots[1].prompt, "A wide establishing shot.");
        assert_eq!(shots[1].title, "Interview");
    }

    #[test]
    fn test_update_unknown_id_succeeds_and_leaves_content_unchanged() {
        let (_dir, store) = temp_store();
        store.replace_all(&[sample_shot("shot_2", "Interview")]).unwrap();

        let patch = ShotPatch {
            status: Some(ShotStatus::ShotSelected),
            ..Default::default()
        };
        store.update("shot_1", patch).unwrap();

        let shots = store.get_all();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, "shot_2");
        assert_eq!(shots[0].status, ShotStatus::PromptNotYetGenerated);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let (_dir, store) = temp_store();
        store
            .replace_all(&[
                sample_shot("shot_1", "Opening"),
                sample_shot("shot_2", "Interview"),
                sample_shot("shot_3", "Finale"),
            ])
            .unwrap();

        store.remove("shot_2").unwrap();

        let ids: Vec<_> = store.get_all().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["shot_1", "shot_3"]);
    }

    #[test]
    fn test_remove_unknown_id_succeeds() {
        let (_dir, store) = temp_store();
        store.replace_all(&[sample_shot("shot_1", "Opening")]).unwrap();
        store.remove("shot_9").unwrap();
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_concurrent_adds_lose_no_records() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .add(sample_shot(&format!("shot_{t}_{i}"), "Concurrent"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_all().len(), 80);
    }
}
