//! Persistent wizard-draft state.
//!
//! The draft is a single JSON blob under a fixed key, surviving reloads and
//! step navigation until submission succeeds or the user resets. The storage
//! backend is injected so tests run against memory and the app against disk;
//! there is no module-level singleton.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use finetune::DraftPayload;

use crate::error::Result;

pub const DRAFT_STORAGE_KEY: &str = "fine-tune-draft";

/// A keyed blob store. Implementations only move strings; the draft's shape
/// is the [`DraftStore`]'s business.
pub trait DraftStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// One file per key under a caller-chosen directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStorage for FileStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("draft storage mutex poisoned"))
    }
}

impl DraftStorage for MemoryStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Draft container over an injected storage backend.
///
/// `set` merges the update over the stored draft (last write wins per
/// field); `reset` clears the blob entirely.
pub struct DraftStore<S: DraftStorage> {
    storage: S,
    key: String,
}

impl<S: DraftStorage> DraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DRAFT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn get(&self) -> Result<DraftPayload> {
        let Some(blob) = self.storage.load(&self.key)? else {
            return Ok(DraftPayload::default());
        };
        match serde_json::from_str(&blob) {
            Ok(draft) => Ok(draft),
            Err(e) => {
                // A corrupt blob means a fresh draft, not a stuck wizard.
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable draft");
                Ok(DraftPayload::default())
            }
        }
    }

    pub fn set(&self, update: DraftPayload) -> Result<DraftPayload> {
        let mut draft = self.get()?;
        draft.merge(update);
        let blob = serde_json::to_string(&draft)
            .map_err(|e| io::Error::other(format!("draft serialization failed: {e}")))?;
        self.storage.save(&self.key, &blob)?;
        Ok(draft)
    }

    pub fn reset(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_draft() -> DraftPayload {
        DraftPayload {
            job_name: Some("my-job-1".to_string()),
            base_model_id: Some("base-model".to_string()),
            ..DraftPayload::default()
        }
    }

    #[test]
    fn get_returns_empty_draft_when_nothing_stored() {
        let store = DraftStore::new(MemoryStorage::new());
        assert_eq!(store.get().unwrap(), DraftPayload::default());
    }

    #[test]
    fn set_merges_partial_updates() {
        let store = DraftStore::new(MemoryStorage::new());
        store.set(named_draft()).unwrap();

        let merged = store
            .set(DraftPayload {
                training_epochs: Some(5),
                ..DraftPayload::default()
            })
            .unwrap();

        assert_eq!(merged.job_name.as_deref(), Some("my-job-1"));
        assert_eq!(merged.training_epochs, Some(5));

        let reloaded = store.get().unwrap();
        assert_eq!(reloaded, merged);
    }

    #[test]
    fn later_writes_win_per_field() {
        let store = DraftStore::new(MemoryStorage::new());
        store.set(named_draft()).unwrap();
        store
            .set(DraftPayload {
                job_name: Some("renamed".to_string()),
                ..DraftPayload::default()
            })
            .unwrap();

        let draft = store.get().unwrap();
        assert_eq!(draft.job_name.as_deref(), Some("renamed"));
        assert_eq!(draft.base_model_id.as_deref(), Some("base-model"));
    }

    #[test]
    fn reset_clears_the_draft() {
        let store = DraftStore::new(MemoryStorage::new());
        store.set(named_draft()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.get().unwrap(), DraftPayload::default());
    }

    #[test]
    fn corrupt_blob_yields_fresh_draft() {
        let storage = MemoryStorage::new();
        storage.save(DRAFT_STORAGE_KEY, "{not json").unwrap();
        let store = DraftStore::new(storage);
        assert_eq!(store.get().unwrap(), DraftPayload::default());
    }

    #[test]
    fn file_storage_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let store = DraftStore::new(FileStorage::new(dir.path()));
        store.set(named_draft()).unwrap();

        // A second store over the same directory sees the persisted draft,
        // as a reloaded page would.
        let reopened = DraftStore::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.get().unwrap().job_name.as_deref(), Some("my-job-1"));

        reopened.reset().unwrap();
        assert_eq!(store.get().unwrap(), DraftPayload::default());
    }

    #[test]
    fn file_storage_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove(DRAFT_STORAGE_KEY).unwrap();
        storage.remove(DRAFT_STORAGE_KEY).unwrap();
    }
}
