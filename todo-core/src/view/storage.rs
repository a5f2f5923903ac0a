//! Local key-value storage for client UI state
//!
//! The client persists which item groups are collapsed under a single key.
//! Stores are last-write-wins; no ordering guarantees beyond that.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::view::grouping::GroupStates;

/// Key holding the serialized [`GroupStates`]
pub const GROUP_STATES_KEY: &str = "groupStates";

/// String key-value collaborator (the browser's local storage, or a file)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by a JSON object on disk, one string value per key
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| CoreError::json(self.path.display().to_string(), e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Last write wins: an existing file that no longer parses is replaced.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(CoreError::Json { context, source }) => {
                tracing::warn!("overwriting unreadable store {}: {}", context, source);
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| CoreError::json(self.path.display().to_string(), e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl GroupStates {
    /// Read group states from the store.
    ///
    /// Absent or unreadable values fall back to all groups expanded.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(GROUP_STATES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("failed to read group states: {}", e);
                return Self::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed group states: {}", e);
            Self::default()
        })
    }

    /// Write group states to the store.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self).map_err(|e| CoreError::json(GROUP_STATES_KEY, e))?;
        store.set(GROUP_STATES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TodoItemState;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ui-state.json");

        let mut store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.get("c").unwrap(), None);
    }

    #[test]
    fn group_states_saved_under_key() {
        let mut store = MemoryStore::new();
        let mut states = GroupStates::default();
        states.set(TodoItemState::Done, true);
        states.save(&mut store).unwrap();

        assert_eq!(
            store.get(GROUP_STATES_KEY).unwrap().as_deref(),
            Some(r#"{"todo":false,"inprogress":false,"done":true}"#)
        );
        assert_eq!(GroupStates::load(&store), states);
    }

    #[test]
    fn malformed_group_states_fall_back() {
        let mut store = MemoryStore::new();
        store.set(GROUP_STATES_KEY, "not json").unwrap();
        assert_eq!(GroupStates::load(&store), GroupStates::default());
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui-state.json");
        fs::write(&path, "{ broken").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get(GROUP_STATES_KEY).is_err());
        assert_eq!(GroupStates::load(&store), GroupStates::default());
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui-state.json");
        fs::write(&path, "{ broken").unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(GroupStates::load(&store), GroupStates::default());

        GroupStates::all(true).save(&mut store).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(GroupStates::load(&reopened), GroupStates::all(true));
    }
}
