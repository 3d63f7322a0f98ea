//! Durable key-value storage and the history persistence bridge.
//!
//! The storage model mirrors browser localStorage: string keys, string
//! values, synchronous reads and writes, best-effort durability. [`FileStore`]
//! keeps one JSON file per key under the platform data directory;
//! [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::history::SearchHistory;

/// Fixed key the recent-search history is stored under.
pub const HISTORY_KEY: &str = "weatherHistory";

/// String-keyed durable storage with synchronous read/write.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Best-effort write: failures are logged by the implementation, never
    /// surfaced to the caller.
    fn put(&mut self, key: &str, value: &str);
}

/// In-memory store for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store: one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform data directory, creating it as needed.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;
        Ok(Self::at(dirs.data_dir()))
    }

    /// Store rooted at an explicit directory (tests use a tempdir).
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn put(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        let result: Result<()> = (|| {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;
            fs::write(&path, value)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(())
        })();
        if let Err(err) = result {
            tracing::warn!(key, error = %err, "persist write failed");
        }
    }
}

/// Keeps the persisted history in sync with the in-memory one.
///
/// Two write paths exist on purpose, matching the observed behavior of the
/// system this replaces:
/// - [`write`](Self::write): the unconditional inline write performed right
///   after a successful fetch recorded a new city;
/// - [`sync`](Self::sync): the whole-state watcher that runs after every
///   dispatch and writes whenever the history differs from the last value
///   this bridge wrote.
pub struct HistoryBridge<S: KeyValueStore> {
    kv: S,
    last_written: Vec<String>,
}

impl<S: KeyValueStore> HistoryBridge<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            last_written: Vec::new(),
        }
    }

    /// Read and parse the persisted history. Missing key or malformed JSON
    /// yields an empty history; corruption is logged, never surfaced.
    pub fn load(&mut self) -> SearchHistory {
        let history = match self.kv.get(HISTORY_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => SearchHistory::from_entries(entries),
                Err(err) => {
                    tracing::debug!(error = %err, "stored history is not a JSON string array, starting empty");
                    SearchHistory::default()
                }
            },
            None => SearchHistory::default(),
        };
        self.last_written = history.entries().to_vec();
        history
    }

    /// Inline write path: persist the given entries unconditionally.
    pub fn write(&mut self, entries: &[String]) {
        self.write_entries(entries.to_vec());
    }

    /// Watcher path: persist if and only if the history differs from the last
    /// value written through this bridge. Returns whether a write happened.
    pub fn sync(&mut self, history: &SearchHistory) -> bool {
        if self.last_written == history.entries() {
            return false;
        }
        self.write_entries(history.entries().to_vec());
        true
    }

    fn write_entries(&mut self, entries: Vec<String>) {
        match serde_json::to_string(&entries) {
            Ok(raw) => self.kv.put(HISTORY_KEY, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to serialize history"),
        }
        self.last_written = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_key_is_empty() {
        let mut bridge = HistoryBridge::new(MemoryStore::new());
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn load_malformed_json_is_empty() {
        let mut kv = MemoryStore::new();
        kv.put(HISTORY_KEY, "{not json");
        let mut bridge = HistoryBridge::new(kv);
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn load_wrong_shape_is_empty() {
        let mut kv = MemoryStore::new();
        kv.put(HISTORY_KEY, r#"{"cities": ["paris"]}"#);
        let mut bridge = HistoryBridge::new(kv);
        assert!(bridge.load().is_empty());
    }

    #[test]
    fn write_then_load_round_trips() {
        let mut bridge = HistoryBridge::new(MemoryStore::new());
        bridge.write(&["paris".to_string(), "london".to_string()]);

        let reloaded = bridge.load();
        assert_eq!(reloaded.entries(), ["paris", "london"]);
    }

    #[test]
    fn sync_writes_only_on_change() {
        let mut bridge = HistoryBridge::new(MemoryStore::new());
        let mut history = bridge.load();

        assert!(!bridge.sync(&history), "unchanged history must not write");

        history.record("kyiv");
        assert!(bridge.sync(&history));
        assert!(!bridge.sync(&history), "watcher already wrote this value");
    }

    #[test]
    fn inline_write_makes_watcher_a_noop() {
        let mut bridge = HistoryBridge::new(MemoryStore::new());
        let mut history = bridge.load();
        history.record("kyiv");

        bridge.write(history.entries());
        assert!(!bridge.sync(&history));
    }

    #[test]
    fn file_store_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut bridge = HistoryBridge::new(FileStore::at(dir.path()));
        bridge.write(&["f".into(), "e".into(), "d".into(), "c".into(), "b".into()]);

        // Fresh store over the same directory, as after a process restart.
        let mut reopened = HistoryBridge::new(FileStore::at(dir.path()));
        let reloaded = reopened.load();
        assert_eq!(reloaded.entries(), ["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn file_store_corrupt_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{HISTORY_KEY}.json")), "][").unwrap();

        let mut bridge = HistoryBridge::new(FileStore::at(dir.path()));
        assert!(bridge.load().is_empty());
    }
}
