//! Key-value store abstraction over player-preferences style storage
//!
//! The session only needs typed get/set plus an explicit `save` flush. The
//! in-memory implementation backs tests and the demo; the file store keeps
//! a flat JSON string map on disk and degrades to empty on any read
//! problem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Synchronous local key-value storage. Reads never fail (defaults apply);
/// writes surface only through `save`.
pub trait KeyValueStore {
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&mut self, key: &str, value: i32);
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
    /// Flush pending writes. Failures are logged, not propagated.
    fn save(&mut self);
}

/// Volatile store for tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    save_count: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` was called. Tests use this to pin down flush
    /// points.
    pub fn save_count(&self) -> u32 {
        self.save_count
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) {
        self.save_count += 1;
    }
}

/// Store persisted as a JSON object of strings on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store at `path`. A missing or unreadable file is an empty
    /// store; this is the "no prior data" startup path, not an error.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt store file");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }
}

impl KeyValueStore for FileStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "store serialization failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "store write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stack-tower-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_defaults_and_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("TopScore", 0), 0);
        assert_eq!(store.get_string("BuildJson", ""), "");

        store.set_int("TopScore", 12);
        store.set_string("BuildJson", "[]");
        assert_eq!(store.get_int("TopScore", 0), 12);
        assert_eq!(store.get_string("BuildJson", ""), "[]");
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        store.save();
        store.save();
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_non_numeric_int_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set_string("TopScore", "garbage");
        assert_eq!(store.get_int("TopScore", 7), 7);
    }

    #[test]
    fn test_file_store_round_trips_through_disk() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        {
            let mut store = FileStore::open(&path);
            store.set_int("TopScore", 42);
            store.set_string("BuildJson", "[{}]");
            store.save();
        }

        let store = FileStore::open(&path);
        assert_eq!(store.get_int("TopScore", 0), 42);
        assert_eq!(store.get_string("BuildJson", ""), "[{}]");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let store = FileStore::open(temp_path("does-not-exist"));
        assert_eq!(store.get_int("TopScore", 3), 3);
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{{{{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get_string("BuildJson", "fallback"), "fallback");

        let _ = std::fs::remove_file(&path);
    }
}
