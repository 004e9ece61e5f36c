//! Flat string key-value stores.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::StoreResult;

/// A persisted string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                let raw: BTreeMap<String, Value> = serde_json::from_str(&text)?;
                raw.into_iter()
                    .filter_map(|(key, value)| scalar_text(&key, value).map(|v| (key, v)))
                    .collect()
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Hand-edited files may hold numbers or booleans; nested values are dropped.
fn scalar_text(key: &str, value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            warn!(key, "ignoring non-scalar settings value");
            None
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_basics() {
        let mut s = MemoryStore::new().with("a", "1");
        assert_eq!(s.get("a").as_deref(), Some("1"));
        s.set("b", "2").unwrap();
        s.remove("a").unwrap();
        assert!(s.get("a").is_none());
        assert_eq!(s.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut s = JsonFileStore::open(&path).unwrap();
        assert!(s.get("k").is_none());
        s.set("k", "v").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut s = JsonFileStore::open(&path).unwrap();
        s.set("k", "v").unwrap();
        s.remove("k").unwrap();
        assert!(JsonFileStore::open(&path).unwrap().get("k").is_none());
    }

    #[test]
    fn file_store_reads_unquoted_scalars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"maxGuesses": 12, "hintsEnabled": false, "server": "gl", "junk": [1]}"#,
        )
        .unwrap();

        let s = JsonFileStore::open(&path).unwrap();
        assert_eq!(s.get("maxGuesses").as_deref(), Some("12"));
        assert_eq!(s.get("hintsEnabled").as_deref(), Some("false"));
        assert_eq!(s.get("server").as_deref(), Some("gl"));
        assert!(s.get("junk").is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::open(&path).is_err());
    }
}
