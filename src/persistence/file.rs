//! JSON-file store for native builds
//!
//! The whole file is one JSON object of string values. It is re-read on
//! every `get` and rewritten (via a temp file and rename) on every `set`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;

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

    fn read_all(&self) -> BTreeMap<String, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::debug!("No store at {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring corrupt store {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());

        let json = match serde_json::to_string_pretty(&entries) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode store: {}", e);
                return false;
            }
        };
        let tmp = self.path.with_extension("tmp");
        match fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {}: {}", self.path.display(), e);
                false
            }
        }
    }
}
