//! Key-value persistence
//!
//! Backends:
//! - `MemoryStore`: tests and the fallback when nothing durable exists
//! - `FileStore`: JSON file on native builds
//! - `LocalStorageStore`: browser LocalStorage on wasm32
//!
//! Reads and writes are synchronous. Failures are logged and degrade to
//! "absent" / "not written"; nothing here is fatal.

use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns whether the value was durably written
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}
