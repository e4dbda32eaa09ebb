//! External configuration collaborators.
//!
//! A store is consulted only for fields declaring a config key; the storage
//! format itself stays out of scope beyond the file-backed loader.

pub mod loader;

pub use loader::FileStore;

use crate::value::Value;
use std::collections::HashMap;

/// Key-value lookup consulted between caller overrides and declared defaults.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<Value>;
}

/// Map-backed store for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }
}
