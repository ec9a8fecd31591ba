//! Key-value storage with an in-memory fallback
//!
//! Browsers can refuse LocalStorage (private mode, quota, disabled cookies).
//! `StorageHandle` never surfaces those failures: once a backend call fails,
//! the value goes to (or comes from) a session-local map instead.

use std::collections::HashMap;

use crate::error::StorageError;
use crate::persistence::Outcome;

/// A persistent string store (LocalStorage on web)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Plain in-memory store, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend for when no persistent storage exists at all
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Storage that degrades to memory instead of failing
#[derive(Debug)]
pub struct StorageHandle<S> {
    backend: S,
    /// Created on the first backend failure, lives for the session
    fallback: Option<HashMap<String, String>>,
}

impl<S: KeyValueStore> StorageHandle<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            fallback: None,
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Whether any call has fallen back to memory so far
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    /// Read a key, reporting whether the fallback map answered.
    /// A key held in the fallback map is newer than anything the backend has.
    pub fn read(&self, key: &str) -> Outcome<Option<String>> {
        if let Some(value) = self.fallback.as_ref().and_then(|m| m.get(key)) {
            return Outcome::Fallback(Some(value.clone()));
        }
        match self.backend.get_item(key) {
            Ok(value) => Outcome::Persisted(value),
            Err(e) => {
                log::warn!("Storage read of '{}' failed ({}), using memory", key, e);
                Outcome::Fallback(None)
            }
        }
    }

    /// Write a key, reporting whether the fallback map took it
    pub fn write(&mut self, key: &str, value: &str) -> Outcome<()> {
        match self.backend.set_item(key, value) {
            Ok(()) => {
                // Backend is current again for this key
                if let Some(map) = self.fallback.as_mut() {
                    map.remove(key);
                }
                Outcome::Persisted(())
            }
            Err(e) => {
                log::warn!("Storage write of '{}' failed ({}), using memory", key, e);
                self.fallback
                    .get_or_insert_with(HashMap::new)
                    .insert(key.to_string(), value.to_string());
                Outcome::Fallback(())
            }
        }
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.read(key).into_inner()
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.write(key, value).into_inner()
    }
}
