//! In-memory settings store for headless runs and tests.

use super::document::Document;
use super::{Settings, SettingsStore, StoreError};
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a settings record.
    pub fn with_settings(settings: Settings) -> Self {
        let mut doc = Document::default();
        // Serializing a plain record of optional strings cannot fail.
        let _ = doc.set_settings(&settings);
        Self {
            data: RwLock::new(doc),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn settings(&self) -> Result<Settings, StoreError> {
        self.data.read().map_err(|_| StoreError::Poisoned)?.settings()
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .set_settings(settings)
    }

    fn preference(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.data.read().map_err(|_| StoreError::Poisoned)?.get(key))
    }

    fn set_preference(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .set(key, value);
        Ok(())
    }
}
