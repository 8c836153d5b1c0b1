//! The keyed JSON document both store backends hold in memory.

use super::{Settings, StoreError};
use serde_json::{Map, Value};

const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Document {
    entries: Map<String, Value>,
}

impl Document {
    pub(crate) fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    pub(crate) fn settings(&self) -> Result<Settings, StoreError> {
        match self.entries.get(SETTINGS_KEY) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Settings::default()),
        }
    }

    pub(crate) fn set_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings)?;
        self.entries.insert(SETTINGS_KEY.to_string(), value);
        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}
