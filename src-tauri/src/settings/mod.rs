//! Persisted configuration record and the store contract.
//!
//! Two surfaces share one store:
//! - the flat `settings` record (API key, model, prompt), written by the settings window
//! - individually keyed overlay preferences (`overlay.*`), written on every style change
//!
//! The pipeline reads `settings` at trigger time; the overlay controller reads
//! and writes the preference keys.

mod document;
mod file_store;
mod memory;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt sent when the user has not configured one.
pub const DEFAULT_PROMPT: &str = "What is in this image?";

/// App-level configuration record, persisted under the `settings` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// API key + model pair, only available when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
}

impl Settings {
    /// Returns the credentials needed for an analysis call, or `None` if
    /// either the API key or the model is missing or blank.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        let api_key = non_blank(self.api_key.as_deref())?;
        let model = non_blank(self.model.as_deref())?;
        Some(Credentials { api_key, model })
    }

    /// The configured prompt, or [`DEFAULT_PROMPT`].
    pub fn effective_prompt(&self) -> &str {
        non_blank(self.prompt.as_deref()).unwrap_or(DEFAULT_PROMPT)
    }

    /// Trims every field and turns blank strings into `None`.
    pub fn normalized(self) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            api_key: clean(self.api_key),
            model: clean(self.model),
            prompt: clean(self.prompt),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Narrow persistence contract used by the pipeline and the overlay.
///
/// Implementations are internally synchronized; all methods take `&self`.
pub trait SettingsStore: Send + Sync {
    /// The stored settings record, or `Settings::default()` if none was saved.
    fn settings(&self) -> Result<Settings, StoreError>;

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;

    /// A single keyed preference value, `None` if unset.
    fn preference(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    fn set_preference(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored settings are malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Settings store lock was poisoned")]
    Poisoned,
}
