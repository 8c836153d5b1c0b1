//! JSON-file settings store.
//!
//! Lives in the platform config directory:
//!   macOS:   ~/Library/Application Support/screen-lens/config.json
//!   Linux:   ~/.config/screen-lens/config.json
//!   Windows: %APPDATA%/screen-lens/config.json

use super::document::Document;
use super::{Settings, SettingsStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Document>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or unparsable file is
    /// also treated as empty (and logged) so a corrupt config never keeps the
    /// app from starting; the next save overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => Document::from_json(&contents).unwrap_or_else(|e| {
                log::warn!("[SETTINGS] Ignoring unparsable {}: {}", path.display(), e);
                Document::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("[SETTINGS] No settings at {} yet", path.display());
                Document::default()
            }
            Err(e) => {
                log::warn!("[SETTINGS] Failed to read {}: {}", path.display(), e);
                Document::default()
            }
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// Applies `apply` to a copy of the document and commits the copy only
    /// once it is on disk, so a failed write leaves memory untouched.
    fn update(&self, apply: impl FnOnce(&mut Document) -> Result<(), StoreError>) -> Result<(), StoreError> {
        let mut guard = self.data.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = guard.clone();
        apply(&mut next)?;
        write_atomically(&self.path, &next.to_json()?)?;
        *guard = next;
        Ok(())
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
fn write_atomically(path: &Path, contents: &str) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io_err(e)
    })
}

impl SettingsStore for JsonFileStore {
    fn settings(&self) -> Result<Settings, StoreError> {
        self.data.read().map_err(|_| StoreError::Poisoned)?.settings()
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.update(|doc| doc.set_settings(settings))?;
        log::info!(
            "[SETTINGS] Saved (model={:?}, api key {} chars, custom prompt: {})",
            settings.model,
            settings.api_key.as_deref().map_or(0, str::len),
            settings.prompt.is_some()
        );
        Ok(())
    }

    fn preference(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.data.read().map_err(|_| StoreError::Poisoned)?.get(key))
    }

    fn set_preference(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.update(|doc| {
            doc.set(key, value);
            Ok(())
        })
    }
}
