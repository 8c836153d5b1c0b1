//! Process configuration from the environment (and `.env`, via dotenvy).

use crate::llm::DEFAULT_API_BASE;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SHORTCUT: &str = "Control+M";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Global chord that triggers a capture.
    pub shortcut: String,
    pub api_base: String,
    pub request_timeout: Duration,
    pub config_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = Duration::from_secs(parse_or(
            get("SCREEN_LENS_TIMEOUT_SECS"),
            "SCREEN_LENS_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        ));
        let jpeg_quality = parse_or(
            get("SCREEN_LENS_JPEG_QUALITY"),
            "SCREEN_LENS_JPEG_QUALITY",
            DEFAULT_JPEG_QUALITY,
        )
        .clamp(1, 100);

        Self {
            shortcut: get("SCREEN_LENS_SHORTCUT").unwrap_or_else(|| DEFAULT_SHORTCUT.to_string()),
            api_base: get("SCREEN_LENS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
            config_dir: get("SCREEN_LENS_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_config_dir),
            jpeg_quality,
        }
    }

    /// Path of the settings document.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("screen-lens")
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("[CONFIG] {}={:?} is not valid, using {}", key, raw, default);
            default
        }),
    }
}
