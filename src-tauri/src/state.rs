//! Application state managed by Tauri.

use crate::capture::ScreenCapturer;
use crate::config::AppConfig;
use crate::llm::GeminiClient;
use crate::overlay::{self, OverlayController, SharedOverlay, WebviewSurface};
use crate::pipeline::{CapturePipeline, DialogNotifier};
use crate::settings::{JsonFileStore, SettingsStore};
use std::sync::Arc;
use tauri::AppHandle;

pub type AppPipeline = CapturePipeline<ScreenCapturer, GeminiClient>;

pub struct AppState {
    pub store: Arc<dyn SettingsStore>,
    pub overlay: SharedOverlay,
    pub pipeline: Arc<AppPipeline>,
}

impl AppState {
    pub fn build(app: &AppHandle, config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store: Arc<dyn SettingsStore> = Arc::new(JsonFileStore::open(config.store_path()));
        log::info!("[SETTINGS] Using {}", config.store_path().display());

        let overlay = overlay::shared(OverlayController::new(
            Box::new(WebviewSurface::new(app.clone())),
            store.clone(),
        ));

        let pipeline = CapturePipeline::new(
            store.clone(),
            ScreenCapturer::new(config.jpeg_quality),
            GeminiClient::new(&config.api_base, config.request_timeout)?,
            overlay.clone(),
            Arc::new(DialogNotifier::new(app.clone())),
        );

        Ok(Self {
            store,
            overlay,
            pipeline: Arc::new(pipeline),
        })
    }
}
