//! Tauri command handlers for the settings window and the overlay page.
//!
//! All handlers are async so they run on the async runtime rather than the
//! main thread: the overlay controller may be locked by a pipeline run that
//! is itself waiting on the main thread to create a window.

use crate::overlay::{self, InstanceId, Proportion, WindowStyle};
use crate::settings::Settings;
use crate::state::AppState;
use tauri::{State, WebviewWindow};

/// Tauri command: read the stored settings record.
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    state.store.settings().map_err(|e| e.to_string())
}

/// Tauri command: save the settings record. Blank fields are stored as unset.
#[tauri::command]
pub async fn save_settings(state: State<'_, AppState>, settings: Settings) -> Result<bool, String> {
    state
        .store
        .save_settings(&settings.normalized())
        .map_err(|e| e.to_string())?;
    Ok(true)
}

/// Tauri command: run one capture/analyze cycle, as the hotkey does.
#[tauri::command]
pub async fn analyze_screen(state: State<'_, AppState>) -> Result<(), String> {
    let pipeline = state.pipeline.clone();
    tauri::async_runtime::spawn(async move {
        pipeline.trigger().await;
    });
    Ok(())
}

/// Tauri command: the overlay page has attached its render listener.
#[tauri::command]
pub async fn overlay_ready(window: WebviewWindow, state: State<'_, AppState>) -> Result<(), String> {
    let id = InstanceId::from_label(window.label())
        .ok_or_else(|| format!("'{}' is not an overlay window", window.label()))?;
    overlay::lock(&state.overlay)
        .surface_ready(id)
        .map_err(|e| e.to_string())
}

/// Tauri command: current overlay style, for initializing the controls.
#[tauri::command]
pub async fn get_overlay_style(state: State<'_, AppState>) -> Result<WindowStyle, String> {
    Ok(WindowStyle::from(overlay::lock(&state.overlay).style()))
}

/// Tauri command: transparency slider committed (0–100).
#[tauri::command]
pub async fn set_overlay_opacity(state: State<'_, AppState>, percent: f64) -> Result<(), String> {
    overlay::lock(&state.overlay).set_opacity(Proportion::from_percent(percent).value());
    Ok(())
}

/// Tauri command: text transparency slider committed (0–100).
#[tauri::command]
pub async fn set_overlay_text_transparency(state: State<'_, AppState>, percent: f64) -> Result<(), String> {
    overlay::lock(&state.overlay).set_text_transparency(Proportion::from_percent(percent).value());
    Ok(())
}

/// Tauri command: background colour picker committed (`#rrggbb`).
#[tauri::command]
pub async fn set_overlay_background(state: State<'_, AppState>, color: String) -> Result<(), String> {
    overlay::lock(&state.overlay)
        .set_background_color(&color)
        .map_err(|e| e.to_string())
}

/// Tauri command: text colour picker committed (`#rrggbb`).
#[tauri::command]
pub async fn set_overlay_text_color(state: State<'_, AppState>, color: String) -> Result<(), String> {
    overlay::lock(&state.overlay)
        .set_text_color(&color)
        .map_err(|e| e.to_string())
}

/// Tauri command: close the overlay and discard its conversation.
#[tauri::command]
pub async fn close_overlay(state: State<'_, AppState>) -> Result<(), String> {
    overlay::lock(&state.overlay).close();
    Ok(())
}
