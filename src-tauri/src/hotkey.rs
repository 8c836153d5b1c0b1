//! The global capture hotkey.

use crate::state::AppState;
use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

/// Registers `chord` (e.g. `Control+M`) to trigger a capture on key press.
pub fn register_capture_shortcut(app: &AppHandle, chord: &str) -> Result<(), Box<dyn std::error::Error>> {
    app.global_shortcut()
        .on_shortcut(chord, |app, _shortcut, event| {
            if event.state() == ShortcutState::Pressed {
                log::info!("[HOTKEY] Capture shortcut triggered");
                trigger_capture(app);
            }
        })?;
    log::info!("[HOTKEY] Global shortcut registered: {}", chord);
    Ok(())
}

/// Starts a pipeline run on the async runtime. Returns immediately.
pub fn trigger_capture(app: &AppHandle) {
    let pipeline = app.state::<AppState>().pipeline.clone();
    tauri::async_runtime::spawn(async move {
        let outcome = pipeline.trigger().await;
        log::debug!("[HOTKEY] Run outcome: {:?}", outcome);
    });
}

/// Releases every shortcut this process registered.
pub fn release_all(app: &AppHandle) {
    match app.global_shortcut().unregister_all() {
        Ok(()) => log::info!("[HOTKEY] Global shortcuts released"),
        Err(e) => log::warn!("[HOTKEY] Failed to release shortcuts: {}", e),
    }
}
