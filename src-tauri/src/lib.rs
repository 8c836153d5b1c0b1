//! Screen Lens app shell.
//!
//! This is the app shell that wires together:
//! - Global hotkey + system tray (hotkey.rs, tray.rs)
//! - Capture → analyze → present pipeline (pipeline/)
//! - Screen capture domain (capture/)
//! - Remote vision model (llm/)
//! - Overlay window lifecycle and rendering (overlay/)
//! - Settings persistence (settings/)
//! - Tauri command handlers for frontend communication (commands.rs)

pub mod capture;
mod commands;
pub mod config;
mod hotkey;
pub mod llm;
pub mod overlay;
pub mod pipeline;
pub mod settings;
mod state;
mod tray;

use config::AppConfig;
use state::AppState;
use tauri::{Manager, RunEvent, WindowEvent};

/// Builds and runs the Tauri app. Blocks until exit.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::get_settings,
            commands::save_settings,
            commands::analyze_screen,
            commands::overlay_ready,
            commands::get_overlay_style,
            commands::set_overlay_opacity,
            commands::set_overlay_text_transparency,
            commands::set_overlay_background,
            commands::set_overlay_text_color,
            commands::close_overlay,
        ])
        .on_window_event(|window, event| {
            // Closing settings only hides it so the tray can bring it back.
            if let WindowEvent::CloseRequested { api, .. } = event {
                if tray::hides_on_close(window.label()) {
                    api.prevent_close();
                    if let Err(e) = window.hide() {
                        log::warn!("Failed to hide settings window: {}", e);
                    }
                }
            }
        })
        .setup(move |app| {
            log::info!("Screen Lens starting up");

            let state = AppState::build(app.handle(), &config)?;
            app.manage(state);

            tray::setup_tray(app.handle(), &config.shortcut)?;

            // The app stays usable from the tray if the chord is taken.
            if let Err(e) = hotkey::register_capture_shortcut(app.handle(), &config.shortcut) {
                log::error!("[HOTKEY] Global shortcut registration failed: {}", e);
            }

            log::info!("Ready — press {} to analyze the screen", config.shortcut);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("Error building Screen Lens");

    app.run(|app, event| {
        if let RunEvent::Exit = event {
            hotkey::release_all(app);
        }
    });
}
