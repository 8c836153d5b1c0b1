//! System tray setup and click handler.
//!
//! The tray mirrors the hotkey: left-click analyzes the screen. The menu
//! also opens the settings window.

use tauri::{
    image::Image as TauriImage,
    menu::{MenuBuilder, MenuItemBuilder},
    tray::TrayIconBuilder,
    AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
};

/// Label of the settings window declared in `tauri.conf.json`.
pub const SETTINGS_WINDOW: &str = "main";

/// Whether a close request on `label` should hide the window instead of
/// destroying it. The settings window outlives its close button; overlay
/// windows do not.
pub fn hides_on_close(label: &str) -> bool {
    label == SETTINGS_WINDOW
}

/// Sets up the system tray icon with a click handler.
///
/// Left-click: runs one capture/analyze cycle.
/// Right-click: menu with Analyze Screen, Settings and Quit.
pub fn setup_tray(app: &AppHandle, shortcut: &str) -> Result<(), Box<dyn std::error::Error>> {
    let analyze_item = MenuItemBuilder::with_id("analyze", "Analyze Screen").build(app)?;
    let settings_item = MenuItemBuilder::with_id("settings", "Settings").build(app)?;
    let quit_item = MenuItemBuilder::with_id("quit", "Quit Screen Lens").build(app)?;
    let menu = MenuBuilder::new(app)
        .item(&analyze_item)
        .item(&settings_item)
        .separator()
        .item(&quit_item)
        .build()?;

    // Decode the PNG icon to RGBA for Tauri's Image type
    let icon_bytes = include_bytes!("../icons/32x32.png");
    let icon_img = image::load_from_memory(icon_bytes)
        .map_err(|e| format!("Failed to decode tray icon: {}", e))?;
    let rgba = icon_img.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());
    let tray_icon = TauriImage::new_owned(rgba.into_raw(), w, h);

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .tooltip(format!("Screen Lens — {} to analyze", shortcut))
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_tray_icon_event(|tray_icon, event| {
            if let tauri::tray::TrayIconEvent::Click {
                button: tauri::tray::MouseButton::Left,
                button_state: tauri::tray::MouseButtonState::Up,
                ..
            } = event
            {
                log::info!("Tray icon clicked — starting capture");
                crate::hotkey::trigger_capture(tray_icon.app_handle());
            }
        })
        .on_menu_event(|app, event| match event.id().as_ref() {
            "analyze" => crate::hotkey::trigger_capture(app),
            "settings" => show_settings(app),
            "quit" => {
                log::info!("Quit requested from tray menu");
                app.exit(0);
            }
            _ => {}
        })
        .build(app)?;

    Ok(())
}

fn show_settings(app: &AppHandle) {
    let window = match app.get_webview_window(SETTINGS_WINDOW) {
        Some(window) => window,
        None => match build_settings_window(app) {
            Ok(window) => window,
            Err(e) => {
                log::warn!("Failed to recreate settings window: {}", e);
                return;
            }
        },
    };
    if let Err(e) = window.show().and_then(|_| window.set_focus()) {
        log::warn!("Failed to show settings window: {}", e);
    }
}

fn build_settings_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    log::info!("Settings window is gone, recreating it");
    WebviewWindowBuilder::new(app, SETTINGS_WINDOW, WebviewUrl::App("index.html".into()))
        .title("Screen Lens Settings")
        .inner_size(800.0, 600.0)
        .build()
}
