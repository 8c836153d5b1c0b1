//! Tauri webview host for overlay windows.
//!
//! Each instance is a separate `overlay-<n>` window loading `overlay.html`.
//! The page invokes `overlay_ready` once its listener is attached and then
//! receives [`RenderCommand`]s on the `overlay-render` event.

use super::style::StyleState;
use super::surface::{InstanceId, OverlaySurface, RenderCommand, SurfaceError};
use crate::state::AppState;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent};

pub const RENDER_EVENT: &str = "overlay-render";

/// How long a new page gets to invoke `overlay_ready` before the window is
/// shown regardless.
const READY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WebviewSurface {
    app: AppHandle,
}

impl WebviewSurface {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn window(&self, id: InstanceId) -> Result<WebviewWindow, SurfaceError> {
        self.app
            .get_webview_window(&id.label())
            .ok_or(SurfaceError::Missing(id))
    }
}

impl OverlaySurface for WebviewSurface {
    fn open(&mut self, id: InstanceId, style: &StyleState) -> Result<(), SurfaceError> {
        log::info!(
            "[OVERLAY] Creating window {} (opacity {}%)",
            id,
            style.window_opacity.percent()
        );

        let window = WebviewWindowBuilder::new(&self.app, id.label(), WebviewUrl::App("overlay.html".into()))
            .title("Analysis Result")
            .inner_size(500.0, 400.0)
            .always_on_top(true)
            .transparent(true)
            .visible(false)
            .build()
            .map_err(|e| SurfaceError::Open(e.to_string()))?;

        // Window events arrive on the main thread; hop to the async runtime
        // before taking the controller lock.
        let app = self.app.clone();
        window.on_window_event(move |event| {
            if let WindowEvent::Destroyed = event {
                let app = app.clone();
                tauri::async_runtime::spawn(async move {
                    let state = app.state::<AppState>();
                    super::lock(&state.overlay).surface_closed(id);
                });
            }
        });

        let app = self.app.clone();
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(READY_TIMEOUT).await;
            let state = app.state::<AppState>();
            super::lock(&state.overlay).reveal_if_stalled(id);
        });

        Ok(())
    }

    fn reveal(&mut self, id: InstanceId) -> Result<(), SurfaceError> {
        let window = self.window(id)?;
        let delivery = |e: tauri::Error| SurfaceError::Delivery {
            id,
            reason: e.to_string(),
        };
        window.show().map_err(delivery)?;
        window.set_focus().map_err(delivery)
    }

    fn render(&mut self, id: InstanceId, command: &RenderCommand) -> Result<(), SurfaceError> {
        self.app
            .emit_to(id.label().as_str(), RENDER_EVENT, command)
            .map_err(|e| SurfaceError::Delivery {
                id,
                reason: e.to_string(),
            })
    }

    fn destroy(&mut self, id: InstanceId) -> Result<(), SurfaceError> {
        self.window(id)?.destroy().map_err(|e| SurfaceError::Delivery {
            id,
            reason: e.to_string(),
        })
    }
}
