//! Overlay window lifecycle. The controller is the only owner of the instance.
//!
//! States: no window → `present` opens one (Opening) → the page reports
//! ready (Ready) → `close` or OS destruction → no window. While a window
//! exists, `present` appends to it; it never opens a second one.

use super::renderer::{Message, OverlayRenderer};
use super::style::{ColorError, Proportion, Rgb, StyleField, StyleState, WindowStyle};
use super::surface::{InstanceId, OverlaySurface, RenderCommand, SurfaceError};
use crate::settings::SettingsStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Window created, page not yet able to receive commands.
    Opening,
    Ready,
}

struct OverlayWindow {
    id: InstanceId,
    phase: Phase,
    visible: bool,
    loading: bool,
    renderer: OverlayRenderer,
}

/// Snapshot of the live overlay instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayWindowState {
    pub id: InstanceId,
    pub phase: Phase,
    pub visible: bool,
    pub loading: bool,
    pub style: StyleState,
    pub message_count: usize,
}

pub struct OverlayController {
    surface: Box<dyn OverlaySurface>,
    store: Arc<dyn SettingsStore>,
    style: StyleState,
    window: Option<OverlayWindow>,
    next_id: u64,
}

impl OverlayController {
    /// Style preferences are loaded from `store` once, here.
    pub fn new(surface: Box<dyn OverlaySurface>, store: Arc<dyn SettingsStore>) -> Self {
        let style = StyleState::from_preferences(store.as_ref());
        Self {
            surface,
            store,
            style,
            window: None,
            next_id: 1,
        }
    }

    /// Shows `text` in the overlay, opening the window if none exists.
    ///
    /// Text presented before the page is ready is kept in the log and
    /// replayed by [`surface_ready`](Self::surface_ready).
    pub fn present(&mut self, text: &str) -> Result<InstanceId, OverlayError> {
        match self.window.as_mut() {
            Some(window) => {
                let message = window.renderer.append(text);
                if window.phase == Phase::Ready {
                    deliver(
                        self.surface.as_mut(),
                        window.id,
                        &RenderCommand::Append {
                            message,
                            scroll_into_view: true,
                        },
                    );
                    reveal(self.surface.as_mut(), window);
                }
                Ok(window.id)
            }
            None => {
                let id = InstanceId(self.next_id);
                self.surface.open(id, &self.style)?;
                self.next_id += 1;

                let mut renderer = OverlayRenderer::new(self.style);
                renderer.append(text);
                self.window = Some(OverlayWindow {
                    id,
                    phase: Phase::Opening,
                    visible: false,
                    loading: false,
                    renderer,
                });
                log::info!("[OVERLAY] Opened overlay window {}", id);
                Ok(id)
            }
        }
    }

    /// The page for `id` can now receive commands: replay the log and show it.
    pub fn surface_ready(&mut self, id: InstanceId) -> Result<(), OverlayError> {
        let window = match self.window.as_mut() {
            Some(window) if window.id == id => window,
            _ => return Err(SurfaceError::Missing(id).into()),
        };
        if window.phase == Phase::Ready {
            log::debug!("[OVERLAY] Window {} reported ready again", id);
        }
        window.phase = Phase::Ready;

        let replay = RenderCommand::Replay {
            window: WindowStyle::from(&self.style),
            messages: window.renderer.views(),
            loading: window.loading,
        };
        self.surface.render(id, &replay)?;
        reveal(self.surface.as_mut(), window);
        log::info!(
            "[OVERLAY] Window {} ready, replayed {} message(s)",
            id,
            window.renderer.messages().len()
        );
        Ok(())
    }

    /// Shows window `id` if its page never reported ready.
    ///
    /// The page still cannot render, but the user gets a window to close.
    /// Returns whether anything was revealed; a ready, already visible or
    /// replaced instance is left alone.
    pub fn reveal_if_stalled(&mut self, id: InstanceId) -> bool {
        let Some(window) = self.window.as_mut() else {
            return false;
        };
        if window.id != id || window.phase == Phase::Ready || window.visible {
            return false;
        }
        log::warn!(
            "[OVERLAY] Window {} never reported ready, showing it anyway ({} message(s) pending)",
            id,
            window.renderer.messages().len()
        );
        reveal(self.surface.as_mut(), window);
        window.visible
    }

    /// Forwards the loading indicator to the window. No-op without a window.
    pub fn set_loading(&mut self, active: bool) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        window.loading = active;
        if window.phase == Phase::Ready {
            deliver(self.surface.as_mut(), window.id, &RenderCommand::Loading { active });
        }
    }

    /// Window opacity in `[0, 1]`; out-of-range values are clamped.
    pub fn set_opacity(&mut self, value: f64) {
        let style = StyleState {
            window_opacity: Proportion::new(value),
            ..self.style
        };
        self.apply_style(style, StyleField::WindowOpacity);
    }

    /// Text alpha in `[0, 1]`; out-of-range values are clamped.
    pub fn set_text_transparency(&mut self, value: f64) {
        let style = StyleState {
            text_transparency: Proportion::new(value),
            ..self.style
        };
        self.apply_style(style, StyleField::TextTransparency);
    }

    pub fn set_background_color(&mut self, color: &str) -> Result<(), OverlayError> {
        let style = StyleState {
            background_color: color.parse::<Rgb>()?,
            ..self.style
        };
        self.apply_style(style, StyleField::BackgroundColor);
        Ok(())
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<(), OverlayError> {
        let style = StyleState {
            text_color: color.parse::<Rgb>()?,
            ..self.style
        };
        self.apply_style(style, StyleField::TextColor);
        Ok(())
    }

    /// Destroys the window and discards its log. No-op without a window.
    pub fn close(&mut self) {
        let Some(window) = self.window.take() else {
            return;
        };
        log::info!(
            "[OVERLAY] Closing window {} ({} message(s) discarded)",
            window.id,
            window.renderer.messages().len()
        );
        if let Err(e) = self.surface.destroy(window.id) {
            log::warn!("[OVERLAY] Destroying window {} failed: {}", window.id, e);
        }
    }

    /// The host destroyed window `id` on its own (user closed it).
    ///
    /// Ignored unless `id` is the live instance, so a late event for an
    /// already-replaced window cannot clear the new one.
    pub fn surface_closed(&mut self, id: InstanceId) {
        if self.window.as_ref().is_some_and(|w| w.id == id) {
            self.window = None;
            log::info!("[OVERLAY] Window {} closed by the user", id);
        }
    }

    pub fn state(&self) -> Option<OverlayWindowState> {
        self.window.as_ref().map(|w| OverlayWindowState {
            id: w.id,
            phase: w.phase,
            visible: w.visible,
            loading: w.loading,
            style: self.style,
            message_count: w.renderer.messages().len(),
        })
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// The live window's conversation log, empty without a window.
    pub fn messages(&self) -> &[Message] {
        match &self.window {
            Some(window) => window.renderer.messages(),
            None => &[],
        }
    }

    fn apply_style(&mut self, style: StyleState, field: StyleField) {
        self.style = style;
        if let Err(e) = style.persist(field, self.store.as_ref()) {
            log::error!("[OVERLAY] Failed to persist {}: {}", field.key(), e);
        }

        let Some(window) = self.window.as_mut() else {
            return;
        };
        let messages = window.renderer.restyle(style);
        if window.phase == Phase::Ready {
            deliver(
                self.surface.as_mut(),
                window.id,
                &RenderCommand::Restyle {
                    window: WindowStyle::from(&style),
                    messages,
                },
            );
        }
    }
}

/// Render failures on a live window are logged, not propagated: the log
/// already holds the state and the next replay or restyle resends it.
fn deliver(surface: &mut dyn OverlaySurface, id: InstanceId, command: &RenderCommand) {
    if let Err(e) = surface.render(id, command) {
        log::warn!("[OVERLAY] {}", e);
    }
}

fn reveal(surface: &mut dyn OverlaySurface, window: &mut OverlayWindow) {
    match surface.reveal(window.id) {
        Ok(()) => window.visible = true,
        Err(e) => log::warn!("[OVERLAY] {}", e),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
