//! Overlay domain: the single floating result window.
//!
//! - style.rs: StyleState, colours, proportions, persisted keys
//! - rich_text.rs: fenced-code segmentation of model output
//! - language.rs: keyword language guess for untagged blocks
//! - renderer.rs: conversation log + retroactive restyle
//! - surface.rs: port to the window system + render commands
//! - controller.rs: window lifecycle state machine
//! - webview.rs: Tauri webview implementation of the surface

mod controller;
mod language;
mod renderer;
mod rich_text;
mod style;
mod surface;
mod webview;

pub use controller::{OverlayController, OverlayError, OverlayWindowState, Phase};
pub use language::{infer_language, PLAIN_TEXT};
pub use renderer::{Message, MessageView, OverlayRenderer};
pub use rich_text::{RichText, Segment};
pub use style::{ColorError, Paint, Proportion, Rgb, StyleField, StyleState, WindowStyle};
pub use surface::{InstanceId, OverlaySurface, RenderCommand, SurfaceError};
pub use webview::WebviewSurface;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The one overlay controller, shared by the pipeline and the UI commands.
/// Every overlay mutation goes through it.
pub type SharedOverlay = Arc<Mutex<OverlayController>>;

pub fn shared(controller: OverlayController) -> SharedOverlay {
    Arc::new(Mutex::new(controller))
}

/// Locks the controller. A panic while holding the lock cannot leave the
/// controller half-updated in a way later calls can't recover from, so
/// poisoning is ignored.
pub fn lock(overlay: &SharedOverlay) -> MutexGuard<'_, OverlayController> {
    overlay.lock().unwrap_or_else(PoisonError::into_inner)
}
