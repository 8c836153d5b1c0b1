//! The port between the overlay controller and whatever draws the window.

use super::renderer::MessageView;
use super::style::{StyleState, WindowStyle};
use serde::Serialize;
use std::fmt;

const LABEL_PREFIX: &str = "overlay-";

/// Identity of one overlay window instance. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Window label for this instance (`overlay-<n>`).
    pub fn label(self) -> String {
        format!("{}{}", LABEL_PREFIX, self.0)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        label.strip_prefix(LABEL_PREFIX)?.parse().ok().map(Self)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the overlay page should do next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderCommand {
    /// Add one message at the bottom of the log.
    Append {
        message: MessageView,
        scroll_into_view: bool,
    },
    /// Repaint the window and every message. Always carries the whole log
    /// so a style change lands on all messages at once.
    Restyle {
        window: WindowStyle,
        messages: Vec<MessageView>,
    },
    Loading { active: bool },
    /// Full state for a page that just became ready.
    Replay {
        window: WindowStyle,
        messages: Vec<MessageView>,
        loading: bool,
    },
}

/// A window system able to host overlay instances.
///
/// `open` may return before the page can receive commands; the host reports
/// readiness back through `OverlayController::surface_ready`.
pub trait OverlaySurface: Send {
    fn open(&mut self, id: InstanceId, style: &StyleState) -> Result<(), SurfaceError>;

    /// Make visible and bring to front.
    fn reveal(&mut self, id: InstanceId) -> Result<(), SurfaceError>;

    fn render(&mut self, id: InstanceId, command: &RenderCommand) -> Result<(), SurfaceError>;

    fn destroy(&mut self, id: InstanceId) -> Result<(), SurfaceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to open overlay window: {0}")]
    Open(String),

    #[error("Overlay window {0} no longer exists")]
    Missing(InstanceId),

    #[error("Overlay window {id} rejected an update: {reason}")]
    Delivery { id: InstanceId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips() {
        let id = InstanceId(7);
        assert_eq!(id.label(), "overlay-7");
        assert_eq!(InstanceId::from_label("overlay-7"), Some(id));
        assert_eq!(InstanceId::from_label("main"), None);
        assert_eq!(InstanceId::from_label("overlay-x"), None);
    }

    #[test]
    fn commands_serialize_with_type_tag() {
        let json = serde_json::to_value(RenderCommand::Loading { active: true }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "loading", "active": true}));

        let json = serde_json::to_value(RenderCommand::Restyle {
            window: WindowStyle::from(&StyleState::default()),
            messages: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["type"], "restyle");
        assert_eq!(json["window"]["textColor"], "#f5f5f5");
    }
}
