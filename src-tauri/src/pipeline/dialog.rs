//! Error modals through `tauri-plugin-dialog`.

use super::error::{FailureNotifier, PipelineError};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

pub struct DialogNotifier {
    app: AppHandle,
}

impl DialogNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl FailureNotifier for DialogNotifier {
    fn notify(&self, failure: &PipelineError) {
        self.app
            .dialog()
            .message(failure.to_string())
            .title(failure.title())
            .kind(MessageDialogKind::Error)
            .show(|_| {});
    }
}
