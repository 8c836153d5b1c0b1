//! Capture → analyze → present, once per hotkey press.
//!
//! One run at a time: a trigger that arrives while a run is in flight is
//! dropped. Every failure ends the current run only; the pipeline stays
//! armed for the next press.

mod dialog;
mod error;
mod guards;

pub use dialog::DialogNotifier;
pub use error::{FailureKind, FailureNotifier, PipelineError};
pub use guards::{BusyGuard, LoadingGuard};

use crate::capture::Capturer;
use crate::llm::{AnalysisClient, AnalysisRequest, NO_TEXT_PLACEHOLDER};
use crate::overlay::{self, SharedOverlay};
use crate::settings::SettingsStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// How one trigger ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A result reached the overlay. `placeholder` is set when the model
    /// returned no text and the fixed placeholder was shown instead.
    Presented { placeholder: bool },
    /// Another run was in flight; nothing happened.
    Skipped,
    Failed(FailureKind),
}

pub struct CapturePipeline<C, A> {
    store: Arc<dyn SettingsStore>,
    capturer: C,
    client: A,
    overlay: SharedOverlay,
    notifier: Arc<dyn FailureNotifier>,
    busy: AtomicBool,
}

impl<C: Capturer, A: AnalysisClient> CapturePipeline<C, A> {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        capturer: C,
        client: A,
        overlay: SharedOverlay,
        notifier: Arc<dyn FailureNotifier>,
    ) -> Self {
        Self {
            store,
            capturer,
            client,
            overlay,
            notifier,
            busy: AtomicBool::new(false),
        }
    }

    /// Runs the pipeline once, unless a run is already in flight.
    pub async fn trigger(&self) -> RunOutcome {
        let Some(_busy) = BusyGuard::try_acquire(&self.busy) else {
            log::info!("[PIPELINE] Run already in progress, ignoring trigger");
            return RunOutcome::Skipped;
        };

        let start = Instant::now();
        match self.run().await {
            Ok(placeholder) => {
                log::info!("[PIPELINE] Run complete in {}ms", start.elapsed().as_millis());
                RunOutcome::Presented { placeholder }
            }
            Err(e) => {
                log::error!("[PIPELINE] Run failed after {}ms: {}", start.elapsed().as_millis(), e);
                self.notifier.notify(&e);
                RunOutcome::Failed(e.kind())
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Returns whether the placeholder text was shown.
    async fn run(&self) -> Result<bool, PipelineError> {
        let settings = self.store.settings()?;
        let credentials = settings
            .credentials()
            .ok_or(PipelineError::ConfigurationMissing)?;

        // Released on every exit below, after the result is presented.
        let _loading = LoadingGuard::engage(&self.overlay);

        log::info!("[PIPELINE] Capturing screen...");
        let image = self.capturer.capture().await?;

        let prompt = settings.effective_prompt();
        log::info!("[PIPELINE] Sending {} bytes to {}", image.bytes.len(), credentials.model);
        let reply = self
            .client
            .analyze(AnalysisRequest {
                api_key: credentials.api_key,
                model: credentials.model,
                prompt,
                image,
            })
            .await?;

        let (text, placeholder) = match reply.text() {
            Some(text) => (text, false),
            None => {
                log::warn!("[PIPELINE] Response had no text part, showing placeholder: {:?}", reply);
                (NO_TEXT_PLACEHOLDER, true)
            }
        };

        overlay::lock(&self.overlay).present(text)?;
        Ok(placeholder)
    }
}
