//! Run failures and how they are shown to the user.

use crate::capture::CaptureError;
use crate::llm::AnalysisError;
use crate::overlay::OverlayError;
use crate::settings::StoreError;

/// User-facing failure category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ConfigurationMissing,
    CaptureUnavailable,
    AnalysisFailed,
    PresentationFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Please set the API key and select a model in the settings.")]
    ConfigurationMissing,

    #[error("Settings could not be read: {0}")]
    Settings(#[from] StoreError),

    #[error("Failed to capture the screen: {0}")]
    CaptureUnavailable(#[from] CaptureError),

    #[error("Failed to analyze screenshot: {0}")]
    AnalysisFailed(#[from] AnalysisError),

    #[error("Failed to show the result: {0}")]
    Presentation(#[from] OverlayError),
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::ConfigurationMissing | PipelineError::Settings(_) => {
                FailureKind::ConfigurationMissing
            }
            PipelineError::CaptureUnavailable(_) => FailureKind::CaptureUnavailable,
            PipelineError::AnalysisFailed(_) => FailureKind::AnalysisFailed,
            PipelineError::Presentation(_) => FailureKind::PresentationFailed,
        }
    }

    /// Title of the error modal.
    pub fn title(&self) -> &'static str {
        match self.kind() {
            FailureKind::ConfigurationMissing => "Settings Missing",
            _ => "Error",
        }
    }
}

/// Shows a run failure to the user (a modal dialog in the app).
pub trait FailureNotifier: Send + Sync {
    fn notify(&self, failure: &PipelineError);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_matches_settings_prompt() {
        let err = PipelineError::ConfigurationMissing;
        assert_eq!(err.title(), "Settings Missing");
        assert_eq!(
            err.to_string(),
            "Please set the API key and select a model in the settings."
        );
    }

    #[test]
    fn analysis_failure_carries_underlying_message() {
        let err = PipelineError::from(AnalysisError::Http("connection refused".into()));
        assert_eq!(err.kind(), FailureKind::AnalysisFailed);
        assert_eq!(err.title(), "Error");
        assert_eq!(
            err.to_string(),
            "Failed to analyze screenshot: HTTP request failed: connection refused"
        );
    }

    #[test]
    fn capture_failure_kind() {
        let err = PipelineError::from(CaptureError::NoMonitor);
        assert_eq!(err.kind(), FailureKind::CaptureUnavailable);
    }
}
