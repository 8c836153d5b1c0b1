//! Remote vision model behind the [`AnalysisClient`] contract.
//!
//! Providers:
//!   - Google Gemini (gemini.rs)
//!
//! Shared:
//!   - types.rs: request/response wire shapes

mod gemini;
pub mod types;

pub use gemini::{GeminiClient, DEFAULT_API_BASE};

use crate::capture::CapturedImage;
use std::future::Future;

/// Shown when the model answered successfully but without any text.
pub const NO_TEXT_PLACEHOLDER: &str = "No valid text found in response.";

/// Everything one analysis call needs. The image is moved in and dropped
/// once the request body is built.
#[derive(Debug)]
pub struct AnalysisRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub image: CapturedImage,
}

/// Sends `{prompt, image}` to a remote model. A single attempt; timeouts
/// belong to the implementation.
pub trait AnalysisClient: Send + Sync {
    fn analyze(
        &self,
        request: AnalysisRequest<'_>,
    ) -> impl Future<Output = Result<AnalysisReply, AnalysisError>> + Send;
}

/// A successful (2xx) model response, reduced to its first text part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReply {
    text: Option<String>,
}

impl AnalysisReply {
    /// Reads a raw 2xx body. Never fails: a body without usable text is a
    /// reply without text.
    pub fn from_body(body: &str) -> Self {
        Self {
            text: types::first_text(body),
        }
    }

    /// Reply carrying a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            text: Some(text).filter(|t| !t.is_empty()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Request failed with status code {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}
