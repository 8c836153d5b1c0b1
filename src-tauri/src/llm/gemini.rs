//! Google Gemini vision client. One non-streaming `generateContent` call per run.

use super::types::{ErrorEnvelope, GenerateContentRequest};
use super::{AnalysisClient, AnalysisError, AnalysisReply, AnalysisRequest};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::time::{Duration, Instant};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GeminiClient {
    /// Builds a client. `timeout` bounds the whole request, upload included.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Client(e.to_string()))?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

impl AnalysisClient for GeminiClient {
    async fn analyze(&self, request: AnalysisRequest<'_>) -> Result<AnalysisReply, AnalysisError> {
        let AnalysisRequest {
            api_key,
            model,
            prompt,
            image,
        } = request;
        let payload = GenerateContentRequest::prompt_with_image(
            prompt,
            image.encoding.mime_type(),
            STANDARD.encode(&image.bytes),
        );
        drop(image);

        log::info!("[LLM] Provider: gemini");
        log::info!("[LLM] Model: {}", model);

        let start = Instant::now();
        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("[LLM] HTTP request failed: {}", e);
                AnalysisError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] API returned {}: {}", status, body);
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        // Any 2xx body is a reply; shape problems read as "no text".
        let body = response.text().await.map_err(|e| {
            log::error!("[LLM] Reading response body failed: {}", e);
            AnalysisError::Http(e.to_string())
        })?;

        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());
        let reply = AnalysisReply::from_body(&body);
        if reply.text().is_none() {
            log::warn!("[LLM] Response carried no text ({} bytes)", body.len());
        }
        Ok(reply)
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().chars().take(300).collect(),
    }
}
