//! Gemini `generateContent` wire types.
//!
//! Request: `contents[0].parts` = one text part + one inline JPEG part.
//! Response: text read from `candidates[0].content.parts[0].text`. Every
//! level may be missing (blocked or empty generations) or malformed; both
//! read as "no text".

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded).
    pub data: String,
}

impl GenerateContentRequest {
    pub fn prompt_with_image(prompt: &str, mime_type: &str, base64_data: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: prompt.to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_data,
                        },
                    },
                ],
            }],
        }
    }
}

/// Text of `candidates[0].content.parts[0].text` in a response body.
///
/// A body that is not JSON, has an unexpected shape at any level, or
/// carries a non-string or empty text yields `None`.
pub fn first_text(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_matches_wire_shape() {
        let req = GenerateContentRequest::prompt_with_image("What is this?", "image/jpeg", "QUJD".into());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        {"text": "What is this?"},
                        {"inlineData": {"mimeType": "image/jpeg", "data": "QUJD"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"A cat."},{"text":"ignored"}],"role":"model"},"finishReason":"STOP"}]}"#;
        assert_eq!(first_text(body).as_deref(), Some("A cat."));
    }

    #[test]
    fn tolerates_malformed_siblings() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"ok"},{"text":42}]},"safetyRatings":"n/a"}]}"#;
        assert_eq!(first_text(body).as_deref(), Some("ok"));
    }

    #[test]
    fn missing_levels_yield_none() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            assert_eq!(first_text(body), None, "body: {}", body);
        }
    }

    #[test]
    fn wrong_shapes_and_non_json_yield_none() {
        for body in [
            r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#,
            r#"{"candidates":{"0":{}}}"#,
            r#"{"candidates":[{"content":{"parts":{"text":"x"}}}]}"#,
            r#"[]"#,
            "",
            "<html>ok</html>",
        ] {
            assert_eq!(first_text(body), None, "body: {:?}", body);
        }
    }
}
