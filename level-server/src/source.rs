//! External level source
//!
//! [`LevelSource`] is the one suspension point of remote generation: it turns a
//! [`LevelRequest`] into raw response text. The production implementation,
//! [`GeminiSource`], calls the Gemini `generateContent` REST endpoint with a
//! structured-output schema. Sources never retry; timeouts come from config.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use level_core::StyleSelection;

use crate::config::GeminiConfig;
use crate::prompt::{build_prompt, response_schema};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed generator response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Generator response contained no text")]
    EmptyResponse,
}

/// One generation request: the selection plus the prompt built from it
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRequest {
    pub selection: StyleSelection,
    pub width: usize,
    pub height: usize,
    pub prompt: String,
}

impl LevelRequest {
    pub fn new(selection: StyleSelection, width: usize, height: usize) -> Self {
        Self {
            selection,
            width,
            height,
            prompt: build_prompt(&selection, width, height),
        }
    }
}

#[async_trait]
pub trait LevelSource: Send + Sync {
    /// Raw response text (expected to be a candidate JSON document)
    async fn request_level(&self, request: &LevelRequest) -> Result<String, SourceError>;
}

// ============================================================================
// Gemini
// ============================================================================

pub struct GeminiSource {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiSource {
    pub fn from_config(config: &GeminiConfig, api_key: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LevelSource for GeminiSource {
    async fn request_level(&self, request: &LevelRequest) -> Result<String, SourceError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        debug!(url = %self.url(), style = %request.selection.style, seed = request.selection.seed, "Requesting level");
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        extract_text(&text)
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// `candidates[0].content.parts[0].text` of a generateContent response body
pub fn extract_text(body: &str) -> Result<String, SourceError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(SourceError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use level_core::LevelStyle;

    #[test]
    fn test_extract_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"map\":[[1]]}"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), r#"{"map":[[1]]}"#);
    }

    #[test]
    fn test_extract_text_empty() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(SourceError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            Err(SourceError::EmptyResponse)
        ));
        assert!(matches!(extract_text(r#"{}"#), Err(SourceError::EmptyResponse)));
        assert!(matches!(extract_text("<html>"), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_gemini_url() {
        let config = GeminiConfig {
            endpoint: "http://localhost:9000/v1beta/".to_string(),
            ..GeminiConfig::default()
        };
        let source = GeminiSource::from_config(&config, "key").unwrap();
        assert_eq!(
            source.url(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_builds_prompt() {
        let request = LevelRequest::new(StyleSelection::new(LevelStyle::Broken, 7), 150, 15);
        assert_eq!((request.width, request.height), (150, 15));
        assert!(request.prompt.contains("Style: Broken"));
    }
}
