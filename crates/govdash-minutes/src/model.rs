//! Generative-text model boundary
//!
//! [`GenerativeModel`] is the seam; [`GeminiModel`] talks to the Gemini
//! `generateContent` endpoint. One request per call, no retries.

use crate::error::{MinutesError, MinutesResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Text-in, text-out model
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Complete `prompt`
    async fn generate(&self, prompt: &str) -> MinutesResult<String>;
}

/// Connection settings for [`GeminiModel`]
#[derive(Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

// Keeps the key out of logs
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini HTTP client
#[derive(Debug, Clone)]
pub struct GeminiModel {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiModel {
    /// Build a client
    ///
    /// # Errors
    /// Returns [`MinutesError::Http`] if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> MinutesResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> MinutesResult<String> {
        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "requesting completion");
        let response = self
            .client
            .post(self.config.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MinutesError::model(format!("status {status}: {}", body.trim())));
        }
        let payload: GenerateResponse = response.json().await?;
        extract_text(payload)
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text of the first candidate
fn extract_text(payload: GenerateResponse) -> MinutesResult<String> {
    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| MinutesError::model("response has no candidates"))?;
    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(MinutesError::model(format!("empty completion (finish reason: {reason})")));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: Value) -> GenerateResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let config = GeminiConfig::new("k").with_endpoint("http://localhost:9000/v1beta/");
        assert_eq!(
            config.url(),
            "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", GeminiConfig::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn request_body_asks_for_json() {
        let body = request_body("olá");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "olá");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let payload = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(extract_text(payload).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn empty_or_blocked_completion_is_model_error() {
        let err = extract_text(parse(json!({ "candidates": [] }))).unwrap_err();
        assert!(matches!(err, MinutesError::Model(_)));

        let err = extract_text(parse(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .unwrap_err();
        assert_eq!(err.to_string(), "model error: empty completion (finish reason: SAFETY)");
    }
}
