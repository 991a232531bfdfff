//! Gemini HTTP client
//!
//! Sends one `generateContent` request per clip.
//! See: https://ai.google.dev/api/generate-content
//!
//! ## Notes
//!
//! - The API key travels in the `x-goog-api-key` header rather than the
//!   `?key=` query parameter so it never ends up in logged URLs.
//! - The model name is a path segment and is URL-encoded.
//! - No timeout is set unless one is configured; the transport default applies.

use std::time::Duration;

use super::adapter;
use crate::capture::AudioClip;
use crate::classifier::domain::{ClassificationError, ClassificationResult};
use crate::classifier::prompt;

/// Production endpoint for the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    language: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the given key and model.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClassificationError> {
        let mut builder = reqwest::Client::builder().gzip(true).user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ClassificationError::Transport(format!("HTTP client setup: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            language: "English".to_string(),
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Language for the explanation and advice text.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Classify one clip.
    pub async fn classify(
        &self,
        clip: &AudioClip,
    ) -> Result<ClassificationResult, ClassificationError> {
        if self.api_key.trim().is_empty() {
            return Err(ClassificationError::MissingApiKey);
        }

        let body = self.send_request(clip).await?;
        adapter::to_result(&body)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }

    /// Send the HTTP request and return the raw response body.
    async fn send_request(&self, clip: &AudioClip) -> Result<String, ClassificationError> {
        let request = prompt::build_request(clip, &self.language);
        let url = self.endpoint();

        tracing::debug!(
            "POST {} ({} bytes of {})",
            url,
            clip.len(),
            clip.mime_type
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassificationError::Transport(format!(
                "HTTP {}: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ClassificationError::Transport(format!("Failed to read body: {}", e)))
    }
}
