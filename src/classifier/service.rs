//! Classification gateway - one clip in, one judgment out.
//!
//! The gateway is stateless: no caching, no deduplication, no thresholding.
//! The answer is handed back exactly as the adapter produced it. By default
//! exactly one request is made per clip; `max_attempts` allows a bounded
//! number of extra tries for transport failures only.

use std::time::Duration;

use crate::capture::AudioClip;
use crate::classifier::{
    domain::{ClassificationError, ClassificationResult},
    gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient},
    traits::ClassifierApi,
};

/// Configuration for the classification gateway
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Gemini API key (get one at https://aistudio.google.com/apikey)
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Language for explanation and advice text
    pub language: String,
    /// Total tries per clip (1 = no retry)
    pub max_attempts: u32,
    /// HTTP timeout (None = transport default)
    pub timeout: Option<Duration>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "English".to_string(),
            max_attempts: 1,
            timeout: None,
        }
    }
}

/// Issues classification calls through a [`ClassifierApi`].
pub struct ClassificationGateway<C: ClassifierApi = GeminiClient> {
    api: C,
    max_attempts: u32,
}

impl ClassificationGateway<GeminiClient> {
    /// Create a gateway backed by the Gemini client.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassificationError> {
        let client = GeminiClient::new(&config.api_key, &config.model, config.timeout)?
            .with_base_url(&config.base_url)
            .with_language(&config.language);
        Ok(Self::new(client, config.max_attempts))
    }
}

impl<C: ClassifierApi> ClassificationGateway<C> {
    pub fn new(api: C, max_attempts: u32) -> Self {
        Self {
            api,
            max_attempts: max_attempts.max(1),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Classify a clip. The clip is consumed and dropped when the call ends.
    pub async fn classify(
        &self,
        clip: AudioClip,
    ) -> Result<ClassificationResult, ClassificationError> {
        tracing::info!(
            "Classifying {:.1}s clip ({} bytes, {})",
            clip.duration.as_secs_f32(),
            clip.len(),
            clip.mime_type
        );

        let mut attempt = 1;
        loop {
            match self.api.classify(&clip).await {
                Ok(result) => {
                    tracing::info!(
                        "Classified as {} ({:.0}%, urgency {})",
                        result.reason.label(),
                        result.confidence,
                        result.urgency
                    );
                    return Ok(result);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        "Classification attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("Classification failed: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::traits::mocks::MockClassifier;
    use crate::test_utils::{hunger_result, sample_clip};

    #[tokio::test]
    async fn test_success_passes_result_through() {
        let gateway = ClassificationGateway::new(MockClassifier::returning(hunger_result()), 1);

        let result = gateway.classify(sample_clip()).await.unwrap();

        assert_eq!(result, hunger_result());
        assert_eq!(gateway.api().calls(), 1);
    }

    #[tokio::test]
    async fn test_single_try_by_default() {
        let api = MockClassifier::failing(ClassificationError::Transport("reset".into()));
        let gateway = ClassificationGateway::new(api, 1);

        let result = gateway.classify(sample_clip()).await;

        assert!(matches!(result, Err(ClassificationError::Transport(_))));
        assert_eq!(gateway.api().calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let gateway = ClassificationGateway::new(MockClassifier::returning(hunger_result()), 0);
        gateway.classify(sample_clip()).await.unwrap();
        assert_eq!(gateway.api().calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_retried_within_bound() {
        let api = MockClassifier::sequence(vec![
            Err(ClassificationError::Transport("reset".into())),
            Ok(hunger_result()),
        ]);
        let gateway = ClassificationGateway::new(api, 3);

        let result = gateway.classify(sample_clip()).await;

        assert!(result.is_ok());
        assert_eq!(gateway.api().calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let api = MockClassifier::failing(ClassificationError::Transport("down".into()));
        let gateway = ClassificationGateway::new(api, 3);

        let result = gateway.classify(sample_clip()).await;

        assert!(matches!(result, Err(ClassificationError::Transport(_))));
        assert_eq!(gateway.api().calls(), 3);
    }

    #[tokio::test]
    async fn test_schema_error_never_retried() {
        let api = MockClassifier::failing(ClassificationError::Schema("not json".into()));
        let gateway = ClassificationGateway::new(api, 3);

        let result = gateway.classify(sample_clip()).await;

        assert!(matches!(result, Err(ClassificationError::Schema(_))));
        assert_eq!(gateway.api().calls(), 1);
    }
}
