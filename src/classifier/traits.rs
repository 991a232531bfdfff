//! Trait definition for the classification service.
//!
//! Production code uses [`GeminiClient`](super::gemini::GeminiClient); tests
//! substitute the mocks below.

use async_trait::async_trait;

use super::domain::{ClassificationError, ClassificationResult};
use crate::capture::AudioClip;

/// A remote function from audio to a structured cry judgment.
#[async_trait]
pub trait ClassifierApi: Send + Sync {
    async fn classify(&self, clip: &AudioClip)
    -> Result<ClassificationResult, ClassificationError>;
}

#[async_trait]
impl ClassifierApi for super::gemini::GeminiClient {
    async fn classify(
        &self,
        clip: &AudioClip,
    ) -> Result<ClassificationResult, ClassificationError> {
        self.classify(clip).await
    }
}
