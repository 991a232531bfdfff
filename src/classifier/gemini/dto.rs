//! Gemini `generateContent` Data Transfer Objects
//!
//! These types match what the Gemini REST API sends and returns.
//! Only the request builder and the adapter touch these; everything else
//! works with the domain types.
//!
//! API Reference: https://ai.google.dev/api/generate-content
//!
//! Example response:
//! ```json
//! {
//!   "candidates": [{
//!     "content": {
//!       "role": "model",
//!       "parts": [{"text": "{\"reason\":\"hunger\",\"confidence\":82, ...}"}]
//!     },
//!     "finishReason": "STOP"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64 payload embedded directly in the request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    /// OpenAPI-subset schema the answer must follow
    pub response_schema: serde_json::Value,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// The JSON document the model writes into the candidate text.
///
/// Every field is required; a missing one fails deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CryAnalysis {
    pub reason: String,
    pub confidence: f64,
    pub explanation: String,
    pub advice: Vec<String>,
    pub severity: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API sends and returns.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::text("be helpful")],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::inline("audio/wav", "AAAA"), Part::text("go")],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
            },
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be helpful");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "audio/wav"
        );
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["data"], "AAAA");
        assert!(json["contents"][0]["parts"][0].get("text").is_none());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_parse_success_response() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"reason\": \"hunger\"}"}]
                },
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 120, "totalTokenCount": 180},
            "modelVersion": "gemini-2.5-flash"
        }"#;

        let response: GenerateContentResponse =
            serde_json::from_str(json).expect("Should parse response");

        assert_eq!(response.candidates.len(), 1);
        let candidate = &response.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        let parts = &candidate.content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text.as_deref(), Some("{\"reason\": \"hunger\"}"));
    }

    #[test]
    fn test_parse_blocked_response() {
        let json = r#"{
            "promptFeedback": {"blockReason": "SAFETY"}
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

        assert!(response.candidates.is_empty());
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_analysis_requires_every_field() {
        let missing_severity = r#"{
            "reason": "hunger",
            "confidence": 82,
            "explanation": "rhythmic",
            "advice": ["feed"]
        }"#;
        assert!(serde_json::from_str::<CryAnalysis>(missing_severity).is_err());

        let string_confidence = r#"{
            "reason": "hunger",
            "confidence": "very",
            "explanation": "rhythmic",
            "advice": ["feed"],
            "severity": "low"
        }"#;
        assert!(serde_json::from_str::<CryAnalysis>(string_confidence).is_err());
    }
}
