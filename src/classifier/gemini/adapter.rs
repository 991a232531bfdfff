//! Adapter layer: Convert Gemini DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! Any structural problem with the answer becomes
//! [`ClassificationError::Schema`]; there is no partial result.

use super::dto;
use crate::classifier::domain::{ClassificationError, ClassificationResult, CryReason, Urgency};

/// Number of advice items the prompt asks for.
pub const EXPECTED_ADVICE_COUNT: usize = 3;

/// Convert a raw response body into a classification result.
pub fn to_result(body: &str) -> Result<ClassificationResult, ClassificationError> {
    let response: dto::GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ClassificationError::Schema(format!("response is not valid JSON: {}", e)))?;

    let text = candidate_text(response)?;
    let analysis = parse_analysis(&text)?;
    to_classification(analysis)
}

/// Concatenate the text parts of the first candidate.
pub fn candidate_text(
    response: dto::GenerateContentResponse,
) -> Result<String, ClassificationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(ClassificationError::Schema(format!(
            "request was blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ClassificationError::Schema("response has no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(ClassificationError::Schema(format!(
            "candidate has no text (finish reason: {})",
            finish
        )));
    }

    Ok(text)
}

/// Parse the model's JSON answer.
pub fn parse_analysis(text: &str) -> Result<dto::CryAnalysis, ClassificationError> {
    serde_json::from_str(text.trim())
        .map_err(|e| ClassificationError::Schema(format!("answer does not match schema: {}", e)))
}

/// Validate the answer and convert it into the domain result.
pub fn to_classification(
    analysis: dto::CryAnalysis,
) -> Result<ClassificationResult, ClassificationError> {
    let confidence = analysis.confidence;
    if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
        return Err(ClassificationError::Schema(format!(
            "confidence must be within 0..=100 (got {})",
            confidence
        )));
    }

    let urgency: Urgency = analysis.severity.parse()?;

    let reason = CryReason::from_label(&analysis.reason);
    if reason == CryReason::Unknown {
        tracing::warn!("Unrecognized cry reason label: {:?}", analysis.reason);
    }

    if analysis.advice.len() != EXPECTED_ADVICE_COUNT {
        tracing::warn!(
            "Expected {} advice items, got {}",
            EXPECTED_ADVICE_COUNT,
            analysis.advice.len()
        );
    }

    Ok(ClassificationResult {
        reason,
        confidence: confidence as f32,
        explanation: analysis.explanation,
        advice: analysis.advice,
        urgency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    const HUNGER: &str = r#"{
        "reason": "hunger",
        "confidence": 82,
        "explanation": "rhythmic rising cry",
        "advice": ["feed", "check last feeding time", "check latch"],
        "severity": "medium"
    }"#;

    #[test]
    fn test_convert_successful_response() {
        let result = to_result(&envelope(HUNGER)).unwrap();

        assert_eq!(result.reason, CryReason::Hunger);
        assert_eq!(result.confidence, 82.0);
        assert_eq!(result.explanation, "rhythmic rising cry");
        assert_eq!(
            result.advice,
            vec!["feed", "check last feeding time", "check latch"]
        );
        assert_eq!(result.urgency, Urgency::Medium);
    }

    #[test]
    fn test_text_split_across_parts() {
        let (head, tail) = HUNGER.split_at(40);
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": head}, {"text": tail}]}}]
        })
        .to_string();

        assert_eq!(to_result(&body).unwrap().reason, CryReason::Hunger);
    }

    #[test]
    fn test_non_json_body_is_schema_error() {
        let result = to_result("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(ClassificationError::Schema(_))));
    }

    #[test]
    fn test_malformed_answer_is_schema_error() {
        let result = to_result(&envelope("{\"reason\": \"hunger\", "));
        assert!(matches!(result, Err(ClassificationError::Schema(_))));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let answer = r#"{"reason": "pain", "confidence": 50, "advice": [], "severity": "high"}"#;
        let result = to_result(&envelope(answer));
        assert!(matches!(result, Err(ClassificationError::Schema(msg)) if msg.contains("explanation")));
    }

    #[test]
    fn test_confidence_out_of_range() {
        for bad in ["-1", "100.5", "820"] {
            let answer = HUNGER.replace("82", bad);
            let result = to_result(&envelope(&answer));
            assert!(
                matches!(result, Err(ClassificationError::Schema(_))),
                "confidence {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_confidence_bounds_inclusive() {
        for ok in ["0", "100"] {
            let answer = HUNGER.replace("82", ok);
            assert!(to_result(&envelope(&answer)).is_ok());
        }
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let answer = HUNGER.replace("\"medium\"", "\"critical\"");
        let result = to_result(&envelope(&answer));
        assert!(matches!(result, Err(ClassificationError::Schema(_))));
    }

    #[test]
    fn test_unrecognized_reason_maps_to_unknown() {
        let answer = HUNGER.replace("\"hunger\"", "\"teething\"");
        let result = to_result(&envelope(&answer)).unwrap();
        assert_eq!(result.reason, CryReason::Unknown);
    }

    #[test]
    fn test_short_advice_accepted() {
        let answer = HUNGER.replace(r#""check last feeding time", "check latch""#, "");
        let answer = answer.replace(r#""feed", "#, r#""feed""#);
        let result = to_result(&envelope(&answer)).unwrap();
        assert_eq!(result.advice, vec!["feed"]);
    }

    #[test]
    fn test_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let result = to_result(body);
        assert!(matches!(result, Err(ClassificationError::Schema(msg)) if msg.contains("SAFETY")));
    }

    #[test]
    fn test_empty_candidate_text() {
        let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        let result = to_result(body);
        assert!(matches!(result, Err(ClassificationError::Schema(msg)) if msg.contains("MAX_TOKENS")));
    }
}
