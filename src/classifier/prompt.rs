//! Fixed instruction text and response schema sent with every clip.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use super::domain::{CryReason, Urgency};
use super::gemini::dto::{Content, GenerateContentRequest, GenerationConfig, Part};
use crate::capture::AudioClip;

/// System instruction describing the task and the five recognized causes.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert in analysing the sound of infant crying.
Your task is to analyse the supplied audio clip and determine the most likely
cause of the crying from its acoustic pattern (pitch, intensity, rhythm, pauses
and tone).

Possible causes:
- hunger: usually a rhythmic cry that starts low and rises.
- sleepiness: intermittent, whiny cry with a soft moaning tone.
- pain: colic or gas; a sudden, sharp and intense scream.
- discomfort: dirty diaper or tight clothing; a low, continuous cry.
- boredom: wanting attention; crying that starts and stops to check for a response.

Answer with JSON only.";

/// Build the per-request user prompt.
pub fn user_prompt(language: &str) -> String {
    format!(
        "Analyse this baby's cry. Use exactly one of the listed cause labels for \
         \"reason\". Write the explanation and three practical tips for the parent \
         in {}. Respond in JSON.",
        language
    )
}

/// Schema the service must constrain its answer to.
pub fn response_schema() -> serde_json::Value {
    let reasons: Vec<&str> = CryReason::RECOGNIZED.iter().map(|r| r.label()).collect();
    let severities: Vec<&str> = Urgency::ALL.iter().map(|u| u.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "reason": {
                "type": "STRING",
                "enum": reasons,
                "description": "Most likely cause of the crying"
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence percentage from 0 to 100"
            },
            "explanation": {
                "type": "STRING",
                "description": "Why this cause was chosen, based on the sound"
            },
            "advice": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "Three practical tips for the parent"
            },
            "severity": {
                "type": "STRING",
                "enum": severities,
                "description": "How urgent the situation is"
            }
        },
        "required": ["reason", "confidence", "explanation", "advice", "severity"]
    })
}

/// Assemble the full request for one clip.
pub fn build_request(clip: &AudioClip, language: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(SYSTEM_INSTRUCTION)],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::inline(&clip.mime_type, STANDARD.encode(&clip.bytes)),
                Part::text(user_prompt(language)),
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}
