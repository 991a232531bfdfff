//! Internal domain models for cry classification.
//!
//! These types are OUR types - they don't change when the model API changes.
//! Responses from the service get converted into these types by the adapter.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Likely cause of the cry, as judged by the classification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CryReason {
    Hunger,
    Sleepiness,
    Pain,
    Discomfort,
    Boredom,
    /// The service answered with a label outside the recognized set
    Unknown,
}

impl CryReason {
    /// The five causes the service is asked to choose between.
    pub const RECOGNIZED: [CryReason; 5] = [
        CryReason::Hunger,
        CryReason::Sleepiness,
        CryReason::Pain,
        CryReason::Discomfort,
        CryReason::Boredom,
    ];

    /// Wire label used in the response schema.
    pub fn label(&self) -> &'static str {
        match self {
            CryReason::Hunger => "hunger",
            CryReason::Sleepiness => "sleepiness",
            CryReason::Pain => "pain",
            CryReason::Discomfort => "discomfort",
            CryReason::Boredom => "boredom",
            CryReason::Unknown => "unknown",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            CryReason::Hunger => "Hunger",
            CryReason::Sleepiness => "Sleepiness",
            CryReason::Pain => "Pain (colic/gas)",
            CryReason::Discomfort => "Discomfort (dirty diaper/tight clothing)",
            CryReason::Boredom => "Boredom / wants attention",
            CryReason::Unknown => "Unknown",
        }
    }

    /// Map a label returned by the service onto a reason.
    ///
    /// Matching is case-insensitive and tolerates the common synonyms models
    /// drift towards. Anything else is [`CryReason::Unknown`].
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        let head = normalized
            .split(|c: char| c == '/' || c == '(' || c == ',')
            .next()
            .unwrap_or("")
            .trim();

        match head {
            "hunger" | "hungry" => CryReason::Hunger,
            "sleepiness" | "sleepy" | "tired" | "tiredness" => CryReason::Sleepiness,
            "pain" | "colic" | "gas" => CryReason::Pain,
            "discomfort" | "uncomfortable" => CryReason::Discomfort,
            "boredom" | "bored" | "attention" | "attention-seeking" => CryReason::Boredom,
            _ => CryReason::Unknown,
        }
    }
}

impl fmt::Display for CryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How urgently the caregiver should respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl FromStr for Urgency {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(ClassificationError::Schema(format!(
                "severity must be one of low, medium, high (got {:?})",
                other
            ))),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A structured judgment about one clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub reason: CryReason,
    /// Confidence percentage, always within [0, 100]
    pub confidence: f32,
    pub explanation: String,
    /// Practical suggestions, normally three
    pub advice: Vec<String>,
    pub urgency: Urgency,
}

/// Errors that can occur while classifying a clip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("No API key configured for the classification service")]
    MissingApiKey,

    /// The call did not complete (connection, HTTP status, unreadable body)
    #[error("Classification request failed: {0}")]
    Transport(String),

    /// The service answered, but not with the required structure
    #[error("Unexpected classification response: {0}")]
    Schema(String),
}

impl ClassificationError {
    /// Only failures of the call itself are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassificationError::Transport(_))
    }
}
