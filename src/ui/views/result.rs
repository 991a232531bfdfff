//! The result card shown after each analysis.

use std::fmt::Write;

use crate::classifier::{ClassificationResult, CryReason};
use crate::ui::helpers::{BAR_WIDTH, confidence_bar, urgency_tag};

pub fn render_result(result: &ClassificationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Reason:      {}  {}",
        result.reason.display_name(),
        urgency_tag(result.urgency)
    );
    let _ = writeln!(
        out,
        "Confidence:  {} {:.0}%",
        confidence_bar(result.confidence, BAR_WIDTH),
        result.confidence
    );
    if result.reason == CryReason::Unknown {
        let _ = writeln!(out, "The cause could not be matched to a known pattern.");
    }

    if !result.explanation.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", result.explanation);
    }

    if !result.advice.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "What to try:");
        for (i, tip) in result.advice.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, tip);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Urgency;
    use crate::test_utils::{hunger_result, result_with_reason};

    #[test]
    fn test_result_card_contents() {
        let text = render_result(&hunger_result());

        assert!(text.contains("Hunger"));
        assert!(text.contains("[medium urgency]"));
        assert!(text.contains("82%"));
        assert!(text.contains("rhythmic rising cry"));
        assert!(text.contains("  1. feed"));
        assert!(text.contains("  3. check latch"));
    }

    #[test]
    fn test_unknown_reason_is_explained() {
        let result = ClassificationResult {
            urgency: Urgency::Low,
            ..result_with_reason(CryReason::Unknown)
        };
        let text = render_result(&result);

        assert!(text.contains("Unknown"));
        assert!(text.contains("could not be matched"));
    }

    #[test]
    fn test_empty_advice_omits_section() {
        let result = ClassificationResult {
            advice: Vec::new(),
            ..hunger_result()
        };
        assert!(!render_result(&result).contains("What to try"));
    }
}
