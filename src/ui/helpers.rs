//! Small formatting helpers shared by the views.

use chrono::{DateTime, Local, Utc};
use std::time::Duration;

use crate::classifier::Urgency;

/// Width of the confidence bar in characters.
pub const BAR_WIDTH: usize = 20;

/// Format a duration as `m:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// A fixed-width bar for a 0-100 confidence value.
pub fn confidence_bar(confidence: f32, width: usize) -> String {
    let filled = ((confidence.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn urgency_tag(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => "[low urgency]",
        Urgency::Medium => "[medium urgency]",
        Urgency::High => "[HIGH URGENCY]",
    }
}

/// Timestamps are shown in local time.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
