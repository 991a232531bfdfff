//! History list, most recent first.

use std::fmt::Write;

use crate::session::{HistoryEntry, ProfileId, SessionState};
use crate::ui::helpers::{format_elapsed, format_timestamp, urgency_tag};

/// Render the history, optionally limited to one profile.
pub fn render_history(session: &SessionState, profile: Option<&ProfileId>) -> String {
    let entries: Vec<&HistoryEntry> = match profile {
        Some(id) => session.history_for(id).collect(),
        None => session.history().collect(),
    };

    if entries.is_empty() {
        return "No analyses yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let name = session
            .profile(&entry.profile_id)
            .map(|p| p.name.as_str())
            .unwrap_or("(removed)");
        let _ = writeln!(
            out,
            "{}  {:<12} {} ({:.0}%) {}  [{}]",
            format_timestamp(entry.captured_at),
            name,
            entry.result.reason.display_name(),
            entry.result.confidence,
            urgency_tag(entry.result.urgency),
            format_elapsed(entry.duration),
        );
    }
    out
}
