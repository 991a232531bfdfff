//! Terminal presentation for NannyAI.
//!
//! Every view is a pure function from state to a `String`, so the CLI
//! commands and the interactive session print the same text and tests can
//! assert on it directly.

pub mod helpers;
pub mod views;

pub use helpers::{confidence_bar, format_elapsed, format_timestamp, urgency_tag};
pub use views::{
    render_help, render_history, render_inspiration, render_lullabies, render_profiles,
    render_recording_status, render_result, render_track,
};
