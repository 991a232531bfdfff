//! View rendering functions.
//!
//! Organized by surface:
//! - `result`: the latest classification
//! - `history`: past classifications across profiles
//! - `profiles`: the profile switcher
//! - `comfort`: lullaby catalog and rotating inspiration
//! - `status`: recording indicator and session help

mod comfort;
mod history;
mod profiles;
mod result;
mod status;

pub use comfort::{render_inspiration, render_lullabies, render_track};
pub use history::render_history;
pub use profiles::render_profiles;
pub use result::render_result;
pub use status::{render_help, render_recording_status};
