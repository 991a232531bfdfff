//! Recording indicator and interactive help.

use std::time::Duration;

use crate::ui::helpers::format_elapsed;

pub fn render_recording_status(elapsed: Duration, limit: Duration) -> String {
    format!(
        "● Recording {} / {}  (type `stop` to finish)",
        format_elapsed(elapsed),
        format_elapsed(limit)
    )
}

pub fn render_help() -> &'static str {
    "Commands:
  record            start listening
  stop              stop and analyse the recording
  profiles          list profiles (* = active)
  add <name>        add a profile and select it
  select <id>       switch the active profile
  history [all]     results for the active profile, or everyone
  tip               show a new message and tip
  lullabies [n]     list soothing tracks, or show one
  login <phrase>    unlock when a passphrase is configured
  logout            lock again
  help              this list
  quit              leave
"
}
