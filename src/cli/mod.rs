//! Command-line interface for NannyAI.
//!
//! One-shot commands for recording, analysing files and managing profiles,
//! plus an interactive session that keeps the history for as long as it runs.

mod commands;

pub use commands::{Cli, Commands, run_command, run_session};
