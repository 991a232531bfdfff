//! NannyAI - a cry-analysis assistant for parents.
//!
//! Records a short clip of a crying infant, asks a multimodal model why the
//! baby is most likely crying, and shows the answer with practical advice.
//! Runs as an interactive terminal session by default, or as one-shot CLI
//! commands.

pub mod app;
pub mod capture;
pub mod classifier;
pub mod cli;
pub mod comfort;
pub mod config;
pub mod error;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so it never mixes with command output)
    let filter = EnvFilter::builder()
        .with_default_directive("nanny_ai=info".parse()?)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    // No command specified, start the interactive session
    cli::run_session(&args)
}
