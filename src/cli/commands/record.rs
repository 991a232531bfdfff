//! Record-and-classify and file analysis commands.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use crate::capture::{AudioClip, load_clip};
use crate::error::Error;
use crate::session::ProfileId;
use crate::ui;

use super::input::stdin_lines;
use super::{Context, LiveAssistant, exit_with};

/// Why a recording ended.
#[derive(Debug, PartialEq, Eq)]
enum StopReason {
    Enter,
    Limit,
}

/// Record from the microphone, then classify
pub fn cmd_record(
    rt: &Runtime,
    ctx: &Context,
    seconds: Option<u64>,
    profile: Option<&str>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let mut assistant = ctx.assistant()?;
        select_override(&mut assistant, profile);

        let limit = ctx.config.max_capture_duration();
        let target = seconds
            .map(|s| Duration::from_secs(s.max(1)).min(limit))
            .unwrap_or(limit);

        if let Err(e) = assistant.start_recording() {
            exit_with(&e);
        }
        if seconds.is_some() {
            println!("Listening for {}...", ui::format_elapsed(target));
        } else {
            println!(
                "Listening... press Enter to stop (stops by itself after {}).",
                ui::format_elapsed(target)
            );
        }

        let mut lines = seconds.is_none().then(stdin_lines);
        let reason = wait_for_stop(&mut lines, target, || assistant.capture().elapsed()).await;
        tracing::debug!("Recording stopped: {:?}", reason);
        println!();

        let clip = match assistant.stop_recording() {
            Ok(Some(clip)) => clip,
            Ok(None) => return Ok(()),
            Err(e) => exit_with(&e),
        };
        classify_and_print(&mut assistant, clip).await;
        Ok(())
    })
}

/// Show the running time until Enter is pressed or `target` is reached.
///
/// With no line source (or once it hits EOF) only the time limit applies.
async fn wait_for_stop(
    lines: &mut Option<UnboundedReceiver<String>>,
    target: Duration,
    elapsed: impl Fn() -> Duration,
) -> StopReason {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = next_line(lines) => match line {
                Some(_) => return StopReason::Enter,
                // No terminal attached; rely on the time limit
                None => *lines = None,
            },
            _ = ticker.tick() => {
                let elapsed = elapsed();
                print!("\r{}", ui::render_recording_status(elapsed, target));
                let _ = std::io::stdout().flush();
                if elapsed >= target {
                    return StopReason::Limit;
                }
            }
        }
    }
}

async fn next_line(lines: &mut Option<UnboundedReceiver<String>>) -> Option<String> {
    match lines {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Classify an existing audio file
pub fn cmd_analyze(
    rt: &Runtime,
    ctx: &Context,
    path: &Path,
    profile: Option<&str>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let mut assistant = ctx.assistant()?;
        select_override(&mut assistant, profile);

        let clip = match load_clip(path) {
            Ok(clip) => clip,
            Err(e) => exit_with(&Error::from(e)),
        };
        println!("Analysing {:?}", path);
        classify_and_print(&mut assistant, clip).await;
        Ok(())
    })
}

/// `--profile` selects (and remembers) the profile before recording.
fn select_override(assistant: &mut LiveAssistant, profile: Option<&str>) {
    if let Some(id) = profile {
        if let Err(e) = assistant.select_profile(&ProfileId::from(id)) {
            exit_with(&e);
        }
    }
}

async fn classify_and_print(assistant: &mut LiveAssistant, clip: AudioClip) {
    println!(
        "Analysing {} of audio ({} KB)...",
        ui::format_elapsed(clip.duration),
        clip.len() / 1024
    );
    match assistant.analyze(clip).await {
        Ok(entry) => {
            println!();
            print!("{}", ui::render_result(&entry.result));
        }
        Err(e) => exit_with(&e),
    }
}
