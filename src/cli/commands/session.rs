//! Interactive session.
//!
//! Reads commands line by line while a one-second ticker drives the
//! recording counter, the automatic stop at the capture limit and the
//! rotating tips. A submitted recording is classified in the background;
//! its answer is printed whenever it arrives.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

use crate::app::{CompletedAnalysis, PendingAnalysis};
use crate::comfort::{InspirationPanel, lullaby};
use crate::session::ProfileId;
use crate::ui;

use super::input::stdin_lines;
use super::{Context, LiveAssistant, report_error};

/// One parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Empty,
    Record,
    Stop,
    Profiles,
    Add(String),
    Select(String),
    History { all: bool },
    Tip,
    Lullabies(Option<String>),
    Login(String),
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "record" | "r" => Self::Record,
            "stop" | "s" => Self::Stop,
            "profiles" => Self::Profiles,
            "add" => Self::Add(rest.to_string()),
            "select" => Self::Select(rest.to_string()),
            "history" => Self::History { all: rest == "all" },
            "tip" | "tips" => Self::Tip,
            "lullabies" | "lullaby" => {
                Self::Lullabies(Some(rest.to_string()).filter(|r| !r.is_empty()))
            }
            "login" => Self::Login(rest.to_string()),
            "logout" => Self::Logout,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

struct SessionLoop {
    assistant: LiveAssistant,
    panel: InspirationPanel,
    pending: Option<PendingAnalysis>,
    limit: Duration,
    /// Bumped each time a track is shown so embeds reload
    reload_key: u32,
}

/// Run the interactive session
pub fn cmd_session(rt: &Runtime, ctx: &Context) -> anyhow::Result<()> {
    rt.block_on(async {
        let mut state = SessionLoop {
            assistant: ctx.assistant()?,
            panel: InspirationPanel::new(ctx.config.refresh_interval()),
            pending: None,
            limit: ctx.config.max_capture_duration(),
            reload_key: 0,
        };
        state.greet();

        let mut lines = stdin_lines();
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line else { break };
                    if !state.handle_line(&line) {
                        break;
                    }
                }
                done = wait_pending(&mut state.pending) => {
                    state.pending = None;
                    state.on_complete(done);
                }
                _ = ticker.tick() => state.on_tick(),
            }
        }

        state.shutdown();
        Ok(())
    })
}

async fn wait_pending(pending: &mut Option<PendingAnalysis>) -> CompletedAnalysis {
    match pending {
        Some(p) => p.join().await,
        None => std::future::pending().await,
    }
}

impl SessionLoop {
    fn greet(&self) {
        println!("NannyAI - type `help` for commands.");
        if !self.assistant.is_unlocked() {
            println!("Locked. Type `login <passphrase>` to continue.");
        } else {
            match self.assistant.session().active_profile() {
                Some(p) => println!("Recording for {}.", p.name),
                None => println!("Add a profile with `add <name>` to get started."),
            }
        }
        println!();
        print!("{}", ui::render_inspiration(&self.panel));
    }

    /// Returns false when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        match SessionCommand::parse(line) {
            SessionCommand::Empty => {}
            SessionCommand::Record => match self.assistant.start_recording() {
                Ok(()) => println!("Listening... type `stop` when the crying pauses."),
                Err(e) => report_error(&e),
            },
            SessionCommand::Stop => self.stop_and_submit(),
            SessionCommand::Profiles => print!("{}", ui::render_profiles(self.assistant.session())),
            SessionCommand::Add(name) => match self.assistant.add_profile(&name) {
                Ok(id) => println!("✓ Added {} ({}) and made it active", name, id),
                Err(e) => report_error(&e),
            },
            SessionCommand::Select(id) => {
                match self.assistant.select_profile(&ProfileId::new(id)) {
                    Ok(()) => {
                        if let Some(p) = self.assistant.session().active_profile() {
                            println!("✓ Now recording for {}", p.name);
                        }
                    }
                    Err(e) => report_error(&e),
                }
            }
            SessionCommand::History { all } => {
                let session = self.assistant.session();
                let filter = if all { None } else { session.active_profile_id() };
                print!("{}", ui::render_history(session, filter));
            }
            SessionCommand::Tip => {
                self.panel.refresh(Instant::now());
                print!("{}", ui::render_inspiration(&self.panel));
            }
            SessionCommand::Lullabies(None) => print!("{}", ui::render_lullabies()),
            SessionCommand::Lullabies(Some(key)) => match lullaby::find(&key) {
                Some(track) => {
                    self.reload_key = self.reload_key.wrapping_add(1);
                    print!("{}", ui::render_track(track, self.reload_key));
                }
                None => println!("No track {:?}. Type `lullabies` to see the list.", key),
            },
            SessionCommand::Login(passphrase) => match self.assistant.login(&passphrase) {
                Ok(()) => println!("✓ Signed in"),
                Err(e) => report_error(&e),
            },
            SessionCommand::Logout => match self.assistant.logout() {
                Ok(()) => println!("✓ Signed out"),
                Err(e) => report_error(&e),
            },
            SessionCommand::Help => print!("{}", ui::render_help()),
            SessionCommand::Quit => return false,
            SessionCommand::Unknown(word) => {
                println!("Unknown command `{}`. Type `help` for the list.", word)
            }
        }
        true
    }

    fn stop_and_submit(&mut self) {
        let clip = match self.assistant.stop_recording() {
            Ok(Some(clip)) => clip,
            Ok(None) => {
                println!("Not recording.");
                return;
            }
            Err(e) => {
                report_error(&e);
                return;
            }
        };

        println!();
        let duration = clip.duration;
        match self.assistant.submit(clip) {
            Ok(pending) => {
                println!("Analysing {} of audio...", ui::format_elapsed(duration));
                self.pending = Some(pending);
            }
            Err(e) => report_error(&e),
        }
    }

    fn on_complete(&mut self, done: CompletedAnalysis) {
        match self.assistant.complete(done) {
            Ok(entry) => {
                println!();
                print!("{}", ui::render_result(&entry.result));
            }
            Err(e) => report_error(&e),
        }
    }

    fn on_tick(&mut self) {
        if self.assistant.capture().is_capturing() {
            let elapsed = self.assistant.capture().elapsed();
            if elapsed >= self.limit {
                println!();
                println!("Reached the {} limit.", ui::format_elapsed(self.limit));
                self.stop_and_submit();
            } else {
                print!("\r{}", ui::render_recording_status(elapsed, self.limit));
                let _ = std::io::stdout().flush();
            }
            return;
        }

        if self.pending.is_none() && self.panel.tick(Instant::now()) {
            println!();
            print!("{}", ui::render_inspiration(&self.panel));
        }
    }

    fn shutdown(&mut self) {
        if self.assistant.capture().is_capturing() {
            if let Err(e) = self.assistant.stop_recording() {
                tracing::warn!("Failed to stop recording on exit: {}", e);
            }
        }
        if self.pending.is_some() {
            tracing::info!("Leaving with an analysis still pending");
        }
        println!("Bye.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(SessionCommand::parse("  "), SessionCommand::Empty);
        assert_eq!(SessionCommand::parse("record"), SessionCommand::Record);
        assert_eq!(SessionCommand::parse("STOP"), SessionCommand::Stop);
        assert_eq!(SessionCommand::parse("q"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("help"), SessionCommand::Help);
    }

    #[test]
    fn test_parse_arguments_keep_spaces() {
        assert_eq!(
            SessionCommand::parse("add  Layla Rose "),
            SessionCommand::Add("Layla Rose".to_string())
        );
        assert_eq!(
            SessionCommand::parse("select 1700000000000"),
            SessionCommand::Select("1700000000000".to_string())
        );
    }

    #[test]
    fn test_parse_optional_arguments() {
        assert_eq!(
            SessionCommand::parse("history"),
            SessionCommand::History { all: false }
        );
        assert_eq!(
            SessionCommand::parse("history all"),
            SessionCommand::History { all: true }
        );
        assert_eq!(SessionCommand::parse("lullabies"), SessionCommand::Lullabies(None));
        assert_eq!(
            SessionCommand::parse("lullabies 2"),
            SessionCommand::Lullabies(Some("2".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            SessionCommand::parse("dance now"),
            SessionCommand::Unknown("dance".to_string())
        );
    }
}
