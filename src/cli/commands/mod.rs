//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `record`: capture from the microphone or load a file, then classify
//! - `profile`: list, add and select profiles
//! - `comfort`: tips and the lullaby catalog
//! - `account`: access gate, devices and config location
//! - `session`: the interactive loop
//! - `input`: terminal lines read off the runtime

mod account;
mod comfort;
mod input;
mod profile;
mod record;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::app::Assistant;
use crate::capture::CpalMicrophone;
use crate::classifier::gemini::GeminiClient;
use crate::classifier::{ClassificationError, ClassificationGateway};
use crate::config::{self, Config};
use crate::error::Error;
use crate::session::{JsonFileStore, SessionState};

pub use account::{cmd_config_path, cmd_devices, cmd_login, cmd_logout};
pub use comfort::{cmd_lullabies, cmd_tips};
pub use profile::cmd_profile;
pub use record::{cmd_analyze, cmd_record};
pub use session::cmd_session;

/// NannyAI: find out why your baby is crying
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gemini API key (overrides credentials.gemini_api_key in the config file)
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive session (the default)
    Session,
    /// Record from the microphone and classify the cry
    Record {
        /// Stop after this many seconds (default: press Enter or hit the limit)
        #[arg(short, long)]
        seconds: Option<u64>,
        /// Profile to attach the result to (default: the active profile)
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Classify an existing audio file
    Analyze {
        /// Path to a wav, webm, ogg, mp3, m4a or flac file
        path: PathBuf,
        /// Profile to attach the result to (default: the active profile)
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Manage baby profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show an encouraging message and a tip
    Tips,
    /// List soothing videos, or show one in detail
    Lullabies {
        /// Track number or id
        track: Option<String>,
    },
    /// List microphone input devices
    Devices,
    /// Unlock the assistant with the configured passphrase
    Login {
        passphrase: String,
    },
    /// Lock the assistant again
    Logout,
    /// Print the config file location
    ConfigPath {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileAction {
    /// List profiles (* = active)
    List,
    /// Add a profile and make it active
    Add {
        name: String,
    },
    /// Make a profile active
    Select {
        id: String,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the interactive session should start).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let rt = Runtime::new()?;
    let ctx = Context::from_cli(cli);

    match &cli.command {
        Some(Commands::Session) => {
            cmd_session(&rt, &ctx)?;
            Ok(true)
        }
        Some(Commands::Record { seconds, profile }) => {
            cmd_record(&rt, &ctx, *seconds, profile.as_deref())?;
            Ok(true)
        }
        Some(Commands::Analyze { path, profile }) => {
            cmd_analyze(&rt, &ctx, path, profile.as_deref())?;
            Ok(true)
        }
        Some(Commands::Profile { action }) => {
            cmd_profile(&ctx, action)?;
            Ok(true)
        }
        Some(Commands::Tips) => {
            cmd_tips(&ctx);
            Ok(true)
        }
        Some(Commands::Lullabies { track }) => {
            cmd_lullabies(track.as_deref())?;
            Ok(true)
        }
        Some(Commands::Devices) => {
            cmd_devices()?;
            Ok(true)
        }
        Some(Commands::Login { passphrase }) => {
            cmd_login(&ctx, passphrase)?;
            Ok(true)
        }
        Some(Commands::Logout) => {
            cmd_logout(&ctx)?;
            Ok(true)
        }
        Some(Commands::ConfigPath { init }) => {
            cmd_config_path(cli.config.as_ref(), &ctx, *init)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Start the interactive session.
pub fn run_session(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let ctx = Context::from_cli(cli);
    cmd_session(&rt, &ctx)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// The assistant wired to real hardware and the real service.
pub(crate) type LiveAssistant = Assistant<CpalMicrophone, GeminiClient>;

/// Settings resolved once per invocation.
pub(crate) struct Context {
    pub config: Config,
    pub api_key: Option<String>,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        let config = match &cli.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        Self {
            config,
            api_key: cli.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    /// Load the persisted session and wire up microphone and gateway.
    pub fn assistant(&self) -> anyhow::Result<LiveAssistant> {
        let classifier = self.config.classifier_config(self.api_key.as_deref());
        let gateway = ClassificationGateway::from_config(&classifier)?;
        let store = JsonFileStore::open_default()?;
        tracing::debug!("Using state file {:?}", store.path());
        let session = SessionState::load(Box::new(store), self.config.history.max_entries)?;
        let microphone = CpalMicrophone::new(self.config.input_device());

        Ok(Assistant::new(
            microphone,
            gateway,
            session,
            self.config.access.passphrase.clone(),
        ))
    }
}

/// Print an error in words a tired parent can act on.
pub(crate) fn report_error(err: &Error) {
    if err.is_permission_denied() {
        eprintln!("Microphone access was denied.");
        eprintln!("Allow this terminal to use the microphone in your system settings, then try again.");
        return;
    }
    match err {
        Error::Classification(ClassificationError::MissingApiKey) => {
            eprintln!("Error: no Gemini API key configured.");
            eprintln!("Use --api-key YOUR_KEY, set GEMINI_API_KEY, or add it to the config file:");
            if let Some(path) = config::config_path() {
                eprintln!("  {}", path.display());
            }
        }
        Error::Classification(ClassificationError::Transport(_)) => {
            eprintln!("Error: {}", err);
            eprintln!("Check your connection and try again.");
        }
        Error::Classification(ClassificationError::Schema(_)) => {
            eprintln!("Error: {}", err);
            eprintln!("The answer could not be read. Try recording again.");
        }
        _ => eprintln!("Error: {}", err),
    }
}

/// Report `err` and exit with status 1.
pub(crate) fn exit_with(err: &Error) -> ! {
    report_error(err);
    std::process::exit(1);
}
