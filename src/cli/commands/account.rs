//! Access gate, device listing and config location.

use std::path::PathBuf;

use crate::capture;
use crate::config;

use super::{Context, exit_with};

/// Unlock the assistant
pub fn cmd_login(ctx: &Context, passphrase: &str) -> anyhow::Result<()> {
    let mut assistant = ctx.assistant()?;
    if ctx.config.access.passphrase.is_none() {
        println!("No passphrase is configured; the assistant is always unlocked.");
        return Ok(());
    }
    match assistant.login(passphrase) {
        Ok(()) => println!("✓ Signed in"),
        Err(e) => exit_with(&e),
    }
    Ok(())
}

/// Lock the assistant again
pub fn cmd_logout(ctx: &Context) -> anyhow::Result<()> {
    let mut assistant = ctx.assistant()?;
    match assistant.logout() {
        Ok(()) => println!("✓ Signed out"),
        Err(e) => exit_with(&e),
    }
    Ok(())
}

/// List microphone input devices
pub fn cmd_devices() -> anyhow::Result<()> {
    let devices = capture::list_input_devices()?;
    if devices.is_empty() {
        println!("No input devices found.");
        return Ok(());
    }

    println!("Input devices:");
    for device in devices {
        let marker = if device.is_default { '*' } else { ' ' };
        let format = match (device.sample_rate, device.channels) {
            (Some(rate), Some(ch)) => format!("{} Hz, {} ch", rate, ch),
            _ => "format unknown".to_string(),
        };
        println!("{} {}  ({})", marker, device.name, format);
    }
    println!();
    println!("Set capture.device in the config file to use a specific device.");
    Ok(())
}

/// Print the config file location, optionally writing defaults there
pub fn cmd_config_path(
    explicit: Option<&PathBuf>,
    ctx: &Context,
    init: bool,
) -> anyhow::Result<()> {
    let path = match explicit {
        Some(p) => p.clone(),
        None => config::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if init {
        if path.exists() {
            println!("Config already exists, leaving it as is.");
        } else {
            match explicit {
                Some(p) => config::save_to(&ctx.config, p)?,
                None => {
                    config::save(&ctx.config)?;
                }
            }
            println!("✓ Wrote default config");
        }
    }
    println!("{}", path.display());
    Ok(())
}
