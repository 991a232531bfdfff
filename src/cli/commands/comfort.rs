//! Tips and lullaby commands.

use crate::comfort::{InspirationPanel, lullaby};
use crate::ui;

use super::Context;

/// Show an encouraging message and a tip
pub fn cmd_tips(ctx: &Context) {
    let panel = InspirationPanel::new(ctx.config.refresh_interval());
    print!("{}", ui::render_inspiration(&panel));
}

/// List soothing tracks, or show one in detail
pub fn cmd_lullabies(track: Option<&str>) -> anyhow::Result<()> {
    match track {
        None => {
            print!("{}", ui::render_lullabies());
            Ok(())
        }
        Some(key) => {
            let Some(track) = lullaby::find(key) else {
                anyhow::bail!(
                    "No track {:?}. Choose 1-{} or one of the ids from `lullabies`.",
                    key,
                    lullaby::CATALOG.len()
                );
            };
            print!("{}", ui::render_track(track, 0));
            Ok(())
        }
    }
}
