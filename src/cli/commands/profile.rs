//! Profile management commands.

use crate::session::ProfileId;
use crate::ui;

use super::{Context, ProfileAction, exit_with};

/// List, add or select profiles
pub fn cmd_profile(ctx: &Context, action: &ProfileAction) -> anyhow::Result<()> {
    let mut assistant = ctx.assistant()?;

    match action {
        ProfileAction::List => {
            print!("{}", ui::render_profiles(assistant.session()));
        }
        ProfileAction::Add { name } => match assistant.add_profile(name) {
            Ok(id) => println!("✓ Added {} ({}) and made it active", name.trim(), id),
            Err(e) => exit_with(&e),
        },
        ProfileAction::Select { id } => {
            let id = ProfileId::from(id.as_str());
            match assistant.select_profile(&id) {
                Ok(()) => {
                    let name = assistant
                        .session()
                        .active_profile()
                        .map(|p| p.name.clone())
                        .unwrap_or_default();
                    println!("✓ Now recording for {}", name);
                }
                Err(e) => exit_with(&e),
            }
        }
    }
    Ok(())
}
