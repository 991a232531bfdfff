//! Profile switcher.

use std::fmt::Write;

use crate::session::SessionState;

/// List profiles with the active one marked `*`.
pub fn render_profiles(session: &SessionState) -> String {
    if session.profiles().is_empty() {
        return "No profiles yet. Add one to get started.\n".to_string();
    }

    let active = session.active_profile_id();
    let mut out = String::new();
    for profile in session.profiles() {
        let marker = if Some(&profile.id) == active { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}  {}", marker, profile.id, profile.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::mocks::MemoryStore;

    #[test]
    fn test_active_profile_marked() {
        let mut session = SessionState::load(Box::new(MemoryStore::default()), None).unwrap();
        let first = session.add_profile("Layla").unwrap();
        let second = session.add_profile("Omar").unwrap();
        session.select_profile(&second).unwrap();

        let text = render_profiles(&session);

        assert!(text.contains(&format!("  {}  Layla", first)));
        assert!(text.contains(&format!("* {}  Omar", second)));
    }

    #[test]
    fn test_no_profiles() {
        let session = SessionState::load(Box::new(MemoryStore::default()), None).unwrap();
        assert!(render_profiles(&session).starts_with("No profiles yet"));
    }
}
