//! Lullaby catalog and the inspiration panel.

use std::fmt::Write;

use crate::comfort::{CATALOG, InspirationPanel, LullabyTrack};

pub fn render_lullabies() -> String {
    let mut out = String::new();
    for (i, track) in CATALOG.iter().enumerate() {
        let _ = writeln!(out, "{}. {} ({})", i + 1, track.name, track.kind);
        let _ = writeln!(out, "   {}", track.description);
        let _ = writeln!(out, "   {}", track.watch_url());
    }
    out
}

/// Details for one track, with an embed URL keyed by `reload_key`.
pub fn render_track(track: &LullabyTrack, reload_key: u32) -> String {
    format!(
        "{} ({})\n{}\n\nEmbed:     {}\nWatch:     {}\nThumbnail: {}\n",
        track.name,
        track.kind,
        track.description,
        track.embed_url(reload_key),
        track.watch_url(),
        track.thumbnail_url(),
    )
}

pub fn render_inspiration(panel: &InspirationPanel) -> String {
    format!("♥ {}\nTip: {}\n", panel.message(), panel.tip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comfort::DEFAULT_REFRESH_INTERVAL;

    #[test]
    fn test_lullabies_numbered() {
        let text = render_lullabies();
        assert!(text.starts_with("1. "));
        assert!(text.contains(&format!("{}. ", CATALOG.len())));
        for track in CATALOG.iter() {
            assert!(text.contains(track.name));
        }
    }

    #[test]
    fn test_track_uses_privacy_embed() {
        let text = render_track(&CATALOG[0], 3);
        assert!(text.contains("youtube-nocookie.com/embed/"));
        assert!(text.contains("key=3"));
    }

    #[test]
    fn test_inspiration_shows_current_entries() {
        let panel = InspirationPanel::with_seed(9, DEFAULT_REFRESH_INTERVAL);
        let text = render_inspiration(&panel);
        assert!(text.contains(panel.message()));
        assert!(text.contains(panel.tip()));
    }
}
