//! Lullaby and soothing-video catalog.
//!
//! Playback itself is out of scope; the catalog only builds the URLs a
//! browser or video widget needs.

use std::fmt;

/// What kind of soothing a track provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// High-contrast visuals
    Sensory,
    /// White noise, rain and similar
    Noise,
    Music,
}

impl TrackKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Sensory => "Sensory video",
            TrackKind::Noise => "Sleep sounds",
            TrackKind::Music => "Calm music",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LullabyTrack {
    pub id: &'static str,
    /// YouTube video id
    pub video_id: &'static str,
    pub name: &'static str,
    pub kind: TrackKind,
    pub description: &'static str,
}

impl LullabyTrack {
    /// Privacy-enhanced embed URL.
    ///
    /// `reload_key` changes the URL so an embedding widget re-creates the
    /// player; bump it after a failed load.
    pub fn embed_url(&self, reload_key: u32) -> String {
        format!(
            "https://www.youtube-nocookie.com/embed/{}?key={}&autoplay=0&rel=0&modestbranding=1",
            self.video_id, reload_key
        )
    }

    /// Direct link for opening the video outside an embed.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.video_id)
    }
}

/// The fixed catalog, in display order.
pub const CATALOG: [LullabyTrack; 4] = [
    LullabyTrack {
        id: "white-noise",
        video_id: "pRASZVBSRpQ",
        name: "White noise",
        kind: TrackKind::Noise,
        description: "A steady hum that masks outside noise and calms the baby quickly.",
    },
    LullabyTrack {
        id: "music-box",
        video_id: "KKvZt2gde5Y",
        name: "Music box lullaby",
        kind: TrackKind::Music,
        description: "Soft classical melodies that give a sense of safety and calm.",
    },
    LullabyTrack {
        id: "sensory-shapes",
        video_id: "xSOp5CjhcI8",
        name: "Dancing shapes",
        kind: TrackKind::Sensory,
        description: "High-contrast sensory video that holds attention and eases crying.",
    },
    LullabyTrack {
        id: "rain-sounds",
        video_id: "LmlccGjmPYI",
        name: "Rain sounds",
        kind: TrackKind::Noise,
        description: "Soothing rainfall for deep relaxation and longer sleep.",
    },
];

/// Look up a track by catalog id or 1-based position.
pub fn find(key: &str) -> Option<&'static LullabyTrack> {
    let key = key.trim();
    if let Ok(position) = key.parse::<usize>() {
        return position.checked_sub(1).and_then(|i| CATALOG.get(i));
    }
    CATALOG.iter().find(|t| t.id.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<_> = CATALOG.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_embed_url_uses_nocookie_domain() {
        let url = CATALOG[0].embed_url(3);
        assert!(url.starts_with("https://www.youtube-nocookie.com/embed/pRASZVBSRpQ?"));
        assert!(url.contains("key=3"));
        assert!(url.contains("rel=0"));
    }

    #[test]
    fn test_find_by_id_and_position() {
        assert_eq!(find("rain-sounds").unwrap().video_id, "LmlccGjmPYI");
        assert_eq!(find("2").unwrap().id, "music-box");
        assert!(find("0").is_none());
        assert!(find("5").is_none());
        assert!(find("lofi").is_none());
    }
}
