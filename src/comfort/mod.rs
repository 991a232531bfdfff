//! Static comfort content: the lullaby catalog and rotating encouragement.

pub mod inspiration;
pub mod lullaby;

pub use inspiration::{DEFAULT_REFRESH_INTERVAL, InspirationPanel};
pub use lullaby::{CATALOG, LullabyTrack, TrackKind};
