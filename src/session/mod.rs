//! Session state: profiles, the active selection, history and the latest
//! result.
//!
//! All mutation goes through [`SessionState`]. Profile changes are written
//! through the injected [`StateStore`] before they take effect in memory, so
//! a failed save leaves the session exactly as it was. History lives only
//! for the lifetime of the process.

pub mod model;
pub mod store;

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;

use crate::classifier::ClassificationResult;
pub use model::{EntryId, HistoryEntry, IdGenerator, Profile, ProfileId};
pub use store::{JsonFileStore, PersistedState, StateStore, StoreError};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Profile name cannot be empty")]
    EmptyName,

    #[error("No profile with id {0}")]
    UnknownProfile(ProfileId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Holds everything the presentation surfaces read.
pub struct SessionState {
    store: Box<dyn StateStore>,
    authorized: bool,
    profiles: Vec<Profile>,
    active_profile_id: Option<ProfileId>,
    /// Most recent first
    history: VecDeque<HistoryEntry>,
    latest_result: Option<ClassificationResult>,
    max_history: Option<usize>,
    ids: IdGenerator,
}

impl SessionState {
    /// Read persisted profiles from `store` and start an empty history.
    ///
    /// `max_history` bounds the in-memory history (None = unbounded).
    pub fn load(
        store: Box<dyn StateStore>,
        max_history: Option<usize>,
    ) -> Result<Self, SessionError> {
        let persisted = store.load()?;

        let active_profile_id = persisted
            .active_profile_id
            .filter(|id| persisted.profiles.iter().any(|p| &p.id == id));
        let ids = IdGenerator::seeded(persisted.profiles.iter().map(|p| p.id.as_str()));

        tracing::info!("Loaded {} profiles", persisted.profiles.len());

        Ok(Self {
            store,
            authorized: persisted.authorized,
            profiles: persisted.profiles,
            active_profile_id,
            history: VecDeque::new(),
            latest_result: None,
            max_history: max_history.filter(|&n| n > 0),
            ids,
        })
    }

    fn persisted(&self) -> PersistedState {
        PersistedState {
            authorized: self.authorized,
            profiles: self.profiles.clone(),
            active_profile_id: self.active_profile_id.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Create a profile and make it active, persisted in a single save.
    /// Names are trimmed; duplicates are allowed.
    pub fn add_profile(&mut self, name: &str) -> Result<ProfileId, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let now = Utc::now();
        let profile = Profile {
            id: self.ids.next_profile_id(now),
            name: name.to_string(),
            created_at: now,
        };
        let id = profile.id.clone();

        let mut next = self.persisted();
        next.profiles.push(profile.clone());
        next.active_profile_id = Some(id.clone());
        self.store.save(&next)?;

        tracing::info!("Added profile {:?} ({})", profile.name, profile.id);
        self.profiles.push(profile);
        self.active_profile_id = Some(id.clone());
        Ok(id)
    }

    /// Make `id` the active profile. Unknown ids leave the selection as is.
    pub fn select_profile(&mut self, id: &ProfileId) -> Result<(), SessionError> {
        if !self.profiles.iter().any(|p| &p.id == id) {
            return Err(SessionError::UnknownProfile(id.clone()));
        }
        if self.active_profile_id.as_ref() == Some(id) {
            return Ok(());
        }

        let mut next = self.persisted();
        next.active_profile_id = Some(id.clone());
        self.store.save(&next)?;

        tracing::debug!("Selected profile {}", id);
        self.active_profile_id = Some(id.clone());
        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn active_profile_id(&self) -> Option<&ProfileId> {
        self.active_profile_id.as_ref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_profile_id.as_ref().and_then(|id| self.profile(id))
    }

    // ------------------------------------------------------------------
    // Authorization flag
    // ------------------------------------------------------------------

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn set_authorized(&mut self, authorized: bool) -> Result<(), SessionError> {
        let mut next = self.persisted();
        next.authorized = authorized;
        self.store.save(&next)?;
        self.authorized = authorized;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Prepend a history entry for `profile_id` and make `result` the latest.
    pub fn record_result(
        &mut self,
        profile_id: &ProfileId,
        result: ClassificationResult,
        duration: Duration,
    ) -> &HistoryEntry {
        let now = Utc::now();
        let entry = HistoryEntry {
            id: self.ids.next_entry_id(now),
            profile_id: profile_id.clone(),
            captured_at: now,
            duration,
            result: result.clone(),
        };

        self.history.push_front(entry);
        if let Some(max) = self.max_history {
            self.history.truncate(max);
        }
        self.latest_result = Some(result);

        &self.history[0]
    }

    pub fn latest_result(&self) -> Option<&ClassificationResult> {
        self.latest_result.as_ref()
    }

    /// All entries, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Entries for one profile, most recent first.
    pub fn history_for<'a>(
        &'a self,
        profile_id: &'a ProfileId,
    ) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.history.iter().filter(move |e| &e.profile_id == profile_id)
    }
}
