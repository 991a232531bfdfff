//! The assistant: one linear capture → classify → record flow.
//!
//! ```text
//! start_recording ─► stop_recording ─► submit ─► (await) ─► complete
//!                                        │                     │
//!                                  in-flight guard      history + latest
//! ```
//!
//! A submitted clip runs on its own task so the caller can keep handling
//! input while it waits. Only one analysis may be pending; starting a new
//! recording or submitting another clip meanwhile is rejected with
//! [`Error::AnalysisInProgress`]. The profile is fixed at submit time, so
//! switching profiles mid-flight does not misattribute the result.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::capture::{AudioClip, CaptureUnit, Microphone};
use crate::classifier::{
    ClassificationError, ClassificationGateway, ClassificationResult, ClassifierApi,
};
use crate::error::{Error, Result};
use crate::session::{HistoryEntry, ProfileId, SessionState};

/// A classification running in the background.
pub struct PendingAnalysis {
    profile_id: ProfileId,
    duration: Duration,
    handle: JoinHandle<std::result::Result<ClassificationResult, ClassificationError>>,
}

impl PendingAnalysis {
    /// Wait for the service to answer.
    ///
    /// Takes `&mut self` so it can be polled from a `select!` loop.
    pub async fn join(&mut self) -> CompletedAnalysis {
        let outcome = match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(e) => Err(ClassificationError::Transport(format!(
                "classification task failed: {}",
                e
            ))),
        };
        CompletedAnalysis {
            profile_id: self.profile_id.clone(),
            duration: self.duration,
            outcome,
        }
    }
}

/// The answer to a [`PendingAnalysis`], ready to be applied to the session.
#[derive(Debug)]
pub struct CompletedAnalysis {
    pub profile_id: ProfileId,
    pub duration: Duration,
    pub outcome: std::result::Result<ClassificationResult, ClassificationError>,
}

/// Owns the capture unit, the gateway and the session.
pub struct Assistant<M: Microphone, C: ClassifierApi + 'static> {
    capture: CaptureUnit<M>,
    gateway: Arc<ClassificationGateway<C>>,
    session: SessionState,
    passphrase: Option<String>,
    in_flight: bool,
}

impl<M: Microphone, C: ClassifierApi + 'static> Assistant<M, C> {
    pub fn new(
        microphone: M,
        gateway: ClassificationGateway<C>,
        session: SessionState,
        passphrase: Option<String>,
    ) -> Self {
        Self {
            capture: CaptureUnit::new(microphone),
            gateway: Arc::new(gateway),
            session,
            passphrase: passphrase.filter(|p| !p.is_empty()),
            in_flight: false,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn capture(&self) -> &CaptureUnit<M> {
        &self.capture
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight
    }

    // ------------------------------------------------------------------
    // Access gate
    // ------------------------------------------------------------------

    /// True when no passphrase is configured or the user has signed in.
    pub fn is_unlocked(&self) -> bool {
        self.passphrase.is_none() || self.session.is_authorized()
    }

    /// Open the gate. Without a configured passphrase there is nothing to
    /// unlock, so nothing is persisted.
    pub fn login(&mut self, passphrase: &str) -> Result<()> {
        match &self.passphrase {
            None => {
                tracing::debug!("Login without a configured passphrase");
                Ok(())
            }
            Some(expected) if expected != passphrase => {
                tracing::warn!("Rejected login attempt");
                Err(Error::InvalidPassphrase)
            }
            Some(_) => {
                self.session.set_authorized(true)?;
                tracing::info!("Signed in");
                Ok(())
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.set_authorized(false)?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(Error::NotAuthorized)
        }
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Add a profile and make it the active one.
    pub fn add_profile(&mut self, name: &str) -> Result<ProfileId> {
        self.ensure_unlocked()?;
        Ok(self.session.add_profile(name)?)
    }

    pub fn select_profile(&mut self, id: &ProfileId) -> Result<()> {
        self.ensure_unlocked()?;
        self.session.select_profile(id)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Capture and analysis
    // ------------------------------------------------------------------

    pub fn start_recording(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        if self.in_flight {
            return Err(Error::AnalysisInProgress);
        }
        if self.session.active_profile_id().is_none() {
            return Err(Error::NoActiveProfile);
        }
        self.capture.start_capture()?;
        Ok(())
    }

    /// Stop recording. `None` when nothing was being recorded.
    pub fn stop_recording(&mut self) -> Result<Option<AudioClip>> {
        Ok(self.capture.stop_capture()?)
    }

    /// Hand a clip to the gateway for the active profile.
    pub fn submit(&mut self, clip: AudioClip) -> Result<PendingAnalysis> {
        self.ensure_unlocked()?;
        if self.in_flight {
            return Err(Error::AnalysisInProgress);
        }
        let profile_id = self
            .session
            .active_profile_id()
            .cloned()
            .ok_or(Error::NoActiveProfile)?;

        let duration = clip.duration;
        let gateway = Arc::clone(&self.gateway);
        let handle = tokio::spawn(async move { gateway.classify(clip).await });

        self.in_flight = true;
        Ok(PendingAnalysis {
            profile_id,
            duration,
            handle,
        })
    }

    /// Apply a finished analysis. Failures leave the session untouched.
    pub fn complete(&mut self, done: CompletedAnalysis) -> Result<&HistoryEntry> {
        self.in_flight = false;
        let result = done.outcome?;
        Ok(self
            .session
            .record_result(&done.profile_id, result, done.duration))
    }

    /// Submit and wait in one step.
    pub async fn analyze(&mut self, clip: AudioClip) -> Result<&HistoryEntry> {
        let mut pending = self.submit(clip)?;
        let done = pending.join().await;
        self.complete(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::mocks::MockMicrophone;
    use crate::classifier::traits::mocks::MockClassifier;
    use crate::classifier::{CryReason, Urgency};
    use crate::session::store::mocks::MemoryStore;
    use crate::test_utils::{hunger_result, sample_clip};

    type TestAssistant = Assistant<MockMicrophone, MockClassifier>;

    fn assistant(mic: MockMicrophone, api: MockClassifier) -> TestAssistant {
        let session = SessionState::load(Box::new(MemoryStore::default()), None).unwrap();
        Assistant::new(mic, ClassificationGateway::new(api, 1), session, None)
    }

    #[tokio::test]
    async fn test_end_to_end_hunger() {
        let mic = MockMicrophone::six_seconds();
        let mut app = assistant(mic.clone(), MockClassifier::returning(hunger_result()));
        let baby = app.add_profile("Layla").unwrap();

        app.start_recording().unwrap();
        let clip = app.stop_recording().unwrap().expect("clip");
        assert_eq!(clip.duration, Duration::from_secs(6));
        assert!(mic.was_released());

        let entry = app.analyze(clip).await.unwrap();
        assert_eq!(entry.profile_id, baby);
        assert_eq!(entry.result.reason, CryReason::Hunger);
        assert_eq!(entry.result.confidence, 82.0);
        assert_eq!(entry.result.urgency, Urgency::Medium);

        let session = app.session();
        assert_eq!(session.latest_result(), Some(&hunger_result()));
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.history().next().unwrap().profile_id, baby);
    }

    #[tokio::test]
    async fn test_schema_failure_leaves_session_unchanged() {
        let api = MockClassifier::sequence(vec![
            Ok(hunger_result()),
            Err(ClassificationError::Schema("not json".into())),
        ]);
        let mut app = assistant(MockMicrophone::six_seconds(), api);
        app.add_profile("Layla").unwrap();
        app.analyze(sample_clip()).await.unwrap();

        let err = app.analyze(sample_clip()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Classification(ClassificationError::Schema(_))
        ));
        assert_eq!(app.session().history_len(), 1);
        assert_eq!(app.session().latest_result(), Some(&hunger_result()));
        assert!(!app.is_analyzing());
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_pending() {
        let mut app = assistant(
            MockMicrophone::six_seconds(),
            MockClassifier::returning(hunger_result()),
        );
        app.add_profile("Layla").unwrap();

        let mut pending = app.submit(sample_clip()).unwrap();
        assert!(matches!(
            app.submit(sample_clip()),
            Err(Error::AnalysisInProgress)
        ));
        assert!(matches!(
            app.start_recording(),
            Err(Error::AnalysisInProgress)
        ));

        let done = pending.join().await;
        app.complete(done).unwrap();
        assert!(!app.is_analyzing());
        assert!(app.start_recording().is_ok());
    }

    #[tokio::test]
    async fn test_result_attributed_to_profile_at_submit() {
        let mut app = assistant(
            MockMicrophone::six_seconds(),
            MockClassifier::returning(hunger_result()),
        );
        let first = app.add_profile("First").unwrap();
        let mut pending = app.submit(sample_clip()).unwrap();
        let second = app.add_profile("Second").unwrap();
        assert_eq!(app.session().active_profile_id(), Some(&second));

        let done = pending.join().await;
        let entry = app.complete(done).unwrap();

        assert_eq!(entry.profile_id, first);
    }

    #[test]
    fn test_recording_requires_profile() {
        let mut app = assistant(
            MockMicrophone::six_seconds(),
            MockClassifier::returning(hunger_result()),
        );
        assert!(matches!(app.start_recording(), Err(Error::NoActiveProfile)));
    }

    #[test]
    fn test_permission_denied_is_reported() {
        let mut app = assistant(
            MockMicrophone::denied(),
            MockClassifier::returning(hunger_result()),
        );
        app.add_profile("Layla").unwrap();

        let err = app.start_recording().unwrap_err();

        assert!(err.is_permission_denied());
        assert!(!app.capture().is_capturing());
    }

    #[test]
    fn test_stop_without_start() {
        let mut app = assistant(
            MockMicrophone::six_seconds(),
            MockClassifier::returning(hunger_result()),
        );
        assert!(app.stop_recording().unwrap().is_none());
    }

    #[test]
    fn test_passphrase_gate() {
        let session = SessionState::load(Box::new(MemoryStore::default()), None).unwrap();
        let mut app: TestAssistant = Assistant::new(
            MockMicrophone::six_seconds(),
            ClassificationGateway::new(MockClassifier::returning(hunger_result()), 1),
            session,
            Some("lullaby".to_string()),
        );

        assert!(!app.is_unlocked());
        assert!(matches!(app.add_profile("Layla"), Err(Error::NotAuthorized)));
        assert!(matches!(app.login("wrong"), Err(Error::InvalidPassphrase)));

        app.login("lullaby").unwrap();
        assert!(app.is_unlocked());
        assert!(app.add_profile("Layla").is_ok());

        app.logout().unwrap();
        assert!(!app.is_unlocked());
    }

    #[test]
    fn test_login_without_passphrase_persists_nothing() {
        let store = MemoryStore::default();
        let session = SessionState::load(Box::new(store.clone()), None).unwrap();
        let mut app: TestAssistant = Assistant::new(
            MockMicrophone::six_seconds(),
            ClassificationGateway::new(MockClassifier::returning(hunger_result()), 1),
            session,
            None,
        );

        app.login("anything").unwrap();

        assert!(app.is_unlocked());
        assert!(!app.session().is_authorized());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_add_profile_is_one_save() {
        let store = MemoryStore::default();
        let session = SessionState::load(Box::new(store.clone()), None).unwrap();
        let mut app: TestAssistant = Assistant::new(
            MockMicrophone::six_seconds(),
            ClassificationGateway::new(MockClassifier::returning(hunger_result()), 1),
            session,
            None,
        );

        let id = app.add_profile("Layla").unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot().active_profile_id, Some(id));
    }

    #[tokio::test]
    async fn test_select_unknown_profile_keeps_active() {
        let mut app = assistant(
            MockMicrophone::six_seconds(),
            MockClassifier::returning(hunger_result()),
        );
        let id = app.add_profile("Layla").unwrap();

        assert!(app.select_profile(&ProfileId::new("nope")).is_err());
        assert_eq!(app.session().active_profile_id(), Some(&id));
    }
}
