//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`CaptureError`], [`ClassificationError`],
//!   [`SessionError`]) for detailed handling
//! - Every error is terminal for the operation that raised it; none is fatal
//!   to the program

use crate::capture::CaptureError;
use crate::classifier::ClassificationError;
use crate::session::SessionError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Microphone could not be used (including denied permission)
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Classification call failed or returned an unusable answer
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// Profile or history operation failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// No profile selected to attach a result to
    #[error("No profile selected - add or select a profile first")]
    NoActiveProfile,

    /// A classification is already pending
    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    /// The access gate is closed
    #[error("Not signed in - run `login` first")]
    NotAuthorized,

    /// Wrong passphrase at the access gate
    #[error("Invalid passphrase")]
    InvalidPassphrase,
}

impl Error {
    /// True for the microphone-permission case, which the UI words gently.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Capture(CaptureError::PermissionDenied(_)))
    }
}
