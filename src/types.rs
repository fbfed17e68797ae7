//! Crate-wide error and result types.

use thiserror::Error;

use crate::identity::AuthError;
use crate::store::StoreError;

/// Errors surfaced by the session and synchronization core.
#[derive(Debug, Error)]
pub enum RotundaError {
    /// The identity provider failed or rejected a sign-in attempt.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// A profile store read or write failed.
    #[error("profile store: {0}")]
    Store(#[from] StoreError),

    /// A stored profile document could not be interpreted.
    ///
    /// Distinct from [`RotundaError::Store`]: the backend answered, but the
    /// document contents are unusable. Never treated as absence; no
    /// replacement profile is created over it.
    #[error("malformed profile document: {0}")]
    Profile(String),
}

pub type Result<T> = std::result::Result<T, RotundaError>;
