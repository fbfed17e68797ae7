//! Observable session state.
//!
//! The current profile (and where the current authentication attempt
//! stands) is published through a [`SessionCell`]: a single-writer watch
//! channel owned by the [`SessionService`]. Observers subscribe for change
//! notifications; when the owning service is dropped the channel closes and
//! receivers see the end of the session.

mod service;
mod sync;

pub use service::SessionService;
pub use sync::ProfileSynchronizer;

use std::sync::Arc;

use tokio::sync::watch;

use crate::profile::UserProfile;

/// Where the current authentication attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No identity; waiting for an explicit sign-in
    SignedOut,

    /// A sign-in request is in flight at the identity provider
    Authenticating,

    /// Identity established; loading the profile document
    Syncing,

    /// No document existed; creating and persisting a fresh profile
    Creating,

    /// Profile loaded or created and published
    Ready,

    /// Provider unreachable; a non-persisted placeholder profile is
    /// published. Terminal for the attempt.
    Offline,
}

/// Snapshot published to observers.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    fn signed_out() -> Self {
        Self {
            phase: SessionPhase::SignedOut,
            profile: None,
        }
    }
}

/// Single-writer broadcast cell holding the current session snapshot.
///
/// The synchronizer is the only writer; readers observe the latest published
/// value without blocking.
#[derive(Clone)]
pub struct SessionCell {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::signed_out());
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe for change notifications. The receiver immediately holds
    /// the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub(crate) fn publish(&self, phase: SessionPhase, profile: Option<UserProfile>) {
        self.tx.send_replace(SessionState { phase, profile });
    }

    pub(crate) fn clear(&self) {
        self.publish(SessionPhase::SignedOut, None);
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}
