//! Session lifecycle.
//!
//! [`SessionService`] wires the identity provider to the profile
//! synchronizer: it resumes an existing provider session at startup, handles
//! anonymous and federated sign-in (with an offline fallback when the
//! provider is unreachable), and clears the published session on sign-out.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::engagement::{AchievementEngine, LeaderboardSink};
use crate::identity::{AuthError, FederatedCredential, IdentityProvider};
use crate::profile::UserProfile;
use crate::session::{ProfileSynchronizer, SessionCell, SessionPhase, SessionState};
use crate::store::ProfileStore;
use crate::types::Result;

pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,
    synchronizer: ProfileSynchronizer,
    cell: SessionCell,
}

impl SessionService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        achievements: Arc<dyn AchievementEngine>,
        leaderboard: Arc<dyn LeaderboardSink>,
    ) -> Self {
        let cell = SessionCell::new();
        let synchronizer =
            ProfileSynchronizer::new(store, achievements, leaderboard, cell.clone());

        Self {
            provider,
            synchronizer,
            cell,
        }
    }

    /// Subscribe to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    /// The latest published snapshot.
    pub fn session(&self) -> SessionState {
        self.cell.current()
    }

    /// Resume a previously authenticated session at startup.
    ///
    /// When the provider still holds an identity, synchronization runs
    /// without user interaction and the profile is returned. With no
    /// identity the session stays signed out awaiting an explicit sign-in.
    pub async fn bootstrap(&self) -> Result<Option<UserProfile>> {
        match self.provider.current_identity().await {
            Some(identity) => {
                info!("Resuming session for {}", identity.user_id);
                self.synchronizer.sync(&identity).await.map(Some)
            }
            None => {
                debug!("No existing identity; waiting for sign-in");
                Ok(None)
            }
        }
    }

    /// Request an anonymous identity and synchronize its profile.
    ///
    /// When the provider is unreachable a non-persisted offline placeholder
    /// profile is published and returned instead.
    pub async fn sign_in_anonymously(&self) -> Result<UserProfile> {
        self.cell.publish(SessionPhase::Authenticating, None);

        match self.provider.sign_in_anonymously().await {
            Ok(identity) => {
                info!("Anonymous sign-in as {}", identity.user_id);
                self.synchronizer.sync(&identity).await
            }
            Err(e) => self.sign_in_failed(e),
        }
    }

    /// Exchange a Google credential for an identity and synchronize its
    /// profile. Same offline fallback as anonymous sign-in.
    pub async fn sign_in_with_google(
        &self,
        credential: FederatedCredential,
    ) -> Result<UserProfile> {
        self.cell.publish(SessionPhase::Authenticating, None);

        match self.provider.sign_in_with_credential(credential).await {
            Ok(identity) => {
                info!("Federated sign-in as {}", identity.user_id);
                self.synchronizer.sync(&identity).await
            }
            Err(e) => self.sign_in_failed(e),
        }
    }

    /// Re-run synchronization for the current identity.
    ///
    /// Called without an authenticated identity this publishes a signed-out
    /// state and returns `Ok(None)`; it is an internal refresh path, not a
    /// user-facing request.
    pub async fn refresh_profile(&self) -> Result<Option<UserProfile>> {
        match self.provider.current_identity().await {
            Some(identity) => self.synchronizer.sync(&identity).await.map(Some),
            None => {
                warn!("Profile refresh requested with no authenticated identity");
                self.cell.clear();
                Ok(None)
            }
        }
    }

    /// Clear the published session.
    ///
    /// Provider-side sign-out is the identity integration's concern and is
    /// not performed here.
    pub fn sign_out(&self) {
        info!("Signing out");
        self.cell.clear();
    }

    fn sign_in_failed(&self, err: AuthError) -> Result<UserProfile> {
        if err.is_network() {
            warn!("Identity provider unreachable, using offline profile: {}", err);
            let profile = UserProfile::offline(Utc::now().timestamp_millis());
            self.cell
                .publish(SessionPhase::Offline, Some(profile.clone()));
            return Ok(profile);
        }

        warn!("Sign-in failed: {}", err);
        self.cell.clear();
        Err(err.into())
    }
}
