//! Profile synchronization.
//!
//! Given an authenticated identity, [`ProfileSynchronizer`] produces a
//! consistent [`UserProfile`]: it loads the stored document (or creates and
//! persists a fresh one when none exists), applies daily-login achievement
//! bookkeeping, publishes the result to the session cell and forwards
//! updated stats to the leaderboard.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::engagement::{AchievementEngine, LeaderboardSink};
use crate::identity::Identity;
use crate::profile::{document, UserProfile};
use crate::session::{SessionCell, SessionPhase};
use crate::store::ProfileStore;
use crate::types::Result;

pub struct ProfileSynchronizer {
    store: Arc<dyn ProfileStore>,
    achievements: Arc<dyn AchievementEngine>,
    leaderboard: Arc<dyn LeaderboardSink>,
    cell: SessionCell,

    /// Per-identity flight locks. At most one synchronization runs per
    /// identity; concurrent triggers serialize behind the lock. Guards are
    /// retained for the service lifetime.
    flights: DashMap<String, Arc<Mutex<()>>>,
}

impl ProfileSynchronizer {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        achievements: Arc<dyn AchievementEngine>,
        leaderboard: Arc<dyn LeaderboardSink>,
        cell: SessionCell,
    ) -> Self {
        Self {
            store,
            achievements,
            leaderboard,
            cell,
            flights: DashMap::new(),
        }
    }

    /// Load or create the profile for `identity` and publish it.
    ///
    /// Absence of a stored document triggers creation; a store failure does
    /// not. Read and write failures surface as errors with the session left
    /// signed out, so callers can retry without risking an account reset.
    pub async fn sync(&self, identity: &Identity) -> Result<UserProfile> {
        let gate = self
            .flights
            .entry(identity.user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        let _flight = gate.lock().await;

        self.cell.publish(SessionPhase::Syncing, None);

        match self.store.load(&identity.user_id).await {
            Ok(Some(doc)) => {
                let profile = match document::from_document(doc) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("Profile document for {} is unusable: {}", identity.user_id, e);
                        self.cell.clear();
                        return Err(e);
                    }
                };
                self.merge_daily_login(identity, profile).await
            }
            Ok(None) => {
                debug!("No profile document for {}", identity.user_id);
                self.create_profile(identity).await
            }
            Err(e) => {
                warn!("Profile load failed for {}: {}", identity.user_id, e);
                self.cell.clear();
                Err(e.into())
            }
        }
    }

    /// Step B of synchronization: record today's login and fold any newly
    /// earned achievements into the loaded profile.
    async fn merge_daily_login(
        &self,
        identity: &Identity,
        mut profile: UserProfile,
    ) -> Result<UserProfile> {
        if profile.user_id.is_empty() {
            profile.user_id = identity.user_id.clone();
        }

        let new = self
            .achievements
            .record_daily_login(&identity.user_id, &mut profile)
            .await;

        if new.is_empty() {
            self.cell
                .publish(SessionPhase::Ready, Some(profile.clone()));
            return Ok(profile);
        }

        info!(
            "{} new achievement(s) for {}",
            new.len(),
            identity.user_id
        );

        profile.achievements.extend(new.iter().cloned());
        profile.latest_achievement = new.last().cloned();

        self.cell
            .publish(SessionPhase::Ready, Some(profile.clone()));

        // Best-effort push; the sink absorbs its own failures
        self.leaderboard
            .update_user_stats(&identity.user_id, &profile)
            .await;

        Ok(profile)
    }

    /// Build, persist and publish a first-time profile.
    async fn create_profile(&self, identity: &Identity) -> Result<UserProfile> {
        self.cell.publish(SessionPhase::Creating, None);

        let now_ms = Utc::now().timestamp_millis();
        let profile = UserProfile::new_citizen(identity, now_ms);
        let fields = match document::to_document(&profile) {
            Ok(f) => f,
            Err(e) => {
                self.cell.clear();
                return Err(e);
            }
        };

        match self.store.save(&profile.user_id, fields).await {
            Ok(()) => {
                info!("Created profile for {}", profile.user_id);
                self.cell
                    .publish(SessionPhase::Ready, Some(profile.clone()));
                Ok(profile)
            }
            Err(e) => {
                warn!("Profile write failed for {}: {}", profile.user_id, e);
                self.cell.clear();
                Err(e.into())
            }
        }
    }
}
