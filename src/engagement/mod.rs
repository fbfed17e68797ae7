//! External gamification collaborators.
//!
//! Achievement recomputation and leaderboard publication are owned by other
//! services; the synchronizer consumes them through these seams.

use async_trait::async_trait;

use crate::profile::{Achievement, UserProfile};

/// Daily-login achievement bookkeeping.
#[async_trait]
pub trait AchievementEngine: Send + Sync {
    /// Record a login for today.
    ///
    /// Implementors compare `stats.last_login_timestamp` and
    /// `stats.streak_days` against the current time, update the streak
    /// counters on `profile` in place, and return the newly earned
    /// achievements, oldest first. Repeat calls within the same day return
    /// an empty list.
    async fn record_daily_login(&self, user_id: &str, profile: &mut UserProfile)
        -> Vec<Achievement>;
}

/// Push updated stats to the leaderboard service.
///
/// Best-effort: implementors absorb their own failures; the synchronizer
/// does not observe them.
#[async_trait]
pub trait LeaderboardSink: Send + Sync {
    async fn update_user_stats(&self, user_id: &str, profile: &UserProfile);
}
