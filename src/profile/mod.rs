//! User profile data model.
//!
//! [`UserProfile`] is the durable record of a citizen's civic-engagement
//! progress. It round-trips through the hosted document store as a flat
//! field mapping (see [`document`]); deserialization is total, so documents
//! written by older clients load with missing fields defaulted.

pub mod document;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Placeholder id used when authentication succeeds locally but the network
/// is unavailable. Offline profiles are never persisted.
pub const OFFLINE_USER_ID: &str = "offline_user";

/// Achievement granted once at profile creation.
pub const WELCOME_ACHIEVEMENT_ID: &str = "welcome_achievement";

/// Starting balance for a freshly created profile.
pub const STARTING_FREEDOM_BUCKS: i64 = 100;

/// Starting aggregate power score for a freshly created profile.
pub const STARTING_POWER_SCORE: i64 = 100;

/// Starting participation score for a freshly created profile.
pub const STARTING_PARTICIPATION: i64 = 5;

/// Rank assigned to every new citizen.
pub const DEFAULT_RANK: &str = "Citizen";

/// District assigned until the user picks one.
pub const DEFAULT_DISTRICT: &str = "Unknown";

const DEFAULT_AVATAR: &str = "🦅";

/// The durable user-facing record of civic-engagement progress.
///
/// The synchronizer is the sole writer while it runs; the value it produces
/// is published to the session cell for observers. `latest_achievement`,
/// `vote_history` and `match_scores` live in memory only and are not part of
/// the stored document.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier, equal to the identity provider's user id
    pub user_id: String,

    /// Display name
    pub username: String,

    /// Email address, empty for anonymous citizens
    pub email: String,

    /// Avatar reference (glyph or asset id)
    pub avatar: String,

    /// Epoch milliseconds of profile creation. Written as a number; older
    /// documents carrying a string-encoded epoch are accepted on read.
    #[serde(deserialize_with = "document::de_epoch_ms")]
    pub join_date: i64,

    /// Freedom-currency balance
    pub freedom_bucks: i64,

    /// Earned badge identifiers
    pub badges: Vec<String>,

    /// Mutable engagement counters
    pub stats: UserStats,

    /// Civic rank, e.g. "Citizen"
    pub political_rank: String,

    /// Electoral district
    pub district: String,

    /// Earned achievements, oldest first. Append-only from the
    /// synchronizer's perspective within a session.
    pub achievements: Vec<Achievement>,

    /// Display/behavior flags
    pub preferences: UserPreferences,

    /// Accumulated points
    pub patriot_points: i64,

    /// Most recently earned achievement. Always a member of `achievements`
    /// when set; derived in memory, never read back from the store.
    #[serde(skip)]
    pub latest_achievement: Option<Achievement>,

    /// Votes cast by this user, oldest first
    #[serde(skip_serializing)]
    pub vote_history: Vec<VoteRecord>,

    /// Match-percentage score per peer user id
    #[serde(skip_serializing)]
    pub match_scores: HashMap<String, f64>,
}

impl UserProfile {
    /// Build the initial profile for a first-time citizen.
    ///
    /// Seeds the stats, grants the welcome achievement and applies the
    /// default preferences and balances.
    pub fn new_citizen(identity: &Identity, now_ms: i64) -> Self {
        let welcome = Achievement::welcome(now_ms);

        Self {
            user_id: identity.user_id.clone(),
            username: derive_username(identity),
            email: identity.email.clone().unwrap_or_default(),
            avatar: DEFAULT_AVATAR.to_string(),
            join_date: now_ms,
            freedom_bucks: STARTING_FREEDOM_BUCKS,
            badges: Vec::new(),
            stats: UserStats::first_login(now_ms),
            political_rank: DEFAULT_RANK.to_string(),
            district: DEFAULT_DISTRICT.to_string(),
            achievements: vec![welcome.clone()],
            preferences: UserPreferences::default(),
            patriot_points: 0,
            latest_achievement: Some(welcome),
            vote_history: Vec::new(),
            match_scores: HashMap::new(),
        }
    }

    /// Build the non-persisted placeholder profile used when the identity
    /// provider is unreachable.
    pub fn offline(now_ms: i64) -> Self {
        Self {
            user_id: OFFLINE_USER_ID.to_string(),
            username: "Offline Patriot".to_string(),
            email: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            join_date: now_ms,
            freedom_bucks: STARTING_FREEDOM_BUCKS,
            badges: Vec::new(),
            stats: UserStats::first_login(now_ms),
            political_rank: DEFAULT_RANK.to_string(),
            district: DEFAULT_DISTRICT.to_string(),
            achievements: Vec::new(),
            preferences: UserPreferences::default(),
            patriot_points: 0,
            latest_achievement: None,
            vote_history: Vec::new(),
            match_scores: HashMap::new(),
        }
    }
}

fn derive_username(identity: &Identity) -> String {
    if let Some(name) = &identity.display_name {
        if !name.is_empty() {
            return name.clone();
        }
    }

    if let Some(email) = &identity.email {
        if let Some(local) = email.split('@').next() {
            if !local.is_empty() {
                return local.to_string();
            }
        }
    }

    let short: String = identity.user_id.chars().take(6).collect();
    format!("Patriot-{short}")
}

/// Mutable engagement counters, updated by the achievement collaborator on
/// daily login and read by the leaderboard.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub votes_cast: i64,
    pub laws_passed: i64,

    /// Consecutive-day login streak
    pub streak_days: i64,

    pub participation_score: i64,

    /// Count of positive interactions received
    pub positive_interactions: i64,

    /// Aggregate power score
    pub power_score: i64,

    /// Epoch milliseconds of the last recorded login
    pub last_login_timestamp: i64,
}

impl UserStats {
    /// Seed values for a profile created right now.
    pub fn first_login(now_ms: i64) -> Self {
        Self {
            votes_cast: 0,
            laws_passed: 0,
            streak_days: 1,
            participation_score: STARTING_PARTICIPATION,
            positive_interactions: 0,
            power_score: STARTING_POWER_SCORE,
            last_login_timestamp: now_ms,
        }
    }
}

/// Immutable once earned.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Icon glyph
    pub icon: String,

    /// Epoch milliseconds when earned
    pub date_earned: i64,
}

impl Achievement {
    /// The fixed achievement granted at profile creation.
    pub fn welcome(now_ms: i64) -> Self {
        Self {
            id: WELCOME_ACHIEVEMENT_ID.to_string(),
            title: "Welcome to the Republic".to_string(),
            description: "Created your citizen profile and joined the movement.".to_string(),
            icon: "🎖️".to_string(),
            date_earned: now_ms,
        }
    }
}

/// User-controlled display/behavior flags.
///
/// Defaulted at profile creation; this core never mutates them afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,

    #[serde(default = "default_true")]
    pub sound_effects: bool,

    #[serde(default = "default_true")]
    pub show_on_leaderboard: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            sound_effects: true,
            show_on_leaderboard: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A single vote cast on a bill.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub bill_id: String,
    pub bill_title: String,
    pub vote: VoteChoice,

    /// Epoch milliseconds when the vote was cast
    pub cast_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yea,
    Nay,
}

/// One row of a leaderboard, produced by the external leaderboard service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub patriot_points: i64,
}
