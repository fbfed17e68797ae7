//! Rotunda - session and profile core for a gamified civic-engagement
//! platform
//!
//! Rotunda owns the path from "process started" to "profile published": it
//! resumes or establishes an identity with the hosted identity provider,
//! loads or creates the citizen's profile document in the hosted store,
//! applies daily-login achievement bookkeeping, and publishes the result to
//! an observable session cell.
//!
//! ## Components
//!
//! - **Session bootstrap** ([`session::SessionService`]): startup resume,
//!   anonymous and federated sign-in, offline fallback, sign-out
//! - **Profile synchronizer** ([`session::ProfileSynchronizer`]):
//!   load-or-create with per-identity single-flight, achievement merge,
//!   leaderboard notification
//! - **Profile store** ([`store::MongoProfileStore`]): MongoDB-backed
//!   document persistence
//! - **Collaborator seams** ([`identity`], [`engagement`]): capability
//!   traits for the external identity, achievement and leaderboard services

pub mod config;
pub mod engagement;
pub mod identity;
pub mod profile;
pub mod session;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use session::{SessionCell, SessionPhase, SessionService, SessionState};
pub use types::{Result, RotundaError};
