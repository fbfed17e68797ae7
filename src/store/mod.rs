//! Profile document store.
//!
//! The durable home of user profiles is a hosted document database, reached
//! through the [`ProfileStore`] capability trait. [`MongoProfileStore`] is
//! the production implementation.

pub mod mongo;

pub use mongo::MongoProfileStore;

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

/// Store failure classification.
///
/// Absence of a document is `Ok(None)` on [`ProfileStore::load`], never an
/// error: the synchronizer creates a fresh profile only when the backend
/// positively reports that none exists.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or timed out. Retryable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the operation.
    #[error("store denied: {0}")]
    Denied(String),
}

/// Keyed access to the profile collection.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read the profile document for a user id, if one exists.
    async fn load(&self, user_id: &str) -> Result<Option<Document>, StoreError>;

    /// Write the full profile document for a user id, replacing any
    /// existing one.
    async fn save(&self, user_id: &str, fields: Document) -> Result<(), StoreError>;
}
