//! Mapping between [`UserProfile`] and the stored field document.
//!
//! The store holds a flat mapping (`userId`, `username`, ..., nested `stats`
//! and `preferences`, a list of achievement mappings). Reads are total:
//! unknown fields are ignored and missing fields take defaults, so documents
//! from any client version load.

use bson::Document;
use serde::{Deserialize, Deserializer};

use super::UserProfile;
use crate::types::RotundaError;

/// Serialize a profile to its stored field mapping.
///
/// In-memory-only fields (`latestAchievement`, vote history, match scores)
/// are not written.
pub fn to_document(profile: &UserProfile) -> Result<Document, RotundaError> {
    bson::to_document(profile).map_err(|e| RotundaError::Profile(format!("serialize: {e}")))
}

/// Deserialize a stored field mapping into a profile.
///
/// Total over well-typed documents: missing fields default. A field holding
/// a value of an unusable type is an error, not an empty profile.
pub fn from_document(doc: Document) -> Result<UserProfile, RotundaError> {
    bson::from_document(doc).map_err(|e| RotundaError::Profile(format!("deserialize: {e}")))
}

/// Accept an epoch-millisecond timestamp stored as an integer, a double, or
/// a string-encoded integer. Older clients wrote `joinDate` as a string;
/// everything this crate writes is numeric.
pub(crate) fn de_epoch_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v as i64),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("unparseable epoch: {s:?}"))),
    }
}
