//! Configuration for the hosted profile store.

/// Connection settings for the document database backing user profiles.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection URI
    pub uri: String,

    /// Database name
    pub db_name: String,

    /// Collection holding user profile documents
    pub profile_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            db_name: "rotunda".to_string(),
            profile_collection: "profiles".to_string(),
        }
    }
}
