//! MongoDB-backed profile store.

use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use tracing::info;

use crate::config::StoreConfig;
use crate::store::{ProfileStore, StoreError};

/// [`ProfileStore`] implementation over a MongoDB collection.
///
/// Profiles are keyed by the `userId` field, enforced unique by index.
#[derive(Clone)]
pub struct MongoProfileStore {
    collection: Collection<Document>,
}

impl MongoProfileStore {
    /// Connect, verify the connection with a ping and apply indexes.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        info!("Connecting to MongoDB at {}", config.uri);

        // Use serverSelectionTimeoutMS to avoid hanging on an unreachable
        // backend
        let timeout_uri = if config.uri.contains('?') {
            format!(
                "{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000",
                config.uri
            )
        } else {
            format!(
                "{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000",
                config.uri
            )
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect: {e}")))?;

        client
            .database(&config.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(format!("ping failed: {e}")))?;

        info!("Connected to MongoDB database '{}'", config.db_name);

        let collection = client
            .database(&config.db_name)
            .collection::<Document>(&config.profile_collection);

        let store = Self { collection };
        store.apply_indexes().await?;

        Ok(store)
    }

    async fn apply_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to create indexes: {e}")))?;

        Ok(())
    }
}

fn map_error(e: mongodb::error::Error) -> StoreError {
    match e.kind.as_ref() {
        mongodb::error::ErrorKind::Authentication { message, .. } => {
            StoreError::Denied(message.clone())
        }
        _ => StoreError::Unavailable(e.to_string()),
    }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn load(&self, user_id: &str) -> Result<Option<Document>, StoreError> {
        self.collection
            .find_one(doc! { "userId": user_id })
            .await
            .map_err(map_error)
    }

    async fn save(&self, user_id: &str, mut fields: Document) -> Result<(), StoreError> {
        // The key field always wins over whatever the caller serialized
        fields.insert("userId", user_id);

        self.collection
            .replace_one(doc! { "userId": user_id }, fields)
            .upsert(true)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}
