//! Key-value persistence for client-side stores.
//!
//! Each store is written as a single JSON blob under its own key. The
//! [`KeyValueStorage`] trait is the whole contract the rest of the crate relies
//! on; [`SqliteStorage`] implements it on top of the `store_blobs` table.
//! There is no schema versioning: a blob that no longer decodes into the
//! current store shape surfaces as [`Error::CorruptStore`].

use crate::{
    entities::{StoreBlob, store_blob},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use tracing::{debug, instrument};

/// Opaque get/set blob storage keyed by store name.
pub trait KeyValueStorage {
    /// Returns the blob stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// A store that knows its own storage key.
pub trait PersistedStore: Serialize + DeserializeOwned + Default {
    /// Key the serialized snapshot is stored under
    const STORAGE_KEY: &'static str;
}

/// [`KeyValueStorage`] backed by the `store_blobs` table.
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    db: DatabaseConnection,
}

impl SqliteStorage {
    /// Wraps a connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl KeyValueStorage for SqliteStorage {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let blob = StoreBlob::find()
            .filter(store_blob::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        debug!(found = blob.is_some(), "Read store blob");
        Ok(blob.map(|row| row.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now();

        let existing = StoreBlob::find()
            .filter(store_blob::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let mut active_model: store_blob::ActiveModel = row.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_row = store_blob::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_row.insert(&self.db).await?;
        }

        debug!("Wrote store blob");
        Ok(())
    }
}

/// Loads a store snapshot, or the store's default when nothing was saved yet.
///
/// # Errors
/// Returns `Error::CorruptStore` when the saved blob does not decode, and
/// propagates storage errors.
pub async fn load_store<S, K>(storage: &K) -> Result<S>
where
    S: PersistedStore,
    K: KeyValueStorage + Sync,
{
    match storage.get(S::STORAGE_KEY).await? {
        Some(blob) => serde_json::from_str(&blob).map_err(|source| Error::CorruptStore {
            key: S::STORAGE_KEY.to_string(),
            source,
        }),
        None => Ok(S::default()),
    }
}

/// Serializes a store snapshot and writes it under the store's key.
pub async fn save_store<S, K>(storage: &K, store: &S) -> Result<()>
where
    S: PersistedStore + Sync,
    K: KeyValueStorage + Sync,
{
    let blob = serde_json::to_string(store)?;
    storage.set(S::STORAGE_KEY, &blob).await
}
