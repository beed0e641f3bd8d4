//! Store blob entity - one JSON document per client-side store.
//!
//! Rows are keyed by the store's storage key (e.g. `"finance-storage"`) and
//! hold the serialized store snapshot as text. The blob shape is owned by the
//! store types in [`crate::stores`]; this table never inspects it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Store blob database model - one row per storage key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_blobs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"sales-storage"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized store snapshot
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the blob was last written
    pub updated_at: DateTimeUtc,
}

/// `StoreBlob` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
