//! Entity module - SeaORM entity definitions for the database.
//! The only table is the key-value blob table backing persisted stores.

pub mod store_blob;

pub use store_blob::{Column as StoreBlobColumn, Entity as StoreBlob, Model as StoreBlobModel};
