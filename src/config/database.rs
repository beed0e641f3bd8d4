//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. Creation is idempotent (`IF NOT EXISTS`), which lets the binary call
//! it on every start.

use crate::entities::StoreBlob;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Default database location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/ledger_buddy.sqlite?mode=rwc";

/// Resolves the database URL: `DATABASE_URL` from the environment wins,
/// then the configured value, then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn resolve_database_url(configured: Option<&str>) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| configured.map(ToString::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the given database URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut store_blob_table = schema.create_table_from_entity(StoreBlob);
    store_blob_table.if_not_exists();

    db.execute(builder.build(&store_blob_table)).await?;
    info!("Database tables are ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StoreBlobModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let rows: Vec<StoreBlobModel> = StoreBlob::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_resolve_database_url_prefers_configured_over_default() {
        // Only meaningful when DATABASE_URL is not exported in the test environment
        if std::env::var("DATABASE_URL").is_err() {
            assert_eq!(
                resolve_database_url(Some("sqlite::memory:")),
                "sqlite::memory:"
            );
            assert_eq!(resolve_database_url(None), DEFAULT_DATABASE_URL);
        }
    }
}
