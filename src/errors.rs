//! Unified error type for the crate.
//!
//! Validation failures are raised at the input boundary (drafts, login, config)
//! and never by the aggregation functions, which degrade to zero values instead.

use thiserror::Error;

/// Every failure the crate reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Storage backend failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report template failure
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Amount is not a finite number in range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Email is not `local@domain`
    #[error("Invalid email address: {email}")]
    InvalidEmail {
        /// The rejected address, trimmed
        email: String,
    },

    /// Required input left blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Serialized name of the field
        field: &'static str,
    },

    /// Input could not be parsed or is out of range
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Serialized name of the field
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// No record with the given id
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record looked up
        entity: &'static str,
        /// Id that matched nothing
        id: String,
    },

    /// A persisted blob does not decode into its store
    #[error("Stored data under '{key}' could not be decoded: {source}")]
    CorruptStore {
        /// Storage key of the blob
        key: String,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
