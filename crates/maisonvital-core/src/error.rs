//! Core error types for maisonvital-core.
//!
//! Every fallible operation in the library returns [`CoreError`]. None of the
//! variants is fatal: the engine always keeps its last valid configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::review::ReviewPhase;

/// Core error type for maisonvital-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A review was requested without any trackable asset.
    #[error("Empty selection: pick at least one asset before starting a review")]
    EmptySelection,

    /// The id does not name an asset of the catalog.
    #[error("Asset not found in catalog: {asset_id}")]
    AssetNotFound { asset_id: String },

    /// The action is not allowed in the current review phase.
    #[error("Invalid transition: cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: ReviewPhase,
    },

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog import errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Recoverable user-facing errors, as opposed to infrastructure failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::EmptySelection
                | CoreError::AssetNotFound { .. }
                | CoreError::InvalidTransition { .. }
        )
    }
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the state database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Persisted state could not be decoded
    #[error("Corrupt persisted state under '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Catalog import errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two definitions share the same id
    #[error("Duplicate asset id in catalog: {0}")]
    DuplicateId(String),

    /// A definition violates a field constraint
    #[error("Invalid asset '{asset_id}': {message}")]
    InvalidAsset { asset_id: String, message: String },

    /// The catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
