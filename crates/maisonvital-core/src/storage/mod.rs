mod config;
pub mod database;
mod state;

pub use config::{CatalogConfig, Config, LogConfig, ReviewConfig};
pub use database::Database;
pub use state::{MemoryStore, PersistedState, StateStore, TaskRecord};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `MAISONVITAL_HOME` overrides the location. Otherwise the directory is
/// `~/.config/maisonvital[-dev]/` based on `MAISONVITAL_ENV`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("MAISONVITAL_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("MAISONVITAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("maisonvital-dev")
            } else {
                base_dir.join("maisonvital")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
