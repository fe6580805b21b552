//! Persisted-state contract.
//!
//! The whole home is saved as one record and every save overwrites it.
//! Missing fields load as their zero value so that older records and partial
//! hand edits still open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::health::TaskStatus;
use crate::progress::GameStats;

/// Last known maintenance of one tracked asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, alias = "lastDone")]
    pub last_done: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
}

fn default_status() -> TaskStatus {
    TaskStatus::Urgent
}

impl TaskRecord {
    /// Maintenance done at `at`.
    pub fn done(at: DateTime<Utc>) -> Self {
        Self {
            last_done: Some(at),
            status: TaskStatus::Ok,
        }
    }

    /// Maintenance explicitly left undone.
    pub fn not_done() -> Self {
        Self {
            last_done: None,
            status: TaskStatus::Urgent,
        }
    }
}

/// The record that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// Tracked asset ids, in catalog order once saved.
    #[serde(default, alias = "selection")]
    pub tracked: Vec<String>,
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskRecord>,
    #[serde(default)]
    pub stats: GameStats,
}

impl PersistedState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Storage collaborator for the persisted record.
pub trait StateStore {
    /// Read the last saved record, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedState>>;

    /// Overwrite the saved record.
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// Store keeping the record in memory, serialized as it would be on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a raw JSON record.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            saves: 0,
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>> {
        self.json
            .as_deref()
            .map(PersistedState::from_json)
            .transpose()
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        self.json = Some(state.to_json()?);
        self.saves += 1;
        Ok(())
    }
}
