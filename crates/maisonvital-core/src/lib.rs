//! # Maison Vital Core Library
//!
//! This library provides the state and scoring engine of Maison Vital, a
//! home-maintenance tracker. A CLI binary drives every operation; any other
//! front end is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Catalog**: immutable, id-indexed list of maintainable assets
//! - **Review Engine**: state machine walking the user through a queue of
//!   assets and committing one outcome per card
//! - **Health/XP**: pure functions for the health score, the level curve and
//!   task rewards
//! - **Badges**: monotone achievement predicates with idempotent unlocks
//! - **Storage**: persisted-state contract, SQLite kv store and TOML config
//!
//! ## Key Components
//!
//! - [`ReviewEngine`]: Review state machine
//! - [`HomeState`]: Tracked inventory, task records and user progress
//! - [`Database`]: Persistence of the home record
//! - [`Config`]: Application configuration management

pub mod badges;
pub mod catalog;
pub mod error;
pub mod events;
pub mod health;
pub mod home;
pub mod progress;
pub mod review;
pub mod storage;

pub use badges::{check_badges, Badge, BADGES};
pub use catalog::{AssetDefinition, Catalog, Severity};
pub use error::{CatalogError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use health::{calculate_health_score, HealthEntry, TaskStatus};
pub use home::{AssetStatusView, HealthReport, HomeState};
pub use progress::{
    calculate_task_xp, sanitize_xp_grant, xp_for_next_level, GameStats, UserProgress, XpGrant,
};
pub use review::{ReviewAction, ReviewCard, ReviewEngine, ReviewPhase};
pub use storage::{Config, Database, MemoryStore, PersistedState, StateStore, TaskRecord};
