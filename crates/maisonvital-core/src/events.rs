use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::TaskStatus;

/// Every state change in the engine produces events.
///
/// Transitions return their events to the caller, which decides how to
/// present them; the engine keeps no event buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ReviewStarted {
        total: usize,
        at: DateTime<Utc>,
    },
    /// A task record was created or overwritten.
    TaskRecorded {
        asset_id: String,
        status: TaskStatus,
        at: DateTime<Utc>,
    },
    XpGained {
        amount: u64,
        xp: u64,
        level: u32,
        next_level_xp: u64,
    },
    LevelUp {
        level: u32,
        levels_gained: u32,
    },
    BadgeUnlocked {
        badge_id: String,
        name: String,
    },
    /// A task was done on the spot; worth a celebration in the UI.
    Celebration {
        asset_id: String,
    },
    ReviewAdvanced {
        /// Zero-based index of the next card.
        index: usize,
        total: usize,
    },
    ReviewFinished {
        reviewed: usize,
        health_score: u8,
        at: DateTime<Utc>,
    },
    ReviewAborted {
        reviewed: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    HealthRecalculated {
        health_score: u8,
        urgent: usize,
        late: usize,
    },
    AssetTracked {
        asset_id: String,
    },
    AssetUntracked {
        asset_id: String,
    },
}

impl Event {
    /// Whether the event is a reward notice (level-up or badge).
    pub fn is_reward(&self) -> bool {
        matches!(self, Event::LevelUp { .. } | Event::BadgeUnlocked { .. })
    }
}
