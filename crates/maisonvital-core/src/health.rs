//! Home health score.
//!
//! The score measures how current the maintenance of the tracked assets is.
//! Each overdue task adds a penalty scaled by the asset severity; a damping
//! factor spreads the penalties over large inventories so that one missed
//! task weighs less in a house with many assets.
//!
//! ```text
//! damping = max(1, log10(n) * 2)
//! urgent  -> 25 * weight / damping
//! late    -> 10 * weight / damping
//! score   = round(clamp(100 - penalties, 0, 100))
//! ```

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{AssetDefinition, Severity};
use crate::progress::UserProgress;

/// Score of a home without tracked assets.
pub const PERFECT_SCORE: u8 = 100;
/// Penalty of a never-done or skipped task before weighting.
pub const URGENT_PENALTY: f64 = 25.0;
/// Penalty of an overdue task before weighting.
pub const LATE_PENALTY: f64 = 10.0;

/// Maintenance status of a tracked asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Done within its frequency window.
    #[serde(alias = "done")]
    Ok,
    /// Done once, but the frequency window has elapsed.
    #[serde(alias = "old")]
    Late,
    /// Never done, or explicitly left undone.
    Urgent,
}

impl TaskStatus {
    /// Unweighted penalty for this status.
    pub fn base_penalty(&self) -> f64 {
        match self {
            TaskStatus::Ok => 0.0,
            TaskStatus::Late => LATE_PENALTY,
            TaskStatus::Urgent => URGENT_PENALTY,
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, TaskStatus::Ok)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Ok => "ok",
            TaskStatus::Late => "late",
            TaskStatus::Urgent => "urgent",
        };
        f.write_str(s)
    }
}

/// One input row of the health computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthEntry {
    pub severity: Severity,
    pub status: TaskStatus,
}

impl HealthEntry {
    pub fn new(asset: &AssetDefinition, status: TaskStatus) -> Self {
        Self {
            severity: asset.severity,
            status,
        }
    }
}

/// Divisor applied to every penalty for an inventory of `task_count` assets.
pub fn damping_factor(task_count: usize) -> f64 {
    if task_count == 0 {
        return 1.0;
    }
    ((task_count as f64).log10() * 2.0).max(1.0)
}

/// Compute the health score of the complete list of tracked assets.
///
/// Always pass every tracked asset: the damping depends on the list length,
/// so a partial list yields a different score.
pub fn calculate_health_score(entries: &[HealthEntry]) -> u8 {
    if entries.is_empty() {
        return PERFECT_SCORE;
    }

    let damping = damping_factor(entries.len());
    let penalty: f64 = entries
        .iter()
        .map(|e| e.status.base_penalty() * e.severity.weight() / damping)
        .sum();

    (100.0 - penalty).clamp(0.0, 100.0).round() as u8
}

/// Derive the status of an asset from its last completion.
///
/// The due date adds `frequency_months` calendar months to `last_done`
/// (clamped to the end of shorter months).
pub fn derive_status(
    asset: &AssetDefinition,
    last_done: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TaskStatus {
    let Some(done_at) = last_done else {
        return TaskStatus::Urgent;
    };
    match due_date(done_at, asset.frequency_months) {
        Some(due) if now > due => TaskStatus::Late,
        Some(_) => TaskStatus::Ok,
        // Beyond the representable range: never due.
        None => TaskStatus::Ok,
    }
}

/// Instant after which a task done at `done_at` is overdue.
pub fn due_date(done_at: DateTime<Utc>, frequency_months: u32) -> Option<DateTime<Utc>> {
    done_at.checked_add_months(Months::new(frequency_months))
}

impl UserProgress {
    /// Recompute and store the health score from the full task list.
    pub fn recalculate_health(&mut self, entries: &[HealthEntry]) -> u8 {
        self.health_score = calculate_health_score(entries);
        self.health_score
    }
}
