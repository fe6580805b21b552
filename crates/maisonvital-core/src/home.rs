//! Aggregate state of the household.
//!
//! [`HomeState`] owns everything that survives a restart: the tracked
//! inventory, one [`TaskRecord`] per tracked asset and the user's
//! [`UserProgress`]. It knows how to recompute the health score from scratch
//! and how to reconcile itself against the catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{AssetDefinition, Catalog, Severity};
use crate::health::{derive_status, due_date, HealthEntry, TaskStatus};
use crate::progress::UserProgress;
use crate::storage::{PersistedState, TaskRecord};

/// Result of a full health recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub score: u8,
    pub urgent: usize,
    pub late: usize,
}

/// Dashboard row for one tracked asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetStatusView {
    pub asset_id: String,
    pub name: String,
    pub severity: Severity,
    pub status: TaskStatus,
    pub last_done: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
    pub frequency_months: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    tracked: Vec<String>,
    tasks: BTreeMap<String, TaskRecord>,
    progress: UserProgress,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted record.
    ///
    /// Unknown ids are kept until the next save; see [`HomeState::prune`].
    pub fn from_persisted(state: PersistedState) -> Self {
        let mut tracked: Vec<String> = Vec::with_capacity(state.tracked.len());
        for id in state.tracked {
            if !tracked.contains(&id) {
                tracked.push(id);
            }
        }
        Self {
            tracked,
            tasks: state.tasks,
            progress: UserProgress::rehydrate(state.stats),
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            tracked: self.tracked.clone(),
            tasks: self.tasks.clone(),
            stats: self.progress.to_stats(),
        }
    }

    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    pub fn is_tracked(&self, asset_id: &str) -> bool {
        self.tracked.iter().any(|id| id == asset_id)
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskRecord> {
        &self.tasks
    }

    pub fn record(&self, asset_id: &str) -> Option<&TaskRecord> {
        self.tasks.get(asset_id)
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut UserProgress {
        &mut self.progress
    }

    /// Replace the tracked inventory with the catalog assets named in `ids`.
    ///
    /// The list is stored in catalog order; records of assets that are no
    /// longer tracked are dropped.
    pub fn set_tracked<S: AsRef<str>>(&mut self, catalog: &Catalog, ids: &[S]) {
        self.tracked = catalog
            .select(ids)
            .into_iter()
            .map(|a| a.id.clone())
            .collect();
        self.prune(catalog);
    }

    /// Add one asset to the tracked inventory. Returns false if already tracked.
    pub fn track(&mut self, catalog: &Catalog, asset_id: &str) -> bool {
        if self.is_tracked(asset_id) {
            return false;
        }
        let mut ids = self.tracked.clone();
        ids.push(asset_id.to_string());
        self.set_tracked(catalog, &ids);
        self.is_tracked(asset_id)
    }

    /// Remove one asset and its record. Returns false if it was not tracked.
    pub fn untrack(&mut self, asset_id: &str) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|id| id != asset_id);
        self.tasks.remove(asset_id);
        self.tracked.len() != before
    }

    pub fn set_record(&mut self, asset_id: &str, record: TaskRecord) {
        self.tasks.insert(asset_id.to_string(), record);
    }

    /// Drop tracked ids unknown to the catalog and records of untracked assets.
    pub fn prune(&mut self, catalog: &Catalog) {
        let before = (self.tracked.len(), self.tasks.len());
        self.tracked.retain(|id| catalog.contains(id));
        let tracked = &self.tracked;
        self.tasks.retain(|id, _| tracked.iter().any(|t| t == id));
        let after = (self.tracked.len(), self.tasks.len());
        if before != after {
            tracing::debug!(
                tracked_dropped = before.0 - after.0,
                records_dropped = before.1 - after.1,
                "pruned orphaned ids"
            );
        }
    }

    /// Tracked assets resolved against the catalog, in tracked order.
    pub fn tracked_assets<'c>(&self, catalog: &'c Catalog) -> Vec<&'c AssetDefinition> {
        self.tracked.iter().filter_map(|id| catalog.get(id)).collect()
    }

    /// Derived status of one tracked asset at `now`.
    pub fn status_of(&self, asset: &AssetDefinition, now: DateTime<Utc>) -> TaskStatus {
        let last_done = self.tasks.get(&asset.id).and_then(|r| r.last_done);
        derive_status(asset, last_done, now)
    }

    /// Recompute every tracked asset's status and the health score.
    ///
    /// Stored records take the derived status; assets without a record get
    /// none, since "never done" is already their derived state.
    pub fn recalculate(&mut self, catalog: &Catalog, now: DateTime<Utc>) -> HealthReport {
        let mut entries = Vec::with_capacity(self.tracked.len());
        let mut urgent = 0;
        let mut late = 0;
        for asset in self.tracked_assets(catalog) {
            let status = self.status_of(asset, now);
            match status {
                TaskStatus::Urgent => urgent += 1,
                TaskStatus::Late => late += 1,
                TaskStatus::Ok => {}
            }
            if let Some(record) = self.tasks.get_mut(&asset.id) {
                record.status = status;
            }
            entries.push(HealthEntry::new(asset, status));
        }
        let score = self.progress.recalculate_health(&entries);
        tracing::debug!(score, urgent, late, assets = entries.len(), "health recalculated");
        HealthReport {
            score,
            urgent,
            late,
        }
    }

    /// Per-asset status for dashboards: urgent first, then late, then ok.
    ///
    /// Within a status, assets keep their tracked order.
    pub fn dashboard(&self, catalog: &Catalog, now: DateTime<Utc>) -> Vec<AssetStatusView> {
        let mut rows: Vec<AssetStatusView> = self
            .tracked_assets(catalog)
            .into_iter()
            .map(|asset| {
                let last_done = self.tasks.get(&asset.id).and_then(|r| r.last_done);
                AssetStatusView {
                    asset_id: asset.id.clone(),
                    name: asset.name.clone(),
                    severity: asset.severity,
                    status: derive_status(asset, last_done, now),
                    last_done,
                    due_at: last_done.and_then(|d| due_date(d, asset.frequency_months)),
                    duration_minutes: asset.duration_minutes,
                    frequency_months: asset.frequency_months,
                }
            })
            .collect();
        rows.sort_by_key(|row| match row.status {
            TaskStatus::Urgent => 0,
            TaskStatus::Late => 1,
            TaskStatus::Ok => 2,
        });
        rows
    }

    /// Minutes of maintenance currently owed (urgent and late assets).
    pub fn time_debt_minutes(&self, catalog: &Catalog, now: DateTime<Utc>) -> u32 {
        self.tracked_assets(catalog)
            .into_iter()
            .filter(|asset| self.status_of(asset, now).needs_attention())
            .map(|asset| asset.duration_minutes)
            .sum()
    }
}
