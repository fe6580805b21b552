//! Review state machine.
//!
//! The engine walks the user through a queue of assets, one card at a time,
//! and turns each answer into a task record, XP and badge unlocks. Outside a
//! review (dashboard context) assets can be quick-fixed and the tracked
//! inventory edited.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Reviewing(queue, index) -> Finished
//!           |                          |
//!           +-- abort --> Idle          +-- start_review --> Reviewing
//! ```
//!
//! Every transition is computed on a copy of the home state, saved, and only
//! then committed, so a rejected or failed transition changes nothing.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ReviewEngine::load(Catalog::builtin(), Database::open()?)?;
//! engine.start_review(&["asset_001", "asset_004"])?;
//! while engine.current_card().is_some() {
//!     let events = engine.submit_outcome(ReviewAction::DoNow)?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::badges::check_badges;
use crate::catalog::{AssetDefinition, Catalog};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::home::{AssetStatusView, HealthReport, HomeState};
use crate::progress::{calculate_task_xp, UserProgress, RECENT_REVIEW_XP};
use crate::storage::{StateStore, TaskRecord};

/// Answer given on a review card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// The task was done within its frequency window.
    #[serde(alias = "doneRecently")]
    DoneRecently,
    /// The user does the task right now.
    #[serde(alias = "doNow")]
    DoNow,
    /// The task is not done and stays pending.
    #[serde(alias = "notDone")]
    NotDone,
}

impl FromStr for ReviewAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "donerecently" | "recent" | "r" => Ok(ReviewAction::DoneRecently),
            "donow" | "now" | "d" => Ok(ReviewAction::DoNow),
            "notdone" | "later" | "n" => Ok(ReviewAction::NotDone),
            _ => Err(format!(
                "unknown review action '{s}' (expected done-recently, do-now or not-done)"
            )),
        }
    }
}

/// Coarse review phase, for queries and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewPhase {
    Idle,
    Reviewing,
    Finished,
}

impl fmt::Display for ReviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewPhase::Idle => "idle",
            ReviewPhase::Reviewing => "reviewing",
            ReviewPhase::Finished => "finished",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReviewState {
    Idle,
    /// Invariant: `index < queue.len()`.
    Reviewing {
        queue: Vec<String>,
        index: usize,
    },
    Finished,
}

impl ReviewState {
    fn phase(&self) -> ReviewPhase {
        match self {
            ReviewState::Idle => ReviewPhase::Idle,
            ReviewState::Reviewing { .. } => ReviewPhase::Reviewing,
            ReviewState::Finished => ReviewPhase::Finished,
        }
    }
}

/// The card currently shown to the user.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReviewCard<'a> {
    pub asset: &'a AssetDefinition,
    /// 1-based position in the queue.
    pub position: usize,
    pub total: usize,
}

/// Review state machine bound to a catalog and a state store.
pub struct ReviewEngine<S: StateStore> {
    catalog: Catalog,
    home: HomeState,
    state: ReviewState,
    store: S,
}

impl<S: StateStore> ReviewEngine<S> {
    /// Engine with an empty home. Nothing is read from `store`.
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            home: HomeState::new(),
            state: ReviewState::Idle,
            store,
        }
    }

    /// Engine rehydrated from the record saved in `store`.
    ///
    /// Orphaned ids in the record are tolerated and pruned at the next save.
    pub fn load(catalog: Catalog, store: S) -> Result<Self> {
        let home = match store.load()? {
            Some(state) => HomeState::from_persisted(state),
            None => HomeState::new(),
        };
        tracing::debug!(tracked = home.tracked().len(), "home state loaded");
        Ok(Self {
            catalog,
            home,
            state: ReviewState::Idle,
            store,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn progress(&self) -> &UserProgress {
        self.home.progress()
    }

    pub fn phase(&self) -> ReviewPhase {
        self.state.phase()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn current_card(&self) -> Option<ReviewCard<'_>> {
        match &self.state {
            ReviewState::Reviewing { queue, index } => {
                let asset = self.catalog.get(queue.get(*index)?)?;
                Some(ReviewCard {
                    asset,
                    position: index + 1,
                    total: queue.len(),
                })
            }
            _ => None,
        }
    }

    /// Per-asset derived status of the tracked inventory.
    pub fn dashboard(&self, now: DateTime<Utc>) -> Vec<AssetStatusView> {
        self.home.dashboard(&self.catalog, now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_review<T: AsRef<str>>(&mut self, selection: &[T]) -> Result<Vec<Event>> {
        self.start_review_at(selection, Utc::now())
    }

    /// Start a review of the selected assets.
    ///
    /// The queue holds the selected catalog assets in catalog order. Selected
    /// assets not yet tracked are added to the tracked inventory; nothing is
    /// untracked. An empty selection, or one naming no catalog asset, is
    /// rejected without any change.
    pub fn start_review_at<T: AsRef<str>>(
        &mut self,
        selection: &[T],
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        if matches!(self.state, ReviewState::Reviewing { .. }) {
            return Err(self.reject("start a review"));
        }
        let queue: Vec<String> = self
            .catalog
            .select(selection)
            .into_iter()
            .map(|a| a.id.clone())
            .collect();
        if queue.is_empty() {
            tracing::warn!(selected = selection.len(), "review rejected: empty selection");
            return Err(CoreError::EmptySelection);
        }

        let mut next = self.home.clone();
        let mut tracked = next.tracked().to_vec();
        tracked.extend(queue.iter().cloned());
        next.set_tracked(&self.catalog, &tracked);
        self.commit(next)?;

        let total = queue.len();
        self.state = ReviewState::Reviewing { queue, index: 0 };
        tracing::debug!(total, "review started");
        Ok(vec![Event::ReviewStarted { total, at: now }])
    }

    pub fn submit_outcome(&mut self, action: ReviewAction) -> Result<Vec<Event>> {
        self.submit_outcome_at(action, Utc::now())
    }

    /// Record the answer for the current card and move to the next one.
    ///
    /// The outcome is committed immediately. After the last card the engine
    /// recalculates the health of the whole tracked inventory and finishes.
    pub fn submit_outcome_at(
        &mut self,
        action: ReviewAction,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let (asset_id, index, total) = match &self.state {
            ReviewState::Reviewing { queue, index } => (queue[*index].clone(), *index, queue.len()),
            _ => return Err(self.reject("submit an outcome")),
        };
        let asset = self
            .catalog
            .get(&asset_id)
            .ok_or_else(|| CoreError::AssetNotFound {
                asset_id: asset_id.clone(),
            })?;

        let mut next = self.home.clone();
        let mut events = Vec::new();
        match action {
            ReviewAction::DoneRecently => {
                let record = TaskRecord::done(now);
                events.push(recorded(&asset_id, &record, now));
                next.set_record(&asset_id, record);
                reward(next.progress_mut(), RECENT_REVIEW_XP, asset, &mut events);
            }
            ReviewAction::DoNow => {
                let record = TaskRecord::done(now);
                events.push(recorded(&asset_id, &record, now));
                next.set_record(&asset_id, record);
                reward(next.progress_mut(), calculate_task_xp(asset), asset, &mut events);
                events.push(Event::Celebration {
                    asset_id: asset_id.clone(),
                });
            }
            ReviewAction::NotDone => {
                let record = TaskRecord::not_done();
                events.push(recorded(&asset_id, &record, now));
                next.set_record(&asset_id, record);
            }
        }

        let next_index = index + 1;
        let finished = next_index >= total;
        let report = finished.then(|| next.recalculate(&self.catalog, now));
        self.commit(next)?;

        tracing::debug!(asset = %asset_id, ?action, position = next_index, total, "outcome recorded");
        match report {
            Some(report) => {
                tracing::debug!(reviewed = total, "review finished");
                self.state = ReviewState::Finished;
                events.push(health_event(report));
                events.push(Event::ReviewFinished {
                    reviewed: total,
                    health_score: report.score,
                    at: now,
                });
            }
            None => {
                if let ReviewState::Reviewing { index, .. } = &mut self.state {
                    *index = next_index;
                }
                events.push(Event::ReviewAdvanced {
                    index: next_index,
                    total,
                });
            }
        }
        Ok(events)
    }

    /// Leave the review. Outcomes already submitted are kept.
    pub fn abort_review(&mut self) -> Result<Vec<Event>> {
        let (reviewed, total) = match &self.state {
            ReviewState::Reviewing { queue, index } => (*index, queue.len()),
            _ => return Err(self.reject("abort the review")),
        };
        self.state = ReviewState::Idle;
        tracing::debug!(reviewed, total, "review aborted");
        Ok(vec![Event::ReviewAborted {
            reviewed,
            total,
            at: Utc::now(),
        }])
    }

    pub fn quick_fix(&mut self, asset_id: &str) -> Result<Vec<Event>> {
        self.quick_fix_at(asset_id, Utc::now())
    }

    /// Mark an asset as done from the dashboard, outside any review.
    ///
    /// An untracked catalog asset is added to the tracked inventory.
    pub fn quick_fix_at(&mut self, asset_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        if matches!(self.state, ReviewState::Reviewing { .. }) {
            return Err(self.reject("quick-fix an asset"));
        }
        let asset = self.lookup(asset_id)?;

        let mut next = self.home.clone();
        let mut events = Vec::new();
        if next.track(&self.catalog, asset_id) {
            events.push(Event::AssetTracked {
                asset_id: asset_id.to_string(),
            });
        }
        let record = TaskRecord::done(now);
        events.push(recorded(asset_id, &record, now));
        next.set_record(asset_id, record);
        reward(next.progress_mut(), calculate_task_xp(asset), asset, &mut events);
        let report = next.recalculate(&self.catalog, now);
        self.commit(next)?;

        events.push(health_event(report));
        tracing::debug!(asset = %asset_id, health = report.score, "quick fix applied");
        Ok(events)
    }

    pub fn track(&mut self, asset_id: &str) -> Result<Vec<Event>> {
        self.track_at(asset_id, Utc::now())
    }

    /// Add an asset to the tracked inventory.
    pub fn track_at(&mut self, asset_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        if matches!(self.state, ReviewState::Reviewing { .. }) {
            return Err(self.reject("change tracked assets"));
        }
        self.lookup(asset_id)?;
        if self.home.is_tracked(asset_id) {
            return Ok(Vec::new());
        }

        let mut next = self.home.clone();
        next.track(&self.catalog, asset_id);
        let report = next.recalculate(&self.catalog, now);
        self.commit(next)?;
        Ok(vec![
            Event::AssetTracked {
                asset_id: asset_id.to_string(),
            },
            health_event(report),
        ])
    }

    pub fn untrack(&mut self, asset_id: &str) -> Result<Vec<Event>> {
        self.untrack_at(asset_id, Utc::now())
    }

    /// Remove an asset from the tracked inventory, dropping its record.
    pub fn untrack_at(&mut self, asset_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        if matches!(self.state, ReviewState::Reviewing { .. }) {
            return Err(self.reject("change tracked assets"));
        }
        if !self.home.is_tracked(asset_id) {
            return Ok(Vec::new());
        }

        let mut next = self.home.clone();
        next.untrack(asset_id);
        let report = next.recalculate(&self.catalog, now);
        self.commit(next)?;
        Ok(vec![
            Event::AssetUntracked {
                asset_id: asset_id.to_string(),
            },
            health_event(report),
        ])
    }

    /// Recompute statuses and the health score at `now`, then save.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<HealthReport> {
        let mut next = self.home.clone();
        let report = next.recalculate(&self.catalog, now);
        self.commit(next)?;
        Ok(report)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lookup(&self, asset_id: &str) -> Result<&AssetDefinition> {
        self.catalog
            .get(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound {
                asset_id: asset_id.to_string(),
            })
    }

    fn reject(&self, action: &'static str) -> CoreError {
        let phase = self.phase();
        tracing::warn!(action, %phase, "rejected transition");
        CoreError::InvalidTransition { action, phase }
    }

    /// Prune, save, then adopt `next`. On a save error nothing changes.
    fn commit(&mut self, mut next: HomeState) -> Result<()> {
        next.prune(&self.catalog);
        self.store.save(&next.to_persisted())?;
        self.home = next;
        Ok(())
    }
}

fn recorded(asset_id: &str, record: &TaskRecord, at: DateTime<Utc>) -> Event {
    Event::TaskRecorded {
        asset_id: asset_id.to_string(),
        status: record.status,
        at,
    }
}

fn health_event(report: HealthReport) -> Event {
    Event::HealthRecalculated {
        health_score: report.score,
        urgent: report.urgent,
        late: report.late,
    }
}

/// Grant XP for a completed asset and run the badge check.
fn reward(progress: &mut UserProgress, xp: u64, asset: &AssetDefinition, events: &mut Vec<Event>) {
    let grant = progress.add_xp(xp);
    events.push(Event::XpGained {
        amount: grant.amount,
        xp: grant.xp,
        level: grant.level,
        next_level_xp: grant.next_level_xp,
    });
    if grant.leveled_up {
        events.push(Event::LevelUp {
            level: grant.level,
            levels_gained: grant.levels_gained,
        });
    }
    for badge in check_badges(progress, Some(asset)) {
        events.push(Event::BadgeUnlocked {
            badge_id: badge.id.to_string(),
            name: badge.name.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::TaskStatus;
    use crate::storage::{MemoryStore, PersistedState};

    /// Store accepting `ok_saves` saves, then failing every one after.
    struct FailingStore {
        ok_saves: usize,
        saves: usize,
    }

    impl FailingStore {
        fn after(ok_saves: usize) -> Self {
            Self { ok_saves, saves: 0 }
        }
    }

    impl StateStore for FailingStore {
        fn load(&self) -> Result<Option<PersistedState>> {
            Ok(None)
        }

        fn save(&mut self, _state: &PersistedState) -> Result<()> {
            if self.saves >= self.ok_saves {
                return Err(std::io::Error::other("disk full").into());
            }
            self.saves += 1;
            Ok(())
        }
    }

    fn engine() -> ReviewEngine<MemoryStore> {
        ReviewEngine::new(Catalog::builtin(), MemoryStore::new())
    }

    #[test]
    fn starts_idle() {
        let engine = engine();
        assert_eq!(engine.phase(), ReviewPhase::Idle);
        assert!(engine.current_card().is_none());
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut engine = engine();
        let empty: [&str; 0] = [];
        assert!(matches!(
            engine.start_review(&empty),
            Err(CoreError::EmptySelection)
        ));
        assert!(matches!(
            engine.start_review(&["not_in_catalog"]),
            Err(CoreError::EmptySelection)
        ));
        assert_eq!(engine.phase(), ReviewPhase::Idle);
        assert_eq!(engine.store().save_count(), 0);
    }

    #[test]
    fn queue_follows_catalog_order() {
        let mut engine = engine();
        engine.start_review(&["asset_005", "asset_002"]).unwrap();
        let card = engine.current_card().unwrap();
        assert_eq!(card.asset.id, "asset_002");
        assert_eq!(card.position, 1);
        assert_eq!(card.total, 2);
    }

    #[test]
    fn submit_outside_review_is_invalid() {
        let mut engine = engine();
        let err = engine.submit_outcome(ReviewAction::DoNow).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                phase: ReviewPhase::Idle,
                ..
            }
        ));
        assert!(err.is_rejection());
    }

    #[test]
    fn done_recently_grants_flat_xp() {
        let mut engine = engine();
        engine.start_review(&["asset_005", "asset_006"]).unwrap();
        let events = engine.submit_outcome(ReviewAction::DoneRecently).unwrap();
        assert_eq!(engine.progress().xp, 20);
        assert!(events.iter().any(|e| matches!(e, Event::XpGained { amount: 20, .. })));
        assert!(!events.iter().any(|e| matches!(e, Event::Celebration { .. })));
        assert_eq!(engine.current_card().unwrap().position, 2);
    }

    #[test]
    fn do_now_grants_task_xp_and_celebrates() {
        let mut engine = engine();
        engine.start_review(&["asset_004", "asset_006"]).unwrap();
        let events = engine.submit_outcome(ReviewAction::DoNow).unwrap();
        // Smoke detector: 50 + 2 * 2 + 50 = 104 -> level 2 with 4 left.
        assert_eq!(engine.progress().level, 2);
        assert_eq!(engine.progress().xp, 4);
        assert!(events.iter().any(|e| matches!(e, Event::LevelUp { level: 2, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Celebration { asset_id } if asset_id == "asset_004")));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::BadgeUnlocked { badge_id, .. } if badge_id == "first_step")));
    }

    #[test]
    fn not_done_grants_nothing() {
        let mut engine = engine();
        engine.start_review(&["asset_001", "asset_002"]).unwrap();
        let events = engine.submit_outcome(ReviewAction::NotDone).unwrap();
        assert_eq!(engine.progress().xp, 0);
        assert_eq!(engine.progress().total_tasks_completed, 0);
        assert!(engine.progress().unlocked_badges.is_empty());
        assert!(!events.iter().any(|e| e.is_reward()));
        let record = engine.home().record("asset_001").unwrap();
        assert_eq!(record.status, TaskStatus::Urgent);
        assert!(record.last_done.is_none());
    }

    #[test]
    fn last_outcome_finishes_and_recalculates() {
        let mut engine = engine();
        engine.start_review(&["asset_004"]).unwrap();
        let events = engine.submit_outcome(ReviewAction::NotDone).unwrap();
        assert_eq!(engine.phase(), ReviewPhase::Finished);
        assert!(engine.current_card().is_none());
        // Critical and urgent alone: 100 - 75.
        assert_eq!(engine.progress().health_score, 25);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ReviewFinished { reviewed: 1, health_score: 25, .. })));
    }

    #[test]
    fn abort_keeps_committed_outcomes() {
        let mut engine = engine();
        engine
            .start_review(&["asset_001", "asset_002", "asset_003"])
            .unwrap();
        engine.submit_outcome(ReviewAction::DoNow).unwrap();
        let xp_before = engine.progress().clone();

        let events = engine.abort_review().unwrap();
        assert_eq!(engine.phase(), ReviewPhase::Idle);
        assert!(matches!(
            events[0],
            Event::ReviewAborted {
                reviewed: 1,
                total: 3,
                ..
            }
        ));
        assert_eq!(engine.progress(), &xp_before);
        assert!(engine.home().record("asset_001").is_some());
        assert!(engine.abort_review().is_err());
    }

    #[test]
    fn restart_after_finish() {
        let mut engine = engine();
        engine.start_review(&["asset_002"]).unwrap();
        engine.submit_outcome(ReviewAction::DoneRecently).unwrap();
        assert_eq!(engine.phase(), ReviewPhase::Finished);
        engine.start_review(&["asset_002"]).unwrap();
        assert_eq!(engine.phase(), ReviewPhase::Reviewing);
    }

    #[test]
    fn cannot_start_twice() {
        let mut engine = engine();
        engine.start_review(&["asset_002"]).unwrap();
        assert!(matches!(
            engine.start_review(&["asset_003"]),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(engine.current_card().unwrap().asset.id, "asset_002");
    }

    #[test]
    fn quick_fix_rejected_during_review() {
        let mut engine = engine();
        engine.start_review(&["asset_002"]).unwrap();
        assert!(matches!(
            engine.quick_fix("asset_002"),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn quick_fix_unknown_asset() {
        let mut engine = engine();
        let err = engine.quick_fix("asset_999").unwrap_err();
        assert!(matches!(err, CoreError::AssetNotFound { asset_id } if asset_id == "asset_999"));
        assert_eq!(engine.store().save_count(), 0);
    }

    #[test]
    fn quick_fix_tracks_untracked_asset() {
        let mut engine = engine();
        let events = engine.quick_fix("asset_003").unwrap();
        assert!(engine.home().is_tracked("asset_003"));
        assert!(matches!(events[0], Event::AssetTracked { .. }));
        assert_eq!(engine.progress().health_score, 100);
        assert_eq!(engine.phase(), ReviewPhase::Idle);
    }

    #[test]
    fn review_action_parsing() {
        assert_eq!("done-recently".parse::<ReviewAction>(), Ok(ReviewAction::DoneRecently));
        assert_eq!("doNow".parse::<ReviewAction>(), Ok(ReviewAction::DoNow));
        assert_eq!("not_done".parse::<ReviewAction>(), Ok(ReviewAction::NotDone));
        assert_eq!("n".parse::<ReviewAction>(), Ok(ReviewAction::NotDone));
        assert!("maybe".parse::<ReviewAction>().is_err());
    }

    #[test]
    fn subset_review_keeps_other_records() {
        let mut engine = engine();
        engine.track("asset_001").unwrap();
        engine.track("asset_004").unwrap();
        engine.quick_fix("asset_001").unwrap();
        let fixed = engine.home().record("asset_001").cloned();

        engine.start_review(&["asset_004"]).unwrap();
        assert_eq!(engine.current_card().unwrap().total, 1);
        assert_eq!(
            engine.home().tracked(),
            &["asset_001".to_string(), "asset_004".to_string()]
        );
        assert_eq!(engine.home().record("asset_001").cloned(), fixed);

        engine.submit_outcome(ReviewAction::NotDone).unwrap();
        assert_eq!(
            engine.home().record("asset_001").unwrap().status,
            TaskStatus::Ok
        );
    }

    #[test]
    fn review_selection_adds_untracked_assets() {
        let mut engine = engine();
        engine.track("asset_002").unwrap();
        engine.start_review(&["asset_006"]).unwrap();
        assert!(engine.home().is_tracked("asset_002"));
        assert!(engine.home().is_tracked("asset_006"));
    }

    #[test]
    fn failed_save_leaves_idle_engine_untouched() {
        let mut engine = ReviewEngine::new(Catalog::builtin(), FailingStore::after(0));

        assert!(matches!(
            engine.start_review(&["asset_001"]),
            Err(CoreError::Io(_))
        ));
        assert_eq!(engine.phase(), ReviewPhase::Idle);
        assert_eq!(engine.home(), &HomeState::new());

        assert!(engine.quick_fix("asset_001").is_err());
        assert_eq!(engine.phase(), ReviewPhase::Idle);
        assert_eq!(engine.progress().xp, 0);
        assert!(engine.home().tracked().is_empty());
        assert!(engine.home().tasks().is_empty());
    }

    #[test]
    fn failed_save_keeps_current_card() {
        let mut engine = ReviewEngine::new(Catalog::builtin(), FailingStore::after(1));
        engine.start_review(&["asset_002", "asset_004"]).unwrap();
        let before = engine.home().clone();

        assert!(engine.submit_outcome(ReviewAction::DoNow).is_err());
        assert_eq!(engine.phase(), ReviewPhase::Reviewing);
        assert_eq!(engine.current_card().unwrap().position, 1);
        assert_eq!(engine.home(), &before);
        assert_eq!(engine.progress().xp, 0);
        assert!(engine.home().record("asset_002").is_none());
    }

    #[test]
    fn track_and_untrack() {
        let mut engine = engine();
        assert_eq!(engine.track("asset_001").unwrap().len(), 2);
        assert!(engine.track("asset_001").unwrap().is_empty());
        assert_eq!(engine.progress().health_score, 25);
        assert!(matches!(
            engine.track("ghost"),
            Err(CoreError::AssetNotFound { .. })
        ));
        engine.untrack("asset_001").unwrap();
        assert!(engine.home().tracked().is_empty());
        assert_eq!(engine.progress().health_score, 100);
        assert!(engine.untrack("asset_001").unwrap().is_empty());
    }
}
