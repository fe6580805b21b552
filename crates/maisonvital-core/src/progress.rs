//! Experience points and levels.
//!
//! The XP curve is polynomial: leaving level `L` costs
//! `floor(BASE_XP * L^LEVEL_EXPONENT)` points. Surplus XP rolls over into the
//! next level, so a single large grant may cross several levels at once.

use serde::{Deserialize, Serialize};

use crate::catalog::AssetDefinition;

/// XP required to leave level 1.
pub const BASE_XP: f64 = 100.0;
/// Curvature of the level curve.
pub const LEVEL_EXPONENT: f64 = 1.5;
/// Flat XP for any completed task.
pub const BASE_TASK_XP: f64 = 50.0;
/// XP per estimated minute of work.
pub const TIME_BONUS: f64 = 2.0;
/// Bonus for tasks done at most twice a year.
pub const RARE_TASK_BONUS: f64 = 50.0;
/// Frequency (in months) from which a task counts as rare.
pub const RARE_TASK_MONTHS: u32 = 6;
/// XP for confirming that a task was done recently.
pub const RECENT_REVIEW_XP: u64 = 20;

/// Progress of the household owner.
///
/// Owned by [`crate::home::HomeState`]; there is no shared global copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u64,
    pub level: u32,
    /// Unlocked badge ids in unlock order.
    pub unlocked_badges: Vec<String>,
    pub total_tasks_completed: u64,
    /// Largest cost value of a single completed task.
    pub max_cost_saved: u32,
    pub health_score: u8,
    /// Tasks completed since the process started. Not persisted.
    #[serde(skip)]
    pub session_tasks: u32,
}

/// Persisted subset of [`UserProgress`].
///
/// Every field defaults so that records written by older versions load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default, alias = "unlockedBadges")]
    pub unlocked_badges: Vec<String>,
    #[serde(default, alias = "totalTasksCompleted")]
    pub total_tasks_completed: u64,
    #[serde(default, alias = "maxCostSaved")]
    pub max_cost_saved: u32,
    #[serde(default = "default_health_score", alias = "healthScore")]
    pub health_score: u8,
}

fn default_level() -> u32 {
    1
}

fn default_health_score() -> u8 {
    100
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            xp: 0,
            level: default_level(),
            unlocked_badges: Vec::new(),
            total_tasks_completed: 0,
            max_cost_saved: 0,
            health_score: default_health_score(),
        }
    }
}

/// Result of an XP grant, for progress bars and level-up notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGrant {
    /// Granted amount after sanitizing.
    pub amount: u64,
    /// XP within the current level after rollover.
    pub xp: u64,
    pub level: u32,
    /// XP needed to leave the current level.
    pub next_level_xp: u64,
    pub leveled_up: bool,
    pub levels_gained: u32,
}

impl UserProgress {
    /// Fresh progress: level 1, no XP, vacuously healthy home.
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 1,
            unlocked_badges: Vec::new(),
            total_tasks_completed: 0,
            max_cost_saved: 0,
            health_score: default_health_score(),
            session_tasks: 0,
        }
    }

    /// Rebuild progress from persisted statistics.
    ///
    /// Repairs what older or hand-edited records may contain: level 0 is
    /// raised to 1, the health score is clamped, duplicate and unknown badge
    /// ids are dropped (first occurrence wins).
    pub fn rehydrate(stats: GameStats) -> Self {
        let mut unlocked_badges: Vec<String> = Vec::with_capacity(stats.unlocked_badges.len());
        for id in stats.unlocked_badges {
            if crate::badges::find(&id).is_none() {
                tracing::debug!(badge = %id, "dropping unknown badge id");
                continue;
            }
            if !unlocked_badges.contains(&id) {
                unlocked_badges.push(id);
            }
        }
        Self {
            xp: stats.xp,
            level: stats.level.max(1),
            unlocked_badges,
            total_tasks_completed: stats.total_tasks_completed,
            max_cost_saved: stats.max_cost_saved,
            health_score: stats.health_score.min(100),
            session_tasks: 0,
        }
    }

    /// Snapshot of the persisted fields.
    pub fn to_stats(&self) -> GameStats {
        GameStats {
            xp: self.xp,
            level: self.level,
            unlocked_badges: self.unlocked_badges.clone(),
            total_tasks_completed: self.total_tasks_completed,
            max_cost_saved: self.max_cost_saved,
            health_score: self.health_score,
        }
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.unlocked_badges.iter().any(|b| b == id)
    }

    /// XP needed to leave the current level.
    pub fn next_level_xp(&self) -> u64 {
        xp_for_next_level(self.level)
    }

    /// 0.0 .. 100.0 progress within the current level.
    pub fn level_progress_pct(&self) -> f64 {
        let needed = self.next_level_xp();
        if needed == 0 {
            return 0.0;
        }
        (self.xp as f64 / needed as f64 * 100.0).min(100.0)
    }

    /// Add XP and apply every level-up it pays for.
    pub fn add_xp(&mut self, amount: u64) -> XpGrant {
        self.xp = self.xp.saturating_add(amount);

        let mut needed = xp_for_next_level(self.level);
        let mut levels_gained = 0;
        while self.xp >= needed {
            self.xp -= needed;
            self.level += 1;
            levels_gained += 1;
            needed = xp_for_next_level(self.level);
        }

        if levels_gained > 0 {
            tracing::info!(level = self.level, levels_gained, "level up");
        }

        XpGrant {
            amount,
            xp: self.xp,
            level: self.level,
            next_level_xp: needed,
            leveled_up: levels_gained > 0,
            levels_gained,
        }
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// XP needed to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (BASE_XP * (level.max(1) as f64).powf(LEVEL_EXPONENT)).floor() as u64
}

/// Clamp a raw grant to a non-negative whole amount.
///
/// Negative, NaN and infinite inputs yield 0.
pub fn sanitize_xp_grant(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.round() as u64
}

/// XP for completing the maintenance of `asset`.
///
/// Rewards effort (duration) and rarity (frequency of six months or more).
pub fn calculate_task_xp(asset: &AssetDefinition) -> u64 {
    let mut xp = BASE_TASK_XP + asset.duration_minutes as f64 * TIME_BONUS;
    if asset.frequency_months >= RARE_TASK_MONTHS {
        xp += RARE_TASK_BONUS;
    }
    sanitize_xp_grant(xp)
}
