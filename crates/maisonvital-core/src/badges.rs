//! Badge registry and unlock evaluation.
//!
//! Badges are achievements unlocked once a predicate over [`UserProgress`]
//! holds. Predicates only read monotone statistics, and unlocks are never
//! revoked.

use serde::Serialize;
use std::fmt;

use crate::catalog::AssetDefinition;
use crate::progress::UserProgress;

/// A named achievement.
#[derive(Clone, Copy, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(skip)]
    condition: fn(&UserProgress) -> bool,
}

impl fmt::Debug for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Badge").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Badge {
    pub fn is_satisfied(&self, progress: &UserProgress) -> bool {
        (self.condition)(progress)
    }
}

/// Every badge, in evaluation and display order.
pub static BADGES: &[Badge] = &[
    Badge {
        id: "first_step",
        name: "First Step",
        description: "Complete your first maintenance task",
        icon: "fa-shoe-prints",
        condition: |p| p.total_tasks_completed >= 1,
    },
    Badge {
        id: "handyman",
        name: "Handyman",
        description: "Complete 10 maintenance tasks",
        icon: "fa-screwdriver-wrench",
        condition: |p| p.total_tasks_completed >= 10,
    },
    Badge {
        id: "house_keeper",
        name: "House Keeper",
        description: "Complete 50 maintenance tasks",
        icon: "fa-house-circle-check",
        condition: |p| p.total_tasks_completed >= 50,
    },
    Badge {
        id: "session_streak",
        name: "On a Roll",
        description: "Complete 3 tasks in a single session",
        icon: "fa-fire-flame-curved",
        condition: |p| p.session_tasks >= 3,
    },
    Badge {
        id: "thrifty",
        name: "Thrifty",
        description: "Prevent a repair worth 100 or more",
        icon: "fa-piggy-bank",
        condition: |p| p.max_cost_saved >= 100,
    },
    Badge {
        id: "big_saver",
        name: "Big Saver",
        description: "Prevent a repair worth 500 or more",
        icon: "fa-sack-dollar",
        condition: |p| p.max_cost_saved >= 500,
    },
    Badge {
        id: "level_5",
        name: "Seasoned",
        description: "Reach level 5",
        icon: "fa-star",
        condition: |p| p.level >= 5,
    },
    Badge {
        id: "level_10",
        name: "Master of the House",
        description: "Reach level 10",
        icon: "fa-crown",
        condition: |p| p.level >= 10,
    },
];

/// Look up a badge by id.
pub fn find(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

/// Record a completion (if any) and unlock every newly satisfied badge.
///
/// With `completed`, the completion counters and the largest-cost statistic
/// are updated first. Returns the new unlocks in registry order; calling it
/// again with unchanged statistics returns nothing.
pub fn check_badges(
    progress: &mut UserProgress,
    completed: Option<&AssetDefinition>,
) -> Vec<&'static Badge> {
    if let Some(asset) = completed {
        progress.total_tasks_completed += 1;
        progress.session_tasks += 1;
        if let Some(cost) = asset.cost_value {
            progress.max_cost_saved = progress.max_cost_saved.max(cost);
        }
    }

    let mut unlocked = Vec::new();
    for badge in BADGES {
        if progress.has_badge(badge.id) || !badge.is_satisfied(progress) {
            continue;
        }
        progress.unlocked_badges.push(badge.id.to_string());
        tracing::info!(badge = badge.id, "badge unlocked");
        unlocked.push(badge);
    }
    unlocked
}
