use maisonvital_core::{Config, BADGES};
use serde_json::json;

use super::{open_engine, print_json, CmdResult};

pub fn run() -> CmdResult {
    let config = Config::load_or_default();
    let engine = open_engine(&config)?;
    let progress = engine.progress();

    let badges: Vec<_> = BADGES
        .iter()
        .map(|badge| {
            json!({
                "id": badge.id,
                "name": badge.name,
                "description": badge.description,
                "icon": badge.icon,
                "unlocked": progress.has_badge(badge.id),
            })
        })
        .collect();

    print_json(&json!({
        "level": progress.level,
        "xp": progress.xp,
        "next_level_xp": progress.next_level_xp(),
        "level_progress_pct": progress.level_progress_pct(),
        "total_tasks_completed": progress.total_tasks_completed,
        "max_cost_saved": progress.max_cost_saved,
        "health_score": progress.health_score,
        "badges": badges,
    }))
}
