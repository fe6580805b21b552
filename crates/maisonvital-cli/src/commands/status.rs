use chrono::Utc;
use maisonvital_core::Config;
use serde_json::json;

use super::{open_engine, print_json, CmdResult};

pub fn run() -> CmdResult {
    let config = Config::load_or_default();
    let mut engine = open_engine(&config)?;

    let now = Utc::now();
    let report = engine.refresh_at(now)?;
    let assets = engine.dashboard(now);
    let time_debt = engine.home().time_debt_minutes(engine.catalog(), now);

    print_json(&json!({
        "health_score": report.score,
        "urgent": report.urgent,
        "late": report.late,
        "time_debt_minutes": time_debt,
        "assets": assets,
    }))
}
