use maisonvital_core::Config;

use super::{open_engine, print_json, CmdResult};

pub fn run(asset_id: &str) -> CmdResult {
    let config = Config::load_or_default();
    let mut engine = open_engine(&config)?;
    let events = engine.quick_fix(asset_id)?;
    print_json(&events)
}
