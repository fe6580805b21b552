use clap::Subcommand;
use maisonvital_core::Config;

use super::{open_engine, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TrackAction {
    /// Start tracking assets
    Add {
        /// Catalog asset ids
        #[arg(required = true)]
        asset_ids: Vec<String>,
    },
    /// Stop tracking assets (their history is dropped)
    Remove {
        /// Catalog asset ids
        #[arg(required = true)]
        asset_ids: Vec<String>,
    },
    /// List tracked asset ids
    List,
}

pub fn run(action: TrackAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut engine = open_engine(&config)?;

    match action {
        TrackAction::Add { asset_ids } => {
            let mut events = Vec::new();
            for id in &asset_ids {
                events.extend(engine.track(id)?);
            }
            print_json(&events)?;
        }
        TrackAction::Remove { asset_ids } => {
            let mut events = Vec::new();
            for id in &asset_ids {
                events.extend(engine.untrack(id)?);
            }
            print_json(&events)?;
        }
        TrackAction::List => {
            print_json(engine.home().tracked())?;
        }
    }
    Ok(())
}
