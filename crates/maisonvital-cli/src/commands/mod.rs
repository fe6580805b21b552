pub mod catalog;
pub mod config;
pub mod quickfix;
pub mod review;
pub mod stats;
pub mod status;
pub mod track;

use maisonvital_core::{Config, Database, ReviewEngine};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Engine over the on-disk database and the configured catalog.
pub fn open_engine(config: &Config) -> Result<ReviewEngine<Database>, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let db = Database::open()?;
    Ok(ReviewEngine::load(catalog, db)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
