use clap::Subcommand;
use maisonvital_core::{calculate_task_xp, Config};
use serde_json::json;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List every catalog asset
    List,
    /// Show one asset with its steps and products
    Show {
        /// Catalog asset id
        asset_id: String,
    },
}

pub fn run(action: CatalogAction) -> CmdResult {
    let catalog = Config::load_or_default().catalog()?;

    match action {
        CatalogAction::List => {
            let rows: Vec<_> = catalog
                .iter()
                .map(|asset| {
                    json!({
                        "id": asset.id,
                        "name": asset.name,
                        "category": asset.category,
                        "severity": asset.severity,
                        "frequency_months": asset.frequency_months,
                        "duration_minutes": asset.duration_minutes,
                        "xp": calculate_task_xp(asset),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        CatalogAction::Show { asset_id } => match catalog.get(&asset_id) {
            Some(asset) => print_json(asset)?,
            None => return Err(format!("asset not found: {asset_id}").into()),
        },
    }
    Ok(())
}
