//! Inventory catalog.
//!
//! The catalog is the immutable list of maintainable assets. It is supplied
//! once at startup (built-in set or an imported JSON file) and indexed by id
//! so that lookups from the review engine do not scan the list.

mod builtin;
mod legacy;

pub use legacy::{classify_risk, LegacyAsset};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::CatalogError;

/// Risk class of an asset, set when the catalog is authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fire, legionella or other health hazards.
    Critical,
    /// Breakdowns and leaks.
    Moderate,
    /// Everything else.
    Minor,
}

impl Severity {
    /// Multiplier applied to health penalties.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 3.0,
            Severity::Moderate => 2.0,
            Severity::Minor => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A maintainable item of the home (water heater, smoke detector...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    /// Recommended interval between two maintenance passes.
    pub frequency_months: u32,
    /// Estimated effort for one pass.
    pub duration_minutes: u32,
    pub risk_description: String,
    pub severity: Severity,
    /// Monetary reference for the damage a pass prevents.
    #[serde(default)]
    pub cost_value: Option<u32>,
    /// Precomputed XP hint shown in catalogs. The engine uses
    /// [`crate::progress::calculate_task_xp`] instead.
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub climate_tags: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl AssetDefinition {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::InvalidAsset {
                asset_id: self.id.clone(),
                message: "id must not be empty".into(),
            });
        }
        if self.frequency_months == 0 {
            return Err(CatalogError::InvalidAsset {
                asset_id: self.id.clone(),
                message: "frequency_months must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Ordered, id-indexed asset list.
#[derive(Debug, Clone)]
pub struct Catalog {
    assets: Vec<AssetDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid definitions.
    pub fn new(assets: Vec<AssetDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(assets.len());
        for (pos, asset) in assets.iter().enumerate() {
            asset.validate()?;
            if index.insert(asset.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(asset.id.clone()));
            }
        }
        Ok(Self { assets, index })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        let assets = builtin::assets();
        let index = assets
            .iter()
            .enumerate()
            .map(|(pos, a)| (a.id.clone(), pos))
            .collect();
        Self { assets, index }
    }

    /// Import a JSON array of asset records.
    ///
    /// Records may omit `severity`; it is then derived from the risk text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<LegacyAsset> =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Self::new(records.into_iter().map(LegacyAsset::into_definition).collect())
    }

    /// Import a catalog file (see [`Catalog::from_json_str`]).
    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::ParseFailed(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), assets = catalog.len(), "catalog imported");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&AssetDefinition> {
        self.index.get(id).map(|&pos| &self.assets[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of the asset in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDefinition> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Keep the catalog entries named by `ids`, in catalog order.
    ///
    /// Unknown ids and duplicates are dropped.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&AssetDefinition> {
        let mut positions: Vec<usize> = ids
            .iter()
            .filter_map(|id| self.position(id.as_ref()))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions.into_iter().map(|pos| &self.assets[pos]).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
