//! Import boundary for catalog files written before severities existed.
//!
//! Older inventories only carry a free-text risk description. The severity is
//! derived from it once, here, so that scoring never looks at the text.

use serde::Deserialize;

use super::{AssetDefinition, Difficulty, Severity};

const CRITICAL_KEYWORDS: &[&str] = &[
    "incendie",
    "fire",
    "légionelle",
    "legionella",
    "santé",
    "health",
];

const MODERATE_KEYWORDS: &[&str] = &["panne", "breakdown", "fuite", "leak"];

/// Map a free-text risk description to a severity.
///
/// Matching is case-insensitive and substring based. Critical keywords win
/// over moderate ones.
pub fn classify_risk(risk: &str) -> Severity {
    let text = risk.to_lowercase();
    if CRITICAL_KEYWORDS.iter().any(|k| text.contains(k)) {
        Severity::Critical
    } else if MODERATE_KEYWORDS.iter().any(|k| text.contains(k)) {
        Severity::Moderate
    } else {
        Severity::Minor
    }
}

/// Catalog record as found in imported files.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyAsset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "freq")]
    pub frequency_months: u32,
    #[serde(alias = "duration", default)]
    pub duration_minutes: u32,
    #[serde(alias = "risk", default)]
    pub risk_description: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(alias = "cost", default)]
    pub cost_value: Option<u32>,
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

impl LegacyAsset {
    pub fn into_definition(self) -> AssetDefinition {
        let severity = self
            .severity
            .unwrap_or_else(|| classify_risk(&self.risk_description));
        AssetDefinition {
            id: self.id,
            name: self.name,
            icon: self.icon,
            category: self.category,
            frequency_months: self.frequency_months,
            duration_minutes: self.duration_minutes,
            risk_description: self.risk_description,
            severity,
            cost_value: self.cost_value,
            xp_reward: self.xp_reward,
            difficulty: self.difficulty,
            climate_tags: self.climate_tags,
            products: self.products,
            steps: self.steps,
        }
    }
}
