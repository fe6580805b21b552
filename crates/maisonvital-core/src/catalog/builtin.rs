use super::{AssetDefinition, Difficulty, Severity};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Default inventory shipped with the application.
pub(super) fn assets() -> Vec<AssetDefinition> {
    vec![
        AssetDefinition {
            id: "asset_001".into(),
            name: "Shower heads & taps".into(),
            icon: "fa-shower".into(),
            category: "plumbing".into(),
            frequency_months: 3,
            duration_minutes: 20,
            risk_description: "Legionella risk & flow loss (-30%)".into(),
            severity: Severity::Critical,
            cost_value: Some(60),
            xp_reward: 90,
            difficulty: Difficulty::Easy,
            climate_tags: strings(&["global"]),
            products: strings(&["White vinegar", "Plastic bag", "Rubber band"]),
            steps: strings(&[
                "Unscrew the shower head",
                "Soak it in white vinegar for one hour",
                "Rinse and screw it back",
            ]),
        },
        AssetDefinition {
            id: "asset_002".into(),
            name: "Washing machine filter".into(),
            icon: "fa-soap".into(),
            category: "appliances".into(),
            frequency_months: 2,
            duration_minutes: 5,
            risk_description: "Drain pump breakdown & bad smells".into(),
            severity: Severity::Moderate,
            cost_value: Some(150),
            xp_reward: 30,
            difficulty: Difficulty::Easy,
            climate_tags: strings(&["global"]),
            products: strings(&["Towel", "Shallow tray"]),
            steps: strings(&[
                "Place a tray under the filter hatch",
                "Unscrew the filter slowly and let the water drain",
                "Remove lint and rinse the filter",
            ]),
        },
        AssetDefinition {
            id: "asset_003".into(),
            name: "Ventilation vents".into(),
            icon: "fa-fan".into(),
            category: "air".into(),
            frequency_months: 6,
            duration_minutes: 15,
            risk_description: "Mould, allergies & heating overconsumption".into(),
            severity: Severity::Minor,
            cost_value: Some(200),
            xp_reward: 80,
            difficulty: Difficulty::Medium,
            climate_tags: strings(&["humid", "temperate"]),
            products: strings(&["Soapy water", "Step ladder"]),
            steps: strings(&[
                "Unclip the vent covers",
                "Wash them in soapy water",
                "Dry and clip them back",
            ]),
        },
        AssetDefinition {
            id: "asset_004".into(),
            name: "Smoke detector".into(),
            icon: "fa-bell".into(),
            category: "safety".into(),
            frequency_months: 12,
            duration_minutes: 2,
            risk_description: "Failure in case of fire (life safety)".into(),
            severity: Severity::Critical,
            cost_value: Some(1000),
            xp_reward: 100,
            difficulty: Difficulty::Easy,
            climate_tags: strings(&["global"]),
            products: strings(&["Vacuum cleaner", "New batteries (if needed)"]),
            steps: strings(&[
                "Press the test button",
                "Vacuum the detection chamber",
                "Replace the battery if the signal is weak",
            ]),
        },
        AssetDefinition {
            id: "asset_005".into(),
            name: "Water heater".into(),
            icon: "fa-temperature-arrow-up".into(),
            category: "hvac".into(),
            frequency_months: 12,
            duration_minutes: 45,
            risk_description: "Leak, corrosion & overconsumption (+20%)".into(),
            severity: Severity::Moderate,
            cost_value: Some(800),
            xp_reward: 200,
            difficulty: Difficulty::Hard,
            climate_tags: strings(&["global"]),
            products: strings(&["Garden hose", "Bucket", "Adjustable wrench"]),
            steps: strings(&[
                "Cut the power supply",
                "Operate the safety valve",
                "Drain a few litres to flush the sediment",
            ]),
        },
        AssetDefinition {
            id: "asset_006".into(),
            name: "Gutters".into(),
            icon: "fa-cloud-rain".into(),
            category: "outdoor".into(),
            frequency_months: 6,
            duration_minutes: 60,
            risk_description: "Water infiltration in the facade & damp walls".into(),
            severity: Severity::Minor,
            cost_value: Some(500),
            xp_reward: 150,
            difficulty: Difficulty::Hard,
            climate_tags: strings(&["temperate", "rainy"]),
            products: strings(&["Ladder", "Gloves", "Water jet"]),
            steps: strings(&[
                "Secure the ladder",
                "Remove leaves by hand",
                "Flush the downpipe with water",
            ]),
        },
    ]
}
