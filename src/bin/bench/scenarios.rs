// Scenario Definitions — (total channels, control %) pairs from the run config
// Every scenario is planned against every configured cluster size

use fca_engine::{FcaConfig, ScenarioSpec};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: String,
    pub label: String,
    pub spec: ScenarioSpec,
}

impl Scenario {
    fn from_spec(index: usize, spec: &ScenarioSpec) -> Self {
        Self {
            name: format!(
                "S{}_{}CH_{}PCT",
                index + 1,
                spec.total_channels,
                spec.control_percentage
            ),
            label: format!(
                "Scenario {}: {} Total Channels, {}% Control",
                index + 1,
                spec.total_channels,
                spec.control_percentage
            ),
            spec: spec.clone(),
        }
    }

    /// Case-insensitive match on name or label.
    pub fn matches(&self, filter: &str) -> bool {
        let f = filter.to_lowercase();
        self.name.to_lowercase().contains(&f) || self.label.to_lowercase().contains(&f)
    }
}

pub fn scenarios(config: &FcaConfig) -> Vec<Scenario> {
    config
        .scenarios
        .iter()
        .enumerate()
        .map(|(i, spec)| Scenario::from_spec(i, spec))
        .collect()
}
