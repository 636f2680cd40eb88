//! Configuration struct definitions.

use crate::defaults;
use serde::Deserialize;

// Serde default functions (required for #[serde(default = "...")])

fn d_iterations() -> usize {
    defaults::iterations()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CentralConfig {
    #[serde(default)]
    pub mcts: MctsSection,
}

/// `[mcts]` section: search budget and tree policy.
#[derive(Debug, Clone, Deserialize)]
pub struct MctsSection {
    #[serde(default = "d_iterations")]
    pub iterations: usize,
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    /// Wall-clock budget in milliseconds; 0 disables it.
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Fixed RNG seed; absent means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MctsSection {
    fn default() -> Self {
        Self {
            iterations: d_iterations(),
            exploration_constant: d_exploration_constant(),
            time_budget_ms: d_time_budget_ms(),
            seed: None,
        }
    }
}

impl MctsSection {
    pub fn time_budget(&self) -> Option<std::time::Duration> {
        (self.time_budget_ms > 0).then(|| std::time::Duration::from_millis(self.time_budget_ms))
    }
}
