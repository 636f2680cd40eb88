//! MCTS configuration parameters.

use std::time::Duration;

use engine_config::MctsSection;

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of Selection -> Expansion -> Rollout -> Backpropagation
    /// iterations per search.
    pub iterations: usize,

    /// Exploration constant C in the UCT formula
    /// `win_rate + C * sqrt(ln(N_parent) / N_child)`.
    /// Higher values spread visits more evenly across siblings.
    pub exploration_constant: f64,

    /// Optional wall-clock budget. Checked between iterations only, so a
    /// rollout in progress always runs to completion.
    pub time_budget: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 2.0,
            time_budget: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 100,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(SearchError::InvalidConfig(
                "time budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&MctsSection> for MctsConfig {
    fn from(section: &MctsSection) -> Self {
        Self {
            iterations: section.iterations,
            exploration_constant: section.exploration_constant,
            time_budget: section.time_budget(),
        }
    }
}
