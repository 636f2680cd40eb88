//! UCT Monte Carlo Tree Search with Last-Good-Reply-with-Forgetting rollouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` Game trait.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each simulation consists
//! of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT (Upper Confidence bounds
//!    applied to Trees) to balance exploration and exploitation
//! 2. **Expansion**: Add a child for one untried action of the selected node
//! 3. **Rollout**: Play the new child's state to the end. Moves answer the
//!    previous move from the reply table when a stored reply is legal, and are
//!    uniformly random otherwise
//! 4. **Backpropagation**: Credit the searching player's score to the new
//!    child and every ancestor up to the root
//!
//! The reply table implements LGRF-1: replies that ended in a win for the
//! player who started the rollout are remembered, and any reply whose owner
//! ended up scoring zero is forgotten.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{State, TicTacToe};
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = TicTacToe::new();
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_mcts(&game, State::new(), config, &mut rng).unwrap();
//! println!("Best action: {:?} (win rate {:.3})", result.action, result.win_rate);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per search (default: 1000)
//! - `exploration_constant`: UCT exploration weight (default: 2.0)
//! - `time_budget`: Optional wall-clock limit, checked between iterations
//!
//! It can also be built from the `[mcts]` section of `config.toml` through
//! `engine-config`; see [`search_with_settings`] and [`search_configured`].

pub mod config;
pub mod node;
pub mod replies;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use replies::{PlayedMove, ReplyTable};
pub use rollout::{rollout, RolloutOutcome};
pub use search::{
    run_mcts, search, search_configured, search_with_settings, MctsSearch, SearchError,
    SearchResult, SearchStats,
};
pub use tree::{MctsTree, TreeStats};
