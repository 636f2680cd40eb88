//! MCTS search implementation.
//!
//! Each iteration runs the four classic phases against one tree:
//! 1. Selection: descend by UCT until a node with untried actions
//! 2. Expansion: materialize one untried action as a new child
//! 3. Rollout: play the child's state out, biased by the reply table
//! 4. Backpropagation: credit the outcome to the child and its ancestors
//!
//! After the budget is spent, the root child with the best win rate among
//! those ever visited is chosen.

use std::time::{Duration, Instant};

use engine_core::{Game, GameError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::replies::ReplyTable;
use crate::rollout::rollout;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("No root child was visited; the root state is terminal or has no legal actions")]
    NoVisitedChildren,

    #[error("Expansion requested on a node with no untried actions")]
    NothingToExpand,

    #[error("Node has neither untried actions nor children but its state is not terminal")]
    InconsistentNode,

    #[error("Non-terminal state has no legal actions")]
    NoLegalActions,

    #[error("Terminal payoff has no score for the searching player")]
    MissingScore,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Counters describing one search invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Iterations started
    pub iterations: usize,

    /// Iterations that expanded, rolled out and backpropagated
    pub simulations: usize,

    /// Iterations whose selection ended on an exhausted node
    pub skipped: usize,

    /// Nodes in the tree when the search finished
    pub tree_nodes: usize,

    /// Reply table entries when the search finished
    pub reply_entries: usize,

    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take
    pub action: A,

    /// Win rate of the chosen root child
    pub win_rate: f64,

    /// Visits of the chosen root child
    pub visits: u32,

    pub stats: SearchStats,
}

/// MCTS search state for a single invocation.
///
/// Owns the tree and the reply table; both are dropped with the search.
pub struct MctsSearch<'a, G: Game> {
    game: &'a G,
    root_state: G::State,
    identity: G::Player,
    tree: MctsTree<G::Action>,
    replies: ReplyTable<G::Action, G::Player>,
    config: MctsConfig,
}

impl<'a, G: Game> MctsSearch<'a, G> {
    /// Create a new MCTS search from the given game state.
    ///
    /// The searching player is the player to move at `state`.
    pub fn new(game: &'a G, state: G::State, config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let identity = game.current_player(&state);
        let tree = MctsTree::new(game.legal_actions(&state));

        Ok(Self {
            game,
            root_state: state,
            identity,
            tree,
            replies: ReplyTable::new(),
            config,
        })
    }

    /// Run the search for the configured budget and pick an action.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Action>, SearchError> {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        // Terminal root, or a collaborator that offers no moves at all
        if self.tree.get(self.tree.root()).is_exhausted() {
            debug!("Root has no legal actions, nothing to search");
            return Err(SearchError::NoVisitedChildren);
        }

        for _ in 0..self.config.iterations {
            stats.iterations += 1;

            if self.simulate(rng)? {
                stats.simulations += 1;
            } else {
                // Nothing changed, so every later selection would follow
                // the same path to the same exhausted node.
                stats.skipped += 1;
                debug!(
                    iteration = stats.iterations,
                    "Selection reached an exhausted node, stopping early"
                );
                break;
            }

            if let Some(budget) = self.config.time_budget {
                if start.elapsed() >= budget {
                    debug!(
                        iteration = stats.iterations,
                        budget_ms = budget.as_millis() as u64,
                        "Time budget exhausted"
                    );
                    break;
                }
            }
        }

        let tree_stats = self.tree.stats();
        stats.tree_nodes = tree_stats.total_nodes;
        stats.reply_entries = self.replies.len();
        stats.elapsed = start.elapsed();

        let (action, child_id) = self
            .tree
            .best_action()
            .ok_or(SearchError::NoVisitedChildren)?;
        let child = self.tree.get(child_id);

        debug!(
            ?action,
            win_rate = child.win_rate(),
            visits = child.visits,
            simulations = stats.simulations,
            tree_nodes = stats.tree_nodes,
            max_depth = tree_stats.max_depth,
            root_win_rate = tree_stats.root_win_rate,
            reply_entries = stats.reply_entries,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            win_rate: child.win_rate(),
            visits: child.visits,
            stats,
        })
    }

    /// Run a single iteration (select -> expand -> rollout -> backpropagate).
    ///
    /// Returns false if selection found nothing to expand and the iteration
    /// was skipped.
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<bool, SearchError> {
        // Selection: descend to an expandable node
        let (state, leaf) = self.select(self.root_state.clone())?;
        let Some(leaf_id) = leaf else {
            return Ok(false);
        };

        // Expansion
        let (state, child_id) = self.expand(leaf_id, state)?;

        // Rollout
        let outcome = rollout(self.game, state, &mut self.replies, rng)?;
        let won = outcome
            .scores
            .get(&self.identity)
            .ok_or(SearchError::MissingScore)?;

        // Backpropagation
        self.tree.backpropagate(child_id, won);

        trace!(
            leaf = leaf_id.0,
            child = child_id.0,
            plies = outcome.moves.len(),
            won,
            "MCTS simulation complete"
        );

        Ok(true)
    }

    /// Select a node to expand by descending the tree with UCT.
    ///
    /// `state` must be the root state; it is advanced alongside the walk.
    /// Returns the state of the node reached and the node, or `None` when
    /// the walk ends on a terminal node with nothing left to expand.
    fn select(&self, mut state: G::State) -> Result<(G::State, Option<NodeId>), SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.is_expandable() {
                return Ok((state, Some(current)));
            }

            if node.is_exhausted() {
                if !self.game.is_ended(&state) {
                    return Err(SearchError::InconsistentNode);
                }
                return Ok((state, None));
            }

            let (action, child_id) = self
                .tree
                .select_child(current, self.config.exploration_constant)
                .ok_or(SearchError::InconsistentNode)?;
            state = self.game.next_state(&state, action)?;
            current = child_id;
        }
    }

    /// Expand one untried action of `node_id`, whose state is `state`.
    ///
    /// Untried actions are taken from the back of the list.
    fn expand(
        &mut self,
        node_id: NodeId,
        state: G::State,
    ) -> Result<(G::State, NodeId), SearchError> {
        let action = self
            .tree
            .get_mut(node_id)
            .untried_actions
            .pop()
            .ok_or(SearchError::NothingToExpand)?;

        let next = self.game.next_state(&state, action)?;
        let legal = self.game.legal_actions(&next);
        let child_id = self.tree.add_child(node_id, action, legal);

        Ok((next, child_id))
    }

    /// The player the search runs for.
    pub fn identity(&self) -> G::Player {
        self.identity
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::Action> {
        &self.tree
    }

    /// Get the reply table (for inspection/debugging).
    pub fn replies(&self) -> &ReplyTable<G::Action, G::Player> {
        &self.replies
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game>(
    game: &G,
    state: G::State,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Action>, SearchError> {
    let mut search = MctsSearch::new(game, state, config)?;
    search.run(rng)
}

/// Run a search configured from an `[mcts]` config section.
///
/// Uses the section's fixed seed if it has one, otherwise seeds from entropy.
pub fn search_with_settings<G: Game>(
    game: &G,
    state: &G::State,
    settings: &engine_config::MctsSection,
) -> Result<SearchResult<G::Action>, SearchError> {
    let mut rng = match settings.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    run_mcts(game, state.clone(), MctsConfig::from(settings), &mut rng)
}

/// Run a search with the `[mcts]` section of the loaded `config.toml`.
///
/// See [`engine_config::load_config`] for where the file is looked up and
/// which environment variables override it.
pub fn search_configured<G: Game>(
    game: &G,
    state: &G::State,
) -> Result<SearchResult<G::Action>, SearchError> {
    let config = engine_config::load_config();
    search_with_settings(game, state, &config.mcts)
}

/// Choose a move for the player to move at `state`.
///
/// Runs the default budget (1000 iterations, exploration constant 2.0)
/// with an entropy-seeded generator.
pub fn search<G: Game>(game: &G, state: &G::State) -> Result<G::Action, SearchError> {
    let mut rng = ChaCha20Rng::from_entropy();
    run_mcts(game, state.clone(), MctsConfig::default(), &mut rng).map(|result| result.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::MctsNode;
    use crate::test_util::{BrokenGame, DeadEndGame, SingleMoveGame, UnscoredGame};
    use games_tictactoe::{Action, LineGame, LineState, Player, State, TicTacToe};

    /// Visits of a non-root node are its own expansion plus its children's.
    fn assert_tree_invariants<A: Copy + PartialEq>(tree: &MctsTree<A>) {
        for (idx, node) in tree.arena().iter().enumerate() {
            let child_visits: u32 = node
                .children
                .iter()
                .map(|(_, id)| tree.get(*id).visits)
                .sum();

            if NodeId(idx as u32) == tree.root() {
                assert_eq!(node.visits, child_visits);
            } else {
                assert_eq!(node.visits, child_visits + 1);
                assert!(node.parent.is_some());
            }
            assert!(node.wins >= 0.0);
            assert!(node.wins <= node.visits as f64 + 1e-9);
        }
    }

    #[test]
    fn test_single_action_game_any_budget() {
        let game = SingleMoveGame::winning();
        for iterations in [1, 2, 10, 1000] {
            let mut rng = ChaCha20Rng::seed_from_u64(iterations as u64);
            let config = MctsConfig::default().with_iterations(iterations);
            let result = run_mcts(&game, false, config, &mut rng).unwrap();

            assert_eq!(result.action, SingleMoveGame::ACTION);
            assert_eq!(result.visits, 1);
            assert!((result.win_rate - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_search_entry_point() {
        let game = SingleMoveGame::winning();
        assert_eq!(search(&game, &false).unwrap(), SingleMoveGame::ACTION);
    }

    #[test]
    fn test_line_game_picks_middle() {
        // Claiming the middle wins against every reply; either end loses to
        // O answering in the middle.
        let game = LineGame;
        for seed in [0, 1, 7, 42, 1234] {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = run_mcts(&game, LineState::new(), MctsConfig::default(), &mut rng).unwrap();

            assert_eq!(result.action, 1, "seed {seed}");
            assert!((result.win_rate - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_line_game_stops_when_exhausted() {
        let game = LineGame;
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut search = MctsSearch::new(&game, LineState::new(), MctsConfig::default()).unwrap();
        let result = search.run(&mut rng).unwrap();

        // The search stops as soon as selection lands on a finished game
        assert_eq!(result.stats.skipped, 1);
        assert_eq!(result.stats.iterations, result.stats.simulations + 1);
        assert!(result.stats.simulations <= 15); // 3 + 6 + 6 non-root nodes
        assert_eq!(result.stats.tree_nodes, result.stats.simulations + 1);
        assert_tree_invariants(search.tree());
    }

    #[test]
    fn test_degenerate_root() {
        let game = TicTacToe::new();
        let finished = State::from_moves(&[0, 3, 1, 4, 2]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let err = run_mcts(&game, finished, MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoVisitedChildren));
    }

    #[test]
    fn test_root_without_moves_is_degenerate() {
        // Not terminal, yet no legal actions: nothing to choose from
        let game = BrokenGame;
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let err = run_mcts(&game, (), MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoVisitedChildren));
    }

    #[test]
    fn test_select_rejects_exhausted_non_terminal_node() {
        let game = TicTacToe::new();
        let mut search = MctsSearch::new(&game, State::new(), MctsConfig::default()).unwrap();
        let root = search.tree().root();
        search.tree.get_mut(root).untried_actions.clear();

        assert!(matches!(
            search.select(State::new()),
            Err(SearchError::InconsistentNode)
        ));
    }

    #[test]
    fn test_dead_end_below_root_fails() {
        let game = DeadEndGame;
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let err = run_mcts(&game, 0, MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalActions));
    }

    #[test]
    fn test_missing_score_reported() {
        let game = UnscoredGame;
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let err = run_mcts(&game, false, MctsConfig::for_testing(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::MissingScore));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let game = TicTacToe::new();
        let config = MctsConfig::default().with_iterations(0);
        assert!(matches!(
            MctsSearch::new(&game, State::new(), config),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_visits_match_simulations() {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let config = MctsConfig::default().with_iterations(100);
        let mut search = MctsSearch::new(&game, State::new(), config).unwrap();

        let result = search.run(&mut rng).unwrap();

        let tree = search.tree();
        assert_eq!(result.stats.iterations, 100);
        assert_eq!(result.stats.simulations, 100);
        assert_eq!(result.stats.skipped, 0);
        assert_eq!(tree.get(tree.root()).visits, 100);
        assert_eq!(tree.len(), 101); // one node per expansion
        assert_eq!(search.identity(), Player::X);
        assert_tree_invariants(tree);

        // Every opening move was expanded, in reverse order of legality
        let root = tree.get(tree.root());
        assert!(root.untried_actions.is_empty());
        let order: Vec<Action> = root.children.iter().map(|(a, _)| *a).collect();
        let expected: Vec<Action> = (0..9).rev().map(Action::Place).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_result_is_legal_and_best_visited() {
        let game = TicTacToe::new();
        let state = State::from_moves(&[4, 0]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut search = MctsSearch::new(&game, state, MctsConfig::default()).unwrap();

        let result = search.run(&mut rng).unwrap();
        assert!(game.legal_actions(&state).contains(&result.action));

        let tree = search.tree();
        let root = tree.get(tree.root());
        let best_rate = root
            .children
            .iter()
            .map(|(_, id)| tree.get(*id))
            .filter(|child| child.visits > 0)
            .map(MctsNode::win_rate)
            .fold(f64::MIN, f64::max);
        assert!((result.win_rate - best_rate).abs() < 1e-12);
    }

    #[test]
    fn test_search_is_reproducible() {
        let game = TicTacToe::new();
        let run = || {
            let mut rng = ChaCha20Rng::seed_from_u64(2024);
            let mut search =
                MctsSearch::new(&game, State::new(), MctsConfig::for_testing()).unwrap();
            let result = search.run(&mut rng).unwrap();
            let visits: Vec<u32> = search.tree().arena().iter().map(|n| n.visits).collect();
            (result.action, result.visits, visits, search.replies().len())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_time_budget_stops_between_iterations() {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let config = MctsConfig::default()
            .with_iterations(10_000_000)
            .with_time_budget(Duration::from_millis(5));

        let result = run_mcts(&game, State::new(), config, &mut rng).unwrap();
        assert!(result.stats.iterations >= 1);
        assert!(result.stats.iterations < 10_000_000);
        assert!(result.stats.elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_select_descends_by_uct() {
        let game = LineGame;
        let mut search = MctsSearch::new(&game, LineState::new(), MctsConfig::default()).unwrap();
        let root = search.tree().root();

        // Root fully expanded: children 2, 1, 0
        let mut ids = Vec::new();
        for _ in 0..3 {
            let (state, leaf) = search.select(LineState::new()).unwrap();
            assert_eq!(leaf, Some(root));
            let (_, child) = search.expand(root, state).unwrap();
            ids.push(child);
        }
        search.tree.backpropagate(ids[0], 0.0);
        search.tree.backpropagate(ids[1], 1.0);
        search.tree.backpropagate(ids[2], 0.0);

        // Middle (action 1) has the best UCT; its state has cell 1 taken
        let (state, leaf) = search.select(LineState::new()).unwrap();
        assert_eq!(leaf, Some(ids[1]));
        assert_eq!(game.legal_actions(&state), vec![0, 2]);
    }

    #[test]
    fn test_expansion_exhaustion() {
        let game = TicTacToe::new();
        let mut search = MctsSearch::new(&game, State::new(), MctsConfig::default()).unwrap();
        let root = search.tree().root();

        let mut seen = Vec::new();
        for _ in 0..9 {
            let (state, child) = search.expand(root, State::new()).unwrap();
            let action = search.tree().get(child).parent_action.unwrap();
            assert!(!seen.contains(&action));
            assert_eq!(state, State::new().make_move(action.position()).unwrap());
            assert_eq!(search.tree().get(child).untried_actions.len(), 8);
            seen.push(action);
        }

        assert!(search.tree().get(root).untried_actions.is_empty());
        assert_eq!(search.tree().get(root).children.len(), 9);
        assert!(matches!(
            search.expand(root, State::new()),
            Err(SearchError::NothingToExpand)
        ));
    }

    #[test]
    fn test_search_with_settings_fixed_seed() {
        let game = TicTacToe::new();
        let settings = engine_config::MctsSection {
            iterations: 200,
            seed: Some(11),
            ..engine_config::MctsSection::default()
        };

        let a = search_with_settings(&game, &State::new(), &settings).unwrap();
        let b = search_with_settings(&game, &State::new(), &settings).unwrap();
        assert_eq!(a.action, b.action);
        assert_eq!(a.visits, b.visits);
        assert!(a.stats.iterations <= 200);
    }

    #[test]
    fn test_search_configured_uses_loaded_section() {
        // No config.toml beside the crate: defaults apply
        let game = SingleMoveGame::winning();
        let result = search_configured(&game, &false).unwrap();
        assert_eq!(result.action, SingleMoveGame::ACTION);
    }

    #[test]
    fn test_draw_credit_reaches_root() {
        // X O X / _ _ _ / O X O with X to move: every line ends drawn
        let game = TicTacToe::new();
        let state = State::from_moves(&[0, 1, 2, 6, 7, 8]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut search = MctsSearch::new(&game, state, MctsConfig::default()).unwrap();

        let result = search.run(&mut rng).unwrap();
        assert!((result.win_rate - 0.5).abs() < 1e-12);

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert!(root.visits > 0);
        for node in tree.arena() {
            assert!((node.wins - 0.5 * node.visits as f64).abs() < 1e-9);
        }
        assert_tree_invariants(tree);
    }
}
