//! Simulation policy: play a game out to the end, biased by the reply table.
//!
//! Each ply first asks the reply table for a reply to the previous ply of
//! this rollout; if there is none, or it is not legal here, the move is drawn
//! uniformly from the legal actions. Once the game ends, the table forgets
//! replies of any player who scored zero and, if the player who started the
//! rollout scored anything, learns from the closing plies.

use engine_core::{Game, WinValues};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::replies::{PlayedMove, ReplyTable};
use crate::search::SearchError;

/// Result of playing a rollout to a terminal state.
#[derive(Debug, Clone)]
pub struct RolloutOutcome<G: Game> {
    /// Terminal state reached
    pub state: G::State,

    /// Terminal payoff per player
    pub scores: WinValues<G::Player>,

    /// Plies played, in order. Empty if the start state was terminal.
    pub moves: Vec<PlayedMove<G::Action, G::Player>>,
}

impl<G: Game> RolloutOutcome<G> {
    /// Final ply of the rollout, if any was played.
    pub fn last_move(&self) -> Option<PlayedMove<G::Action, G::Player>> {
        self.moves.last().copied()
    }
}

/// Play from `state` to a terminal state and update `replies`.
///
/// Fails with the game's error if the collaborator rejects one of its own
/// legal actions or refuses to score the terminal state, and with
/// `SearchError::NoLegalActions` on a non-terminal state without moves.
pub fn rollout<G: Game>(
    game: &G,
    mut state: G::State,
    replies: &mut ReplyTable<G::Action, G::Player>,
    rng: &mut ChaCha20Rng,
) -> Result<RolloutOutcome<G>, SearchError> {
    let mut moves: Vec<PlayedMove<G::Action, G::Player>> = Vec::new();

    while !game.is_ended(&state) {
        let legal = game.legal_actions(&state);
        if legal.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let player = game.current_player(&state);
        let action = moves
            .last()
            .and_then(|previous| replies.lookup(previous.action, player, &legal))
            .unwrap_or_else(|| legal[rng.gen_range(0..legal.len())]);

        moves.push(PlayedMove { action, player });
        state = game.next_state(&state, action)?;
    }

    let scores = game.win_values(&state)?;
    let forgotten = replies.forget_losers(&scores);

    // The player to move at the start of the rollout
    let learned = match moves.first() {
        Some(first) if scores.get(&first.player).is_some_and(|s| s > 0.0) => {
            replies.learn(&moves, first.player)
        }
        _ => 0,
    };

    trace!(
        plies = moves.len(),
        forgotten,
        learned,
        table_size = replies.len(),
        "Rollout complete"
    );

    Ok(RolloutOutcome {
        state,
        scores,
        moves,
    })
}
