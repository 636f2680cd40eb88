//! Typed Game trait describing the rules the search runs against
//!
//! The search never inspects a state directly. Everything it knows about a
//! position comes through these five operations, so any two-player,
//! perfect-information, turn-based game can be searched by implementing them.

use std::fmt::Debug;
use std::hash::Hash;

use crate::outcome::WinValues;

/// Main trait for game implementations
///
/// # Type Parameters
///
/// * `State` - Game position; cloned once per search iteration
/// * `Action` - Move type, small and `Copy`; used as a key in child maps and
///   the reply table
/// * `Player` - Identity of a side; used to read terminal payoffs
///
/// # Example
///
/// ```rust
/// # use engine_core::{Game, GameError, WinValues};
/// #[derive(Debug)]
/// struct OneMove;
///
/// impl Game for OneMove {
///     type State = bool; // true once the move has been played
///     type Action = u8;
///     type Player = u8;
///
///     fn legal_actions(&self, state: &bool) -> Vec<u8> {
///         if *state { Vec::new() } else { vec![0] }
///     }
///
///     fn next_state(&self, state: &bool, action: u8) -> Result<bool, GameError> {
///         if *state || action != 0 {
///             return Err(GameError::IllegalAction(format!("{action}")));
///         }
///         Ok(true)
///     }
///
///     fn is_ended(&self, state: &bool) -> bool {
///         *state
///     }
///
///     fn current_player(&self, _state: &bool) -> u8 {
///         1
///     }
///
///     fn win_values(&self, state: &bool) -> Result<WinValues<u8>, GameError> {
///         if !*state {
///             return Err(GameError::NotTerminal);
///         }
///         Ok(WinValues::from_pairs([(1, 1.0), (2, 0.0)]))
///     }
/// }
/// ```
pub trait Game: Debug {
    /// Game position
    type State: Clone + Debug;

    /// A move playable from some state
    type Action: Copy + Eq + Hash + Debug;

    /// One of the two sides
    type Player: Copy + Eq + Hash + Debug;

    /// All actions playable from `state`, in a stable order.
    ///
    /// Must be empty iff `state` is terminal.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state` and return the successor.
    ///
    /// Returns `GameError::IllegalAction` if `action` is not legal in `state`.
    fn next_state(
        &self,
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Self::State, GameError>;

    /// Whether `state` is terminal
    fn is_ended(&self, state: &Self::State) -> bool;

    /// The side to move at `state`. Unspecified at terminal states.
    fn current_player(&self, state: &Self::State) -> Self::Player;

    /// Terminal payoff per player.
    ///
    /// Returns `GameError::NotTerminal` unless `is_ended(state)` holds.
    fn win_values(&self, state: &Self::State) -> Result<WinValues<Self::Player>, GameError>;
}

/// Contract violations reported by a `Game` implementation
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal action: {0}")]
    IllegalAction(String),
    #[error("Win values requested for a non-terminal state")]
    NotTerminal,
    #[error("Game logic error: {0}")]
    Other(String),
}
