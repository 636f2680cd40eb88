//! Reference game implementations for the search engine
//!
//! This crate provides small, complete implementations of the `engine-core`
//! `Game` trait used to exercise the search:
//!
//! - [`TicTacToe`]: the classic 3x3 game
//! - [`LineGame`]: a 1-row, 3-cell game small enough to solve by hand
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::{Action, State, TicTacToe};
//!
//! let game = TicTacToe::new();
//! let state = game.next_state(&State::new(), Action::Place(4)).unwrap();
//! assert_eq!(game.legal_actions(&state).len(), 8);
//! ```

use engine_core::{Game, GameError, WinValues};

pub mod line;

pub use line::{LineGame, LineState};

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Cell encoding used on the board (1 = X, 2 = O)
    fn mark(self) -> u8 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }
}

/// Terminal payoff given a winner code (0 = none, 1 = X, 2 = O, 3 = draw).
fn payoff(winner: u8) -> Result<WinValues<Player>, GameError> {
    match winner {
        1 => Ok(WinValues::from_pairs([(Player::X, 1.0), (Player::O, 0.0)])),
        2 => Ok(WinValues::from_pairs([(Player::X, 0.0), (Player::O, 1.0)])),
        3 => Ok(WinValues::from_pairs([(Player::X, 0.5), (Player::O, 0.5)])),
        _ => Err(GameError::NotTerminal),
    }
}

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Side to move
    current_player: Player,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: Player::X, // X goes first
            winner: 0,
        }
    }

    /// Build a position from a sequence of placements, alternating from X.
    ///
    /// Returns `GameError::IllegalAction` on the first illegal placement.
    pub fn from_moves(moves: &[u8]) -> Result<Self, GameError> {
        moves
            .iter()
            .try_fold(Self::new(), |state, &pos| state.make_move(pos))
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> Result<State, GameError> {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return Err(GameError::IllegalAction(format!(
                "position {position} on {:?}",
                self.board
            )));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player.mark();

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = self.current_player.opponent();
        }

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

/// TicTacToe game implementation
#[derive(Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = State;
    type Action = Action;
    type Player = Player;

    fn legal_actions(&self, state: &State) -> Vec<Action> {
        state.legal_moves().into_iter().map(Action::Place).collect()
    }

    fn next_state(&self, state: &State, action: Action) -> Result<State, GameError> {
        state.make_move(action.position())
    }

    fn is_ended(&self, state: &State) -> bool {
        state.is_done()
    }

    fn current_player(&self, state: &State) -> Player {
        state.current_player
    }

    fn win_values(&self, state: &State) -> Result<WinValues<Player>, GameError> {
        payoff(state.winner)
    }
}
