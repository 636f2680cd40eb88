//! A 1-row, 3-cell line game.
//!
//! Players alternately claim an empty cell, X first. When the row is full the
//! owner of the middle cell wins. X claiming the middle on the first move wins
//! against every reply; claiming an end cell loses if O answers in the middle.

use engine_core::{Game, GameError, WinValues};

use crate::{payoff, Player};

pub const CELLS: usize = 3;
const MIDDLE: usize = CELLS / 2;

/// Line game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    /// Cells: 0=empty, 1=X, 2=O
    cells: [u8; CELLS],
    current_player: Player,
}

impl LineState {
    pub fn new() -> Self {
        Self {
            cells: [0; CELLS],
            current_player: Player::X,
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// Winner code in the TicTacToe convention (0 while the row has gaps)
    fn winner(&self) -> u8 {
        if self.is_full() {
            self.cells[MIDDLE]
        } else {
            0
        }
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Line game implementation. Actions are cell indices.
#[derive(Debug, Default)]
pub struct LineGame;

impl Game for LineGame {
    type State = LineState;
    type Action = u8;
    type Player = Player;

    fn legal_actions(&self, state: &LineState) -> Vec<u8> {
        (0..CELLS as u8)
            .filter(|&cell| state.cells[cell as usize] == 0)
            .collect()
    }

    fn next_state(&self, state: &LineState, action: u8) -> Result<LineState, GameError> {
        let idx = action as usize;
        if idx >= CELLS || state.cells[idx] != 0 {
            return Err(GameError::IllegalAction(format!(
                "cell {action} on {:?}",
                state.cells
            )));
        }

        let mut next = *state;
        next.cells[idx] = state.current_player.mark();
        next.current_player = state.current_player.opponent();
        Ok(next)
    }

    fn is_ended(&self, state: &LineState) -> bool {
        state.is_full()
    }

    fn current_player(&self, state: &LineState) -> Player {
        state.current_player
    }

    fn win_values(&self, state: &LineState) -> Result<WinValues<Player>, GameError> {
        payoff(state.winner())
    }
}
