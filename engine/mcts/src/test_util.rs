//! Small games for exercising the driver's edge cases.

use engine_core::{Game, GameError, WinValues};

/// One move from `false` to `true`, after which the game is over.
#[derive(Debug)]
pub struct SingleMoveGame {
    score: f64,
}

impl SingleMoveGame {
    pub const ACTION: u8 = 7;

    /// The sole player wins by making the sole move.
    pub fn winning() -> Self {
        Self { score: 1.0 }
    }
}

impl Game for SingleMoveGame {
    type State = bool;
    type Action = u8;
    type Player = u8;

    fn legal_actions(&self, state: &bool) -> Vec<u8> {
        if *state {
            Vec::new()
        } else {
            vec![Self::ACTION]
        }
    }

    fn next_state(&self, state: &bool, action: u8) -> Result<bool, GameError> {
        if *state || action != Self::ACTION {
            return Err(GameError::IllegalAction(format!("{action} at {state}")));
        }
        Ok(true)
    }

    fn is_ended(&self, state: &bool) -> bool {
        *state
    }

    fn current_player(&self, _state: &bool) -> u8 {
        0
    }

    fn win_values(&self, state: &bool) -> Result<WinValues<u8>, GameError> {
        if !*state {
            return Err(GameError::NotTerminal);
        }
        Ok(WinValues::from_pairs([(0, self.score)]))
    }
}

/// Never ends yet has no legal actions.
#[derive(Debug)]
pub struct BrokenGame;

impl Game for BrokenGame {
    type State = ();
    type Action = u8;
    type Player = u8;

    fn legal_actions(&self, _state: &()) -> Vec<u8> {
        Vec::new()
    }

    fn next_state(&self, _state: &(), action: u8) -> Result<(), GameError> {
        Err(GameError::IllegalAction(action.to_string()))
    }

    fn is_ended(&self, _state: &()) -> bool {
        false
    }

    fn current_player(&self, _state: &()) -> u8 {
        0
    }

    fn win_values(&self, _state: &()) -> Result<WinValues<u8>, GameError> {
        Err(GameError::NotTerminal)
    }
}

/// One legal move from `0` into `1`, which never ends and offers no moves.
#[derive(Debug)]
pub struct DeadEndGame;

impl Game for DeadEndGame {
    type State = u8;
    type Action = u8;
    type Player = u8;

    fn legal_actions(&self, state: &u8) -> Vec<u8> {
        if *state == 0 {
            vec![0]
        } else {
            Vec::new()
        }
    }

    fn next_state(&self, state: &u8, action: u8) -> Result<u8, GameError> {
        if *state != 0 || action != 0 {
            return Err(GameError::IllegalAction(format!("{action} at {state}")));
        }
        Ok(1)
    }

    fn is_ended(&self, _state: &u8) -> bool {
        false
    }

    fn current_player(&self, _state: &u8) -> u8 {
        0
    }

    fn win_values(&self, _state: &u8) -> Result<WinValues<u8>, GameError> {
        Err(GameError::NotTerminal)
    }
}

/// Like [`SingleMoveGame`], but the payoff leaves out the player to move.
#[derive(Debug)]
pub struct UnscoredGame;

impl Game for UnscoredGame {
    type State = bool;
    type Action = u8;
    type Player = u8;

    fn legal_actions(&self, state: &bool) -> Vec<u8> {
        SingleMoveGame::winning().legal_actions(state)
    }

    fn next_state(&self, state: &bool, action: u8) -> Result<bool, GameError> {
        SingleMoveGame::winning().next_state(state, action)
    }

    fn is_ended(&self, state: &bool) -> bool {
        *state
    }

    fn current_player(&self, _state: &bool) -> u8 {
        0
    }

    fn win_values(&self, _state: &bool) -> Result<WinValues<u8>, GameError> {
        Ok(WinValues::from_pairs([(1, 1.0)]))
    }
}
