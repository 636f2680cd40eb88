//! Terminal payoffs.

use std::collections::HashMap;
use std::hash::Hash;

/// Per-player score of a finished game.
///
/// Scores lie in `[0, 1]`: 1 is a win, 0 a loss, anything in between is
/// partial credit (a draw is typically 0.5 for both sides).
#[derive(Debug, Clone, PartialEq)]
pub struct WinValues<P: Eq + Hash> {
    scores: HashMap<P, f64>,
}

impl<P: Copy + Eq + Hash> WinValues<P> {
    /// Build from `(player, score)` pairs. Scores are clamped into `[0, 1]`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, f64)>,
    {
        Self {
            scores: pairs
                .into_iter()
                .map(|(player, score)| (player, score.clamp(0.0, 1.0)))
                .collect(),
        }
    }

    /// Score for `player`, or `None` if the game did not report one.
    #[inline]
    pub fn get(&self, player: &P) -> Option<f64> {
        self.scores.get(player).copied()
    }

    /// Whether `player` scored exactly zero.
    ///
    /// Players without a reported score are not considered losers.
    #[inline]
    pub fn lost(&self, player: &P) -> bool {
        self.get(player) == Some(0.0)
    }
}
