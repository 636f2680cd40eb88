//! Last-Good-Reply-with-Forgetting (LGRF-1) reply table.
//!
//! Maps `(previous action, player to move)` to the reply that player made
//! after that action in a rollout they went on to win. Rollouts consult the
//! table before falling back to a uniform random move. Whenever a rollout
//! ends with a player scoring zero, every reply owned by that player is
//! dropped.
//!
//! The table lives for one search invocation and is threaded through the
//! iteration loop by mutable reference.

use std::collections::HashMap;
use std::hash::Hash;

use engine_core::WinValues;

/// One ply of a rollout: who moved and what they played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove<A, P> {
    pub action: A,
    pub player: P,
}

/// Reply table keyed by `(previous action, replying player)`.
#[derive(Debug, Clone)]
pub struct ReplyTable<A, P> {
    replies: HashMap<(A, P), A>,
}

impl<A, P> Default for ReplyTable<A, P> {
    fn default() -> Self {
        Self {
            replies: HashMap::new(),
        }
    }
}

impl<A, P> ReplyTable<A, P>
where
    A: Copy + Eq + Hash,
    P: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored reply for `player` after `previous`, regardless of legality.
    #[inline]
    pub fn get(&self, previous: A, player: P) -> Option<A> {
        self.replies.get(&(previous, player)).copied()
    }

    /// Stored reply if it is among `legal`.
    ///
    /// A reply that is no longer legal counts as a miss; the entry is kept.
    pub fn lookup(&self, previous: A, player: P, legal: &[A]) -> Option<A> {
        self.get(previous, player)
            .filter(|reply| legal.contains(reply))
    }

    /// Store `reply`, replacing any earlier reply for the same key.
    pub fn record(&mut self, previous: A, player: P, reply: A) {
        self.replies.insert((previous, player), reply);
    }

    /// Drop every entry owned by a player who scored exactly zero.
    ///
    /// Returns the number of entries removed.
    pub fn forget_losers(&mut self, scores: &WinValues<P>) -> usize {
        let before = self.replies.len();
        self.replies.retain(|(_, owner), _| !scores.lost(owner));
        before - self.replies.len()
    }

    /// Learn replies from a won rollout.
    ///
    /// Walks `moves` backward from the last ply. While the mover is
    /// `identity`, records `(previous ply's action, identity) -> action`.
    /// Stops at the first ply made by someone else or at the first ply.
    ///
    /// Returns the number of entries written.
    pub fn learn(&mut self, moves: &[PlayedMove<A, P>], identity: P) -> usize {
        let mut learned = 0;

        for pair in moves.windows(2).rev() {
            let (previous, reply) = (pair[0], pair[1]);
            if reply.player != identity {
                break;
            }
            self.record(previous.action, identity, reply.action);
            learned += 1;
        }

        learned
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}
