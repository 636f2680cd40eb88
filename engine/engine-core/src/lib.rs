//! Core traits and types for the search engine's game collaborator
//!
//! This crate provides the abstractions the search consumes:
//! - `Game`: the rules of a two-player, perfect-information, turn-based game
//! - `WinValues`: per-player terminal payoff in `[0, 1]`
//! - `GameError`: contract violations reported by a `Game` implementation

pub mod outcome;
pub mod typed;

// Re-export main types for convenience
pub use outcome::WinValues;
pub use typed::{Game, GameError};
