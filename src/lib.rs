//! # ludo-engine
//!
//! A deterministic game-state engine for a race-and-capture board game in
//! the Ludo family.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness**: the engine never owns an RNG. Every turn
//!    draws from a [`Die`], so tests and replays can script the rolls.
//!
//! 2. **One mutator**: only [`TurnEngine`] changes a match. Display and
//!    persistence code read tokens and the [`MatchRecord`].
//!
//! 3. **Configuration at construction**: seat count, board topology and the
//!    custom track remap are fixed when a match starts. Matches share the
//!    board read-only.
//!
//! ## Rules in brief
//!
//! - A token leaves home only on a 6 and enters at its seat's start square.
//! - Moves past the finish line are rejected; landing on it exactly
//!   finishes the token and wins the match.
//! - Landing on an opposing token outside a safe zone sends it home.
//! - Special squares skip a seat, reverse play, or grant an extra roll.
//!
//! ## Modules
//!
//! - `core`: players, colors, RNG, configuration, match state, errors
//! - `dice`: the `Die` trait with seeded and scripted sources
//! - `tokens`: token lifecycle
//! - `board`: board topology, special spaces, track remap
//! - `history`: roll, move and throw logs
//! - `rules`: the turn engine and turn order
//! - `persistence`: snapshot contract and JSON/binary encodings

pub mod board;
pub mod core;
pub mod dice;
pub mod history;
pub mod persistence;
pub mod rules;
pub mod tokens;

// Re-export commonly used types
pub use crate::core::{
    Color, ConfigError, EngineError, GameRng, GameRngState, MatchConfig, MatchConfigBuilder,
    MatchState, PlayerId, PlayerMap, SnapshotError, Violation,
};

pub use crate::board::{BoardTopology, SpecialSpace, Square, TrackLayout};

pub use crate::dice::{Die, RandomDie, ScriptedDie};

pub use crate::tokens::{Token, TokenStatus};

pub use crate::history::{MatchRecord, MoveKind, MoveRecord, RollRecord};

pub use crate::rules::{TurnEngine, TurnOrder, TurnOutcome, TurnSummary};

pub use crate::persistence::{MatchSnapshot, ThrowLog, TokenSnapshot};
