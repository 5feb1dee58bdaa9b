//! Core engine types: players, colors, RNG, configuration, state, errors.
//!
//! These are the building blocks every other module is written against.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{MatchConfig, MatchConfigBuilder, DEFAULT_MAX_EXTRA_MOVES};
pub use error::{ConfigError, EngineError, SnapshotError, Violation};
pub use player::{Color, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use state::MatchState;
