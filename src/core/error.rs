//! Error types for configuration, engine calls and snapshots.

use thiserror::Error;

/// Rejected match or board configuration.
///
/// Configuration errors are non-fatal: the caller keeps its prior (or the
/// classic) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count {0} is outside 2..=4")]
    PlayerCount(usize),

    #[error("track length {0} is too short (need at least 2 squares)")]
    TrackTooShort(u16),

    #[error("expected at least {expected} start offsets, got {actual}")]
    StartOffsetCount { expected: usize, actual: usize },

    #[error("start offset {offset} is not before the finish of a track of length {track_length}")]
    StartOffsetOutOfRange { offset: u16, track_length: u16 },

    #[error("square {square} is off a track of length {track_length}")]
    SquareOutOfRange { square: u16, track_length: u16 },

    #[error("custom track has {actual} squares, board needs exactly {expected}")]
    TrackLayoutLength { expected: usize, actual: usize },
}

/// Driver mistakes that the engine absorbs as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("the match is already over")]
    MatchOver,

    #[error("the match was abandoned")]
    Abandoned,

    #[error("the token has already finished")]
    TokenFinished,

    #[error("die value {0} is outside 1..=6")]
    InvalidRoll(u8),
}

/// Errors returned by [`TurnEngine`](crate::rules::TurnEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("token selection {index} is outside 0..{player_count}")]
    OutOfRangeSelection { index: usize, player_count: usize },

    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),
}

/// Failures while encoding, decoding or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    VersionMismatch { found: u32, supported: u32 },

    #[error("snapshot rejected: {0}")]
    Validation(String),

    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),

    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
