//! Match history: roll log, move log and per-color throw logs.
//!
//! Read-only for everything outside the turn engine.

mod record;

pub use record::{Captures, MatchRecord, MoveKind, MoveRecord, RollRecord};
