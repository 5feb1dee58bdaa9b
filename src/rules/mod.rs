//! Turn rules: movement, captures, special spaces, rotation, winner.
//!
//! [`TurnEngine`] is the single mutator of a match. It consumes rolls from
//! an injected [`Die`](crate::dice::Die) and never formats output itself;
//! display code reads tokens and the match record.

pub mod engine;
pub mod order;

pub use engine::{TurnEngine, TurnOutcome, TurnSummary, AT_HOME_ROLLS, ON_TRACK_ROLLS};
pub use order::TurnOrder;
