//! Board topology: track length, entry squares, safe zones and special
//! spaces.
//!
//! A topology is fixed for the lifetime of a match. Matches hold it behind
//! an `Arc` inside [`MatchConfig`](crate::core::MatchConfig), so concurrent
//! matches share one immutable board.

mod layout;
mod topology;

pub use layout::TrackLayout;
pub use topology::{BoardTopology, SpecialSpace};

/// Offset on the shared track.
pub type Square = u16;
