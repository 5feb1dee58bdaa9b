//! Turn order as an explicit seat list.
//!
//! Reversing play direction rewrites this list only. Token storage is
//! indexed by seat and never reordered.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Seats in play order plus a cursor on the seat whose turn it is.
///
/// Deserialization goes through [`TurnOrder::from_parts`], so a decoded
/// order is always a permutation with the cursor on a seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SavedOrder")]
pub struct TurnOrder {
    seats: Vec<PlayerId>,
    cursor: usize,
}

#[derive(Deserialize)]
struct SavedOrder {
    seats: Vec<PlayerId>,
    cursor: usize,
}

impl TryFrom<SavedOrder> for TurnOrder {
    type Error = String;

    fn try_from(saved: SavedOrder) -> Result<Self, Self::Error> {
        let current = *saved
            .seats
            .get(saved.cursor)
            .ok_or_else(|| format!("cursor {} is past {} seats", saved.cursor, saved.seats.len()))?;
        let player_count = saved.seats.len();
        Self::from_parts(player_count, saved.seats, current)
            .ok_or_else(|| "seats are not a permutation of the table".to_string())
    }
}

impl TurnOrder {
    /// Seats `0..player_count`, starting with seat 0.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            seats: PlayerId::all(player_count).collect(),
            cursor: 0,
        }
    }

    /// Rebuild from a saved seat list and current seat.
    ///
    /// Returns `None` unless `seats` is a permutation of `0..player_count`
    /// containing `current`.
    #[must_use]
    pub fn from_parts(player_count: usize, seats: Vec<PlayerId>, current: PlayerId) -> Option<Self> {
        if seats.len() != player_count {
            return None;
        }
        let mut seen = vec![false; player_count];
        for seat in &seats {
            let slot = seen.get_mut(seat.index())?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        let cursor = seats.iter().position(|&s| s == current)?;
        Some(Self { seats, cursor })
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.seats[self.cursor]
    }

    /// Seats in the order turns are taken from here on.
    #[must_use]
    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    /// Pass the turn to the next seat in the current direction.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.seats.len();
    }

    /// Flip the direction of play, keeping the current seat.
    pub fn reverse(&mut self) {
        self.seats.reverse();
        self.cursor = self.seats.len() - 1 - self.cursor;
    }
}
