//! Custom track remap.
//!
//! A layout maps each logical track offset to a physical square id on a
//! particular printed board. The rules only ever see offsets; renderers use
//! the layout to find where to draw a token.

use serde::{Deserialize, Serialize};

use super::Square;
use crate::core::error::ConfigError;

/// Physical square id for every logical offset, in track order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLayout {
    squares: Vec<u16>,
}

impl TrackLayout {
    pub fn new(squares: Vec<u16>) -> Self {
        Self { squares }
    }

    /// The identity layout for a track of `track_length` squares.
    pub fn identity(track_length: u16) -> Self {
        Self::new((0..track_length).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Physical square for a logical position, `None` once off the track
    /// (including the finished position).
    #[must_use]
    pub fn square(&self, position: Square) -> Option<u16> {
        self.squares.get(usize::from(position)).copied()
    }

    pub(crate) fn check_length(&self, track_length: u16) -> Result<(), ConfigError> {
        if self.squares.len() != usize::from(track_length) {
            return Err(ConfigError::TrackLayoutLength {
                expected: usize::from(track_length),
                actual: self.squares.len(),
            });
        }
        Ok(())
    }
}
