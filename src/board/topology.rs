//! Static board description: track, start squares, safe zones, specials.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::layout::TrackLayout;
use super::Square;
use crate::core::error::ConfigError;
use crate::core::PlayerId;

/// Rule effect attached to a track square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialSpace {
    /// Advance the turn pointer immediately, skipping the next player.
    Skip,
    /// Reverse turn order for the rest of the match.
    Reverse,
    /// Grant the landing token one more roll this turn.
    Extra,
}

/// Board topology shared read-only by every match played on it.
///
/// Positions are offsets on one shared track. `track_length - 1` is the
/// finish square; a token that lands there exactly is finished and parked at
/// `track_length`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardTopology {
    track_length: u16,
    start_offsets: Vec<Square>,
    safe_zones: FxHashSet<Square>,
    special_spaces: FxHashMap<Square, SpecialSpace>,
    layout: Option<TrackLayout>,
}

impl BoardTopology {
    /// Squares on the classic board.
    pub const CLASSIC_TRACK_LENGTH: u16 = 40;

    /// Create a bare topology (no safe zones, no specials).
    pub fn new(track_length: u16, start_offsets: Vec<Square>) -> Self {
        Self {
            track_length,
            start_offsets,
            safe_zones: FxHashSet::default(),
            special_spaces: FxHashMap::default(),
            layout: None,
        }
    }

    /// 40 squares, four entry squares a quarter-lap apart, each of them safe.
    pub fn classic() -> Self {
        let offsets = vec![0, 10, 20, 30];
        let mut board = Self::new(Self::CLASSIC_TRACK_LENGTH, offsets.clone());
        board.safe_zones = offsets.into_iter().collect();
        board
    }

    #[must_use]
    pub fn track_length(&self) -> u16 {
        self.track_length
    }

    /// The finish line. Landing here exactly finishes a token.
    #[must_use]
    pub fn win_square(&self) -> Square {
        self.track_length.saturating_sub(1)
    }

    /// Entry square for a seat, if one is configured.
    #[must_use]
    pub fn start_offset(&self, player: PlayerId) -> Option<Square> {
        self.start_offsets.get(player.index()).copied()
    }

    #[must_use]
    pub fn start_offsets(&self) -> &[Square] {
        &self.start_offsets
    }

    #[must_use]
    pub fn is_safe(&self, square: Square) -> bool {
        self.safe_zones.contains(&square)
    }

    #[must_use]
    pub fn safe_zones(&self) -> &FxHashSet<Square> {
        &self.safe_zones
    }

    #[must_use]
    pub fn special_at(&self, square: Square) -> Option<SpecialSpace> {
        self.special_spaces.get(&square).copied()
    }

    #[must_use]
    pub fn special_spaces(&self) -> &FxHashMap<Square, SpecialSpace> {
        &self.special_spaces
    }

    #[must_use]
    pub fn layout(&self) -> Option<&TrackLayout> {
        self.layout.as_ref()
    }

    pub(crate) fn set_safe_zones(&mut self, squares: FxHashSet<Square>) {
        self.safe_zones = squares;
    }

    pub(crate) fn set_special_spaces(&mut self, specials: FxHashMap<Square, SpecialSpace>) {
        self.special_spaces = specials;
    }

    pub(crate) fn set_layout(&mut self, layout: Option<TrackLayout>) {
        self.layout = layout;
    }

    /// Check the whole topology for a table of `player_count` seats.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if self.track_length < 2 {
            return Err(ConfigError::TrackTooShort(self.track_length));
        }
        if self.start_offsets.len() < player_count {
            return Err(ConfigError::StartOffsetCount {
                expected: player_count,
                actual: self.start_offsets.len(),
            });
        }
        for &offset in &self.start_offsets {
            if offset >= self.win_square() {
                return Err(ConfigError::StartOffsetOutOfRange {
                    offset,
                    track_length: self.track_length,
                });
            }
        }
        self.check_squares(self.safe_zones.iter().copied())?;
        self.check_squares(self.special_spaces.keys().copied())?;
        if let Some(layout) = &self.layout {
            layout.check_length(self.track_length)?;
        }
        Ok(())
    }

    pub(crate) fn check_squares(
        &self,
        squares: impl IntoIterator<Item = Square>,
    ) -> Result<(), ConfigError> {
        match squares.into_iter().find(|&sq| sq >= self.track_length) {
            Some(square) => Err(ConfigError::SquareOutOfRange {
                square,
                track_length: self.track_length,
            }),
            None => Ok(()),
        }
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::classic()
    }
}
