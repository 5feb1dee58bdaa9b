//! Match configuration.
//!
//! Everything here is supplied at match-construction time only:
//! - seat count (2-4)
//! - board topology (track length, entry squares, safe zones, specials)
//! - optional custom track remap
//! - the per-turn bound on granted extra moves
//!
//! Invalid input is rejected with [`ConfigError`] and never half-applied.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::error::ConfigError;
use super::player::{Color, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::board::{BoardTopology, Square, SpecialSpace, TrackLayout};

/// Default bound on extra moves honoured within one turn.
pub const DEFAULT_MAX_EXTRA_MOVES: u8 = 8;

/// Complete, validated match configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    player_count: usize,
    board: Arc<BoardTopology>,
    max_extra_moves: u8,
}

impl MatchConfig {
    /// Start building a configuration.
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    /// Classic board for `player_count` seats.
    pub fn classic(player_count: usize) -> Result<Self, ConfigError> {
        Self::builder().player_count(player_count).build()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn board(&self) -> &BoardTopology {
        &self.board
    }

    /// Shared handle to the board, for matches that outlive this config.
    #[must_use]
    pub fn shared_board(&self) -> Arc<BoardTopology> {
        Arc::clone(&self.board)
    }

    #[must_use]
    pub fn max_extra_moves(&self) -> u8 {
        self.max_extra_moves
    }

    /// Colors in seat order.
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        PlayerId::all(self.player_count).map(PlayerId::color)
    }

    /// Replace the custom track remap. On error the prior layout stays.
    pub fn try_set_track_layout(&mut self, squares: Vec<u16>) -> Result<(), ConfigError> {
        let layout = TrackLayout::new(squares);
        if let Err(err) = layout.check_length(self.board.track_length()) {
            log::warn!("custom track rejected, keeping prior layout: {err}");
            return Err(err);
        }
        Arc::make_mut(&mut self.board).set_layout(Some(layout));
        Ok(())
    }

    /// Replace the safe-zone set. On error the prior set stays.
    pub fn try_set_safe_zones(
        &mut self,
        squares: impl IntoIterator<Item = Square>,
    ) -> Result<(), ConfigError> {
        let squares: FxHashSet<Square> = squares.into_iter().collect();
        if let Err(err) = self.board.check_squares(squares.iter().copied()) {
            log::warn!("safe zones rejected, keeping prior set: {err}");
            return Err(err);
        }
        Arc::make_mut(&mut self.board).set_safe_zones(squares);
        Ok(())
    }

    /// Replace the special-space mapping. On error the prior mapping stays.
    pub fn try_set_special_spaces(
        &mut self,
        specials: impl IntoIterator<Item = (Square, SpecialSpace)>,
    ) -> Result<(), ConfigError> {
        let specials: FxHashMap<Square, SpecialSpace> = specials.into_iter().collect();
        if let Err(err) = self.board.check_squares(specials.keys().copied()) {
            log::warn!("special spaces rejected, keeping prior mapping: {err}");
            return Err(err);
        }
        Arc::make_mut(&mut self.board).set_special_spaces(specials);
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: MAX_PLAYERS,
            board: Arc::new(BoardTopology::classic()),
            max_extra_moves: DEFAULT_MAX_EXTRA_MOVES,
        }
    }
}

/// Builder for [`MatchConfig`].
///
/// Unset fields fall back to the classic board: 40 squares, entry squares
/// spaced a quarter-lap apart, safe zones on the entry squares.
#[derive(Clone, Debug)]
pub struct MatchConfigBuilder {
    player_count: usize,
    track_length: u16,
    start_offsets: Option<Vec<Square>>,
    safe_zones: Option<FxHashSet<Square>>,
    special_spaces: FxHashMap<Square, SpecialSpace>,
    track_layout: Option<Vec<u16>>,
    max_extra_moves: u8,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        Self {
            player_count: MAX_PLAYERS,
            track_length: BoardTopology::CLASSIC_TRACK_LENGTH,
            start_offsets: None,
            safe_zones: None,
            special_spaces: FxHashMap::default(),
            track_layout: None,
            max_extra_moves: DEFAULT_MAX_EXTRA_MOVES,
        }
    }
}

impl MatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn track_length(mut self, length: u16) -> Self {
        self.track_length = length;
        self
    }

    pub fn start_offsets(mut self, offsets: impl Into<Vec<Square>>) -> Self {
        self.start_offsets = Some(offsets.into());
        self
    }

    pub fn safe_zones(mut self, squares: impl IntoIterator<Item = Square>) -> Self {
        self.safe_zones = Some(squares.into_iter().collect());
        self
    }

    pub fn special_space(mut self, square: Square, effect: SpecialSpace) -> Self {
        self.special_spaces.insert(square, effect);
        self
    }

    pub fn track_layout(mut self, squares: impl Into<Vec<u16>>) -> Self {
        self.track_layout = Some(squares.into());
        self
    }

    pub fn max_extra_moves(mut self, bound: u8) -> Self {
        self.max_extra_moves = bound;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }

        let start_offsets = self.start_offsets.unwrap_or_else(|| {
            (0..MAX_PLAYERS as u16)
                .map(|seat| seat * (self.track_length / MAX_PLAYERS as u16))
                .collect()
        });
        let safe_zones = self
            .safe_zones
            .unwrap_or_else(|| start_offsets.iter().copied().collect());

        let mut board = BoardTopology::new(self.track_length, start_offsets);
        board.set_safe_zones(safe_zones);
        board.set_special_spaces(self.special_spaces);
        board.set_layout(self.track_layout.map(TrackLayout::new));
        board.validate(self.player_count)?;

        Ok(MatchConfig {
            player_count: self.player_count,
            board: Arc::new(board),
            max_extra_moves: self.max_extra_moves,
        })
    }

    /// Build, or log the rejection and fall back to the classic board.
    pub fn build_or_default(self) -> MatchConfig {
        let player_count = self.player_count;
        match self.build() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("invalid match configuration, using classic board: {err}");
                MatchConfig::classic(player_count).unwrap_or_default()
            }
        }
    }
}
