//! Mutable match state owned by the turn engine.
//!
//! ## MatchState
//!
//! - One token per seat, indexed by seat (never reordered)
//! - Explicit turn order with a cursor on the current seat
//! - Winner, set exactly once
//! - Roll, move and throw history
//!
//! Everything is read-only from outside the crate; only
//! [`TurnEngine`](crate::rules::TurnEngine) mutates it.

use serde::Serialize;

use super::config::MatchConfig;
use super::player::{Color, PlayerId, PlayerMap};
use crate::history::MatchRecord;
use crate::rules::TurnOrder;
use crate::tokens::Token;

/// Complete state of one match.
///
/// Serializable for inspection only. Restoring goes through
/// [`MatchSnapshot`](crate::persistence::MatchSnapshot), which validates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub(crate) tokens: PlayerMap<Token>,
    pub(crate) turn_order: TurnOrder,
    /// Turn number (starts at 1).
    pub(crate) turn_number: u32,
    pub(crate) winner: Option<Color>,
    pub(crate) abandoned: bool,
    pub(crate) record: MatchRecord,
}

impl MatchState {
    /// All tokens at home, seat 0 to play.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let player_count = config.player_count();
        Self {
            tokens: PlayerMap::new(player_count, |p| Token::new(p.color())),
            turn_order: TurnOrder::new(player_count),
            turn_number: 1,
            winner: None,
            abandoned: false,
            record: MatchRecord::new(player_count),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.tokens.player_count()
    }

    /// Tokens in seat order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_slice()
    }

    #[must_use]
    pub fn token(&self, player: PlayerId) -> Option<&Token> {
        self.tokens.get(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order.current()
    }

    #[must_use]
    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// True once a winner is set or the match was abandoned.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.abandoned
    }

    #[must_use]
    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    /// Seats other than `player` whose tokens are on the track at `square`.
    pub(crate) fn occupants(&self, square: u16, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.tokens
            .iter()
            .filter(move |(p, t)| *p != player && t.is_on_track() && t.position() == square)
            .map(|(p, _)| p)
    }
}
