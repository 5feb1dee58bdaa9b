//! Snapshot data contract and the pure export/import pair.
//!
//! Import is all-or-nothing: the snapshot is validated and rebuilt into a
//! scratch [`MatchState`], which replaces the live state only on success.

use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::core::error::SnapshotError;
use crate::core::{Color, MatchConfig, MatchState, PlayerId, PlayerMap};
use crate::dice::is_face;
use crate::history::MatchRecord;
use crate::rules::{TurnEngine, TurnOrder};
use crate::tokens::{Token, TokenStatus};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Saved state of one token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub color: Color,
    pub position: Square,
    pub at_home: bool,
    pub finished: bool,
    pub safe_zone: bool,
}

/// Rolls applied to one color's token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowLog {
    pub color: Color,
    pub rolls: Vec<u8>,
}

/// Everything needed to resume a match on the same configuration.
///
/// Roll and move logs are not part of the contract; a restored match
/// starts them empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub version: u32,
    pub turn_number: u32,
    /// Seat index of the player to move.
    pub current_player: usize,
    /// Seat indices in play order.
    pub turn_order: Vec<usize>,
    pub winner: Option<Color>,
    #[serde(default)]
    pub abandoned: bool,
    pub throw_logs: Vec<ThrowLog>,
    pub tokens: Vec<TokenSnapshot>,
}

impl TurnEngine {
    /// Capture the match as a snapshot. No I/O.
    #[must_use]
    pub fn export_state(&self) -> MatchSnapshot {
        let state = self.state();
        MatchSnapshot {
            version: SNAPSHOT_VERSION,
            turn_number: state.turn_number(),
            current_player: state.current_player().index(),
            turn_order: state.turn_order().seats().iter().map(|p| p.index()).collect(),
            winner: state.winner(),
            abandoned: state.is_abandoned(),
            throw_logs: state
                .record()
                .throw_logs()
                .iter()
                .map(|(player, rolls)| ThrowLog {
                    color: player.color(),
                    rolls: rolls.clone(),
                })
                .collect(),
            tokens: state
                .tokens()
                .iter()
                .map(|t| TokenSnapshot {
                    color: t.color(),
                    position: t.position(),
                    at_home: t.is_home(),
                    finished: t.is_finished(),
                    safe_zone: t.in_safe_zone(),
                })
                .collect(),
        }
    }

    /// Replace the match with a snapshot. On error nothing changes.
    pub fn import_state(&mut self, snapshot: &MatchSnapshot) -> Result<(), SnapshotError> {
        let restored = restore(self.config(), snapshot)?;
        *self.state_mut() = restored;
        log::info!(
            "restored match at turn {} ({} to play)",
            snapshot.turn_number,
            PlayerId::new(snapshot.current_player as u8)
        );
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SnapshotError {
    SnapshotError::Validation(msg.into())
}

fn restore(config: &MatchConfig, snapshot: &MatchSnapshot) -> Result<MatchState, SnapshotError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: snapshot.version,
            supported: SNAPSHOT_VERSION,
        });
    }
    let player_count = config.player_count();
    if snapshot.turn_number == 0 {
        return Err(invalid("turn number starts at 1"));
    }
    if snapshot.tokens.len() != player_count {
        return Err(invalid(format!(
            "{} tokens for a {}-player match",
            snapshot.tokens.len(),
            player_count
        )));
    }
    if snapshot.throw_logs.len() != player_count {
        return Err(invalid(format!(
            "{} throw logs for a {}-player match",
            snapshot.throw_logs.len(),
            player_count
        )));
    }

    let mut tokens = Vec::with_capacity(player_count);
    for (seat, saved) in PlayerId::all(player_count).zip(&snapshot.tokens) {
        tokens.push(restore_token(config, seat, saved)?);
    }
    let tokens = PlayerMap::new(player_count, |p| tokens[p.index()].clone());

    let mut throws = PlayerMap::with_default(player_count);
    for (seat, log) in PlayerId::all(player_count).zip(&snapshot.throw_logs) {
        if log.color != seat.color() {
            return Err(invalid(format!("throw log for {} in {}'s seat", log.color, seat.color())));
        }
        if let Some(&bad) = log.rolls.iter().find(|&&r| !is_face(r)) {
            return Err(invalid(format!("throw log for {} holds die value {}", log.color, bad)));
        }
        throws[seat] = log.rolls.clone();
    }

    let seats = snapshot
        .turn_order
        .iter()
        .map(|&i| u8::try_from(i).map(PlayerId::new))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("turn order seat out of range"))?;
    let current = u8::try_from(snapshot.current_player)
        .map(PlayerId::new)
        .map_err(|_| invalid("current player out of range"))?;
    let turn_order = TurnOrder::from_parts(player_count, seats, current)
        .ok_or_else(|| invalid("turn order is not a permutation of the seats containing the current player"))?;

    if let Some(color) = snapshot.winner {
        match tokens.get(color.seat()) {
            Some(token) if token.is_finished() => {}
            _ => return Err(invalid(format!("winner {} has no finished token", color))),
        }
    }

    let mut record = MatchRecord::new(player_count);
    record.reset_with_throws(throws);

    Ok(MatchState {
        tokens,
        turn_order,
        turn_number: snapshot.turn_number,
        winner: snapshot.winner,
        abandoned: snapshot.abandoned,
        record,
    })
}

fn restore_token(config: &MatchConfig, seat: PlayerId, saved: &TokenSnapshot) -> Result<Token, SnapshotError> {
    let board = config.board();
    if saved.color != seat.color() {
        return Err(invalid(format!("{} token in {}'s seat", saved.color, seat.color())));
    }
    let status = match (saved.at_home, saved.finished) {
        (true, true) => return Err(invalid(format!("{} token is both home and finished", saved.color))),
        (true, false) => TokenStatus::AtHome,
        (false, true) => TokenStatus::Finished,
        (false, false) => TokenStatus::OnTrack,
    };
    let expected_safe = status == TokenStatus::OnTrack && board.is_safe(saved.position);
    let position_ok = match status {
        TokenStatus::AtHome => saved.position == 0,
        TokenStatus::Finished => saved.position == board.track_length(),
        TokenStatus::OnTrack => saved.position < board.win_square(),
    };
    if !position_ok {
        return Err(invalid(format!(
            "{} token at {} is inconsistent with {:?}",
            saved.color, saved.position, status
        )));
    }
    if saved.safe_zone != expected_safe {
        return Err(invalid(format!("{} token has a stale safe-zone flag", saved.color)));
    }
    Ok(Token {
        color: saved.color,
        position: saved.position,
        status,
        in_safe_zone: saved.safe_zone,
    })
}
