//! Append-only match history.
//!
//! The rules never read these logs back; they exist for display and
//! persistence consumers. `im::Vector` keeps cloning a long match cheap.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Square, SpecialSpace};
use crate::core::{PlayerId, PlayerMap};

/// Seats captured by one move.
pub type Captures = SmallVec<[PlayerId; 3]>;

/// One die roll drawn during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub turn: u32,
    pub player: PlayerId,
    pub value: u8,
}

/// What a single move did to the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Home token rolled something other than a 6.
    StayedHome,
    /// Home token rolled a 6 and entered at its start square.
    EnteredTrack,
    /// Token moved along the track.
    Advanced,
    /// Move would have run past the finish line; token stayed put.
    Overshoot,
    /// Token landed exactly on the finish square.
    Finished,
}

impl MoveKind {
    /// True when the token changed square.
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, MoveKind::EnteredTrack | MoveKind::Advanced | MoveKind::Finished)
    }
}

/// One applied move, with the effects and captures it caused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub player: PlayerId,
    pub roll: u8,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub effect: Option<SpecialSpace>,
    pub captured: Captures,
}

/// Roll log, move log and per-color throw logs for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    rolls: Vector<RollRecord>,
    moves: Vector<MoveRecord>,
    throws: PlayerMap<Vec<u8>>,
}

impl MatchRecord {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            rolls: Vector::new(),
            moves: Vector::new(),
            throws: PlayerMap::with_default(player_count),
        }
    }

    /// Every roll drawn from the die, in order.
    #[must_use]
    pub fn rolls(&self) -> &Vector<RollRecord> {
        &self.rolls
    }

    /// Every move applied, in order.
    #[must_use]
    pub fn moves(&self) -> &Vector<MoveRecord> {
        &self.moves
    }

    /// Rolls applied to a seat's token.
    #[must_use]
    pub fn throws(&self, player: PlayerId) -> &[u8] {
        self.throws.get(player).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn throw_logs(&self) -> &PlayerMap<Vec<u8>> {
        &self.throws
    }

    pub(crate) fn push_roll(&mut self, record: RollRecord) {
        self.rolls.push_back(record);
    }

    pub(crate) fn push_move(&mut self, record: MoveRecord) {
        self.moves.push_back(record);
    }

    pub(crate) fn push_throw(&mut self, player: PlayerId, value: u8) {
        if let Some(log) = self.throws.get_mut(player) {
            log.push(value);
        }
    }

    /// Attach captures to the latest move, if it belongs to `mover`.
    pub(crate) fn note_captures(&mut self, mover: PlayerId, captured: &[PlayerId]) {
        if let Some(last) = self.moves.back_mut() {
            if last.player == mover {
                last.captured.extend_from_slice(captured);
            }
        }
    }

    /// Drop the roll and move logs and install restored throw logs.
    pub(crate) fn reset_with_throws(&mut self, throws: PlayerMap<Vec<u8>>) {
        self.rolls = Vector::new();
        self.moves = Vector::new();
        self.throws = throws;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(player: u8, roll: u8) -> MoveRecord {
        MoveRecord {
            turn: 1,
            player: PlayerId::new(player),
            roll,
            from: 0,
            to: roll as Square,
            kind: MoveKind::Advanced,
            effect: None,
            captured: Captures::new(),
        }
    }

    #[test]
    fn test_move_kind_moved() {
        assert!(MoveKind::EnteredTrack.moved());
        assert!(MoveKind::Finished.moved());
        assert!(!MoveKind::StayedHome.moved());
        assert!(!MoveKind::Overshoot.moved());
    }

    #[test]
    fn test_logs_append_in_order() {
        let mut record = MatchRecord::new(2);
        record.push_roll(RollRecord { turn: 1, player: PlayerId::new(0), value: 6 });
        record.push_roll(RollRecord { turn: 1, player: PlayerId::new(0), value: 2 });
        record.push_throw(PlayerId::new(0), 6);
        record.push_throw(PlayerId::new(0), 2);

        let values: Vec<_> = record.rolls().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![6, 2]);
        assert_eq!(record.throws(PlayerId::new(0)), &[6, 2]);
        assert!(record.throws(PlayerId::new(1)).is_empty());
        assert!(record.throws(PlayerId::new(3)).is_empty());
    }

    #[test]
    fn test_captures_attach_to_movers_latest_move() {
        let mut record = MatchRecord::new(3);
        record.push_move(advanced(0, 3));

        record.note_captures(PlayerId::new(0), &[PlayerId::new(2)]);
        record.note_captures(PlayerId::new(1), &[PlayerId::new(0)]);

        let last = record.moves().back().unwrap();
        assert_eq!(last.captured.as_slice(), &[PlayerId::new(2)]);
    }

    #[test]
    fn test_reset_keeps_only_throws() {
        let mut record = MatchRecord::new(2);
        record.push_move(advanced(1, 4));
        record.push_roll(RollRecord { turn: 1, player: PlayerId::new(1), value: 4 });

        let mut throws = PlayerMap::with_default(2);
        throws[PlayerId::new(1)] = vec![6, 4];
        record.reset_with_throws(throws);

        assert!(record.moves().is_empty());
        assert!(record.rolls().is_empty());
        assert_eq!(record.throws(PlayerId::new(1)), &[6, 4]);
    }

    #[test]
    fn test_record_serialization() {
        let mut record = MatchRecord::new(2);
        record.push_move(advanced(0, 5));

        let json = serde_json::to_string(&record).unwrap();
        let restored: MatchRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, restored);
    }
}
