//! The turn engine: the only mutator of match state.
//!
//! ## Turn structure
//!
//! 1. The current seat's token gets one roll if it is at home, two if it is
//!    on the track. Leaving home with a 6 earns one follow-up roll.
//! 2. Each roll is applied in order: move, then captures on the landing
//!    square. `Extra` squares queue one more roll; at most
//!    `max_extra_moves` are honoured per turn.
//! 3. Tokens are scanned in seat order; the first finished one wins.
//! 4. The turn passes to the next seat. A `Skip` square already moved the
//!    pointer once during the turn, so one seat is skipped.
//!
//! Once a winner is set (or the match is abandoned) every mutating call is
//! refused and leaves the state untouched.

use crate::board::{Square, SpecialSpace};
use crate::core::error::{EngineError, Violation};
use crate::core::{Color, MatchConfig, MatchState, PlayerId};
use crate::dice::{is_face, Die, Rolls, EXIT_ROLL};
use crate::history::{Captures, MatchRecord, MoveKind, MoveRecord, RollRecord};
use crate::tokens::Token;

/// Rolls granted to a token that starts its turn on the track.
pub const ON_TRACK_ROLLS: usize = 2;

/// Rolls granted to a token that starts its turn at home.
pub const AT_HOME_ROLLS: usize = 1;

/// What one call to [`TurnEngine::play_turn`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn was played.
    Played(TurnSummary),
    /// The call was refused; nothing changed.
    Ignored(Violation),
}

impl TurnOutcome {
    /// The summary, if the turn was played.
    #[must_use]
    pub fn summary(&self) -> Option<&TurnSummary> {
        match self {
            TurnOutcome::Played(summary) => Some(summary),
            TurnOutcome::Ignored(_) => None,
        }
    }
}

/// Summary of a played turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: u32,
    pub player: PlayerId,
    pub rolls: Rolls,
    pub moves: Vec<MoveRecord>,
    pub winner: Option<Color>,
    pub next_player: PlayerId,
}

/// Drives one match.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: MatchConfig,
    state: MatchState,
}

impl TurnEngine {
    /// Start a match with every token at home and seat 0 to play.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let state = MatchState::new(&config);
        log::info!(
            "new match: {} players, track length {}",
            config.player_count(),
            config.board().track_length()
        );
        Self { config, state }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Tokens in seat order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.state.tokens()
    }

    /// Select a token by seat index.
    pub fn token(&self, index: usize) -> Result<&Token, EngineError> {
        self.state
            .tokens()
            .get(index)
            .ok_or(EngineError::OutOfRangeSelection {
                index,
                player_count: self.state.player_count(),
            })
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Seat index of the player to move.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.state.current_player().index()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    #[must_use]
    pub fn record(&self) -> &MatchRecord {
        self.state.record()
    }

    /// Stop the match. Later turns are refused; nothing is rolled back.
    pub fn abandon(&mut self) {
        if !self.state.is_over() {
            log::info!("match abandoned on turn {}", self.state.turn_number);
        }
        self.state.abandoned = true;
    }

    /// Apply one roll to a seat's token.
    ///
    /// Does not resolve captures; call [`resolve_captures`](Self::resolve_captures)
    /// afterwards when the move changed square. An `Extra` landing is
    /// reported in the record's `effect` but no roll is queued. A move that
    /// finishes the token ends the match.
    pub fn apply_move(&mut self, player: PlayerId, steps: u8) -> Result<MoveRecord, EngineError> {
        self.refuse_if_over()?;
        let token = self.select(player)?;
        if token.is_finished() {
            return Err(self.refuse(Violation::TokenFinished).into());
        }
        if !is_face(steps) {
            return Err(self.refuse(Violation::InvalidRoll(steps)).into());
        }
        let record = self.step(player, steps);
        if record.kind == MoveKind::Finished {
            self.detect_winner();
        }
        Ok(record)
    }

    /// Send home every other on-track token sharing `mover`'s square,
    /// unless that square is a safe zone.
    pub fn resolve_captures(&mut self, mover: PlayerId) -> Result<Captures, EngineError> {
        self.refuse_if_over()?;
        let token = self.select(mover)?;
        if !token.is_on_track() {
            return Ok(Captures::new());
        }
        let square = token.position();

        let victims: Captures = self
            .state
            .occupants(square, mover)
            .filter(|&p| !self.state.tokens[p].in_safe_zone())
            .collect();

        for &victim in &victims {
            self.state.tokens[victim].capture();
            log::debug!("{} captured {} on square {}", mover, victim, square);
        }
        if !victims.is_empty() {
            self.state.record.note_captures(mover, &victims);
        }
        Ok(victims)
    }

    /// Play the current seat's full turn, drawing rolls from `die`.
    pub fn play_turn<D: Die + ?Sized>(&mut self, die: &mut D) -> TurnOutcome {
        if let Err(violation) = self.check_open() {
            return TurnOutcome::Ignored(self.refuse(violation));
        }

        let player = self.state.current_player();
        let turn = self.state.turn_number;
        let token = &self.state.tokens[player];
        if token.is_finished() {
            // Only reachable from a restored snapshot without a winner.
            self.detect_winner();
            return TurnOutcome::Ignored(self.refuse(Violation::TokenFinished));
        }

        let mut pending = if token.is_home() { AT_HOME_ROLLS } else { ON_TRACK_ROLLS };
        let mut extras_granted = 0u8;
        let mut rolls = Rolls::new();
        let mut moves = Vec::new();

        while pending > 0 {
            pending -= 1;
            let roll = die.roll_one();
            if !is_face(roll) {
                log::warn!("ignoring die value {} on turn {}", roll, turn);
                continue;
            }
            rolls.push(roll);
            self.state.record.push_roll(RollRecord { turn, player, value: roll });

            let mut record = self.step(player, roll);
            if record.kind.moved() {
                record.captured = self.capture_on_landing(player);
            }

            if record.kind == MoveKind::EnteredTrack {
                pending += 1;
            }
            if record.effect == Some(SpecialSpace::Extra) && record.kind != MoveKind::Finished {
                if extras_granted < self.config.max_extra_moves() {
                    extras_granted += 1;
                    pending += 1;
                } else {
                    log::warn!(
                        "{} hit the extra-move bound ({}) on turn {}",
                        player,
                        extras_granted,
                        turn
                    );
                }
            }

            let finished = record.kind == MoveKind::Finished;
            moves.push(record);
            if finished {
                break;
            }
        }

        let winner = self.detect_winner();
        self.state.turn_order.advance();
        self.state.turn_number += 1;

        TurnOutcome::Played(TurnSummary {
            turn,
            player,
            rolls,
            moves,
            winner,
            next_player: self.state.current_player(),
        })
    }

    /// Play turns until someone wins or `max_turns` have been played.
    pub fn run<D: Die + ?Sized>(&mut self, die: &mut D, max_turns: usize) -> Option<Color> {
        for _ in 0..max_turns {
            if let TurnOutcome::Ignored(_) = self.play_turn(die) {
                break;
            }
            if self.state.winner.is_some() {
                break;
            }
        }
        self.state.winner
    }

    /// Core transition for one roll. The token must not be finished.
    fn step(&mut self, player: PlayerId, steps: u8) -> MoveRecord {
        let board = self.config.board();
        let track_length = board.track_length();
        let token = &mut self.state.tokens[player];
        let from = token.position();

        let (kind, effect) = if token.is_home() {
            if steps == EXIT_ROLL {
                let entry = board.start_offset(player).unwrap_or(0);
                token.place(entry, board.is_safe(entry));
                (MoveKind::EnteredTrack, None)
            } else {
                (MoveKind::StayedHome, None)
            }
        } else {
            let candidate = from.saturating_add(Square::from(steps));
            if candidate >= track_length {
                (MoveKind::Overshoot, None)
            } else {
                token.place(candidate, board.is_safe(candidate));
                let effect = board.special_at(candidate);
                if candidate == board.win_square() {
                    token.finish(track_length);
                    (MoveKind::Finished, effect)
                } else {
                    (MoveKind::Advanced, effect)
                }
            }
        };
        let to = token.position();

        match effect {
            Some(SpecialSpace::Skip) => self.state.turn_order.advance(),
            Some(SpecialSpace::Reverse) => self.state.turn_order.reverse(),
            Some(SpecialSpace::Extra) | None => {}
        }

        self.state.record.push_throw(player, steps);
        let record = MoveRecord {
            turn: self.state.turn_number,
            player,
            roll: steps,
            from,
            to,
            kind,
            effect,
            captured: Captures::new(),
        };
        self.state.record.push_move(record.clone());
        log::debug!("{} rolled {}: {:?} {} -> {} ({:?})", player, steps, kind, from, to, effect);
        record
    }

    fn capture_on_landing(&mut self, mover: PlayerId) -> Captures {
        // Refusal is impossible mid-turn: the match is open and the seat exists.
        self.resolve_captures(mover).unwrap_or_default()
    }

    fn detect_winner(&mut self) -> Option<Color> {
        if self.state.winner.is_none() {
            if let Some(token) = self.state.tokens().iter().find(|t| t.is_finished()) {
                let color = token.color();
                self.state.winner = Some(color);
                log::info!("{} wins on turn {}", color, self.state.turn_number);
            }
        }
        self.state.winner
    }

    fn select(&self, player: PlayerId) -> Result<&Token, EngineError> {
        self.token(player.index())
    }

    fn check_open(&self) -> Result<(), Violation> {
        if self.state.winner.is_some() {
            Err(Violation::MatchOver)
        } else if self.state.abandoned {
            Err(Violation::Abandoned)
        } else {
            Ok(())
        }
    }

    fn refuse_if_over(&self) -> Result<(), EngineError> {
        self.check_open().map_err(|v| self.refuse(v).into())
    }

    fn refuse(&self, violation: Violation) -> Violation {
        log::warn!("ignored call on turn {}: {}", self.state.turn_number, violation);
        violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDie;
    use crate::tokens::TokenStatus;

    fn engine(track_length: u16, offsets: &[Square]) -> TurnEngine {
        let config = MatchConfig::builder()
            .player_count(offsets.len())
            .track_length(track_length)
            .start_offsets(offsets.to_vec())
            .safe_zones([])
            .build()
            .unwrap();
        TurnEngine::new(config)
    }

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_home_token_needs_six() {
        let mut engine = engine(40, &[0, 10]);

        for roll in 1..=5 {
            let record = engine.apply_move(p(0), roll).unwrap();
            assert_eq!(record.kind, MoveKind::StayedHome);
            assert!(engine.tokens()[0].is_home());
            assert_eq!(engine.tokens()[0].position(), 0);
        }

        let record = engine.apply_move(p(1), 6).unwrap();
        assert_eq!(record.kind, MoveKind::EnteredTrack);
        assert_eq!(engine.tokens()[1].status(), TokenStatus::OnTrack);
        assert_eq!(engine.tokens()[1].position(), 10);
    }

    #[test]
    fn test_overshoot_is_rejected() {
        let mut engine = engine(40, &[36, 0]);
        engine.apply_move(p(0), 6).unwrap();

        let record = engine.apply_move(p(0), 5).unwrap();

        assert_eq!(record.kind, MoveKind::Overshoot);
        assert_eq!(engine.tokens()[0].position(), 36);
        assert!(engine.tokens()[0].is_on_track());
    }

    #[test]
    fn test_exact_finish() {
        let mut engine = engine(40, &[35, 0]);
        engine.apply_move(p(0), 6).unwrap();

        let record = engine.apply_move(p(0), 4).unwrap();

        assert_eq!(record.kind, MoveKind::Finished);
        assert_eq!(record.to, 40);
        assert!(engine.tokens()[0].is_finished());
        assert_eq!(engine.tokens()[0].position(), 40);
    }

    #[test]
    fn test_finishing_move_ends_match() {
        let mut engine = engine(10, &[5, 0]);
        engine.apply_move(p(0), 6).unwrap();
        engine.apply_move(p(0), 4).unwrap();
        assert_eq!(engine.winner(), Some(Color::Red));
        let before = engine.state().clone();

        let err = engine.apply_move(p(0), 1).unwrap_err();

        assert_eq!(err, EngineError::InvariantViolation(Violation::MatchOver));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_throw_log_records_every_applied_roll() {
        let mut engine = engine(40, &[0, 10]);
        engine.apply_move(p(0), 3).unwrap();
        engine.apply_move(p(0), 6).unwrap();
        engine.apply_move(p(0), 2).unwrap();

        assert_eq!(engine.record().throws(p(0)), &[3, 6, 2]);
        assert!(engine.record().throws(p(1)).is_empty());
        assert_eq!(engine.record().moves().len(), 3);
    }

    #[test]
    fn test_capture_sends_victim_home() {
        let mut engine = engine(40, &[0, 10]);
        engine.apply_move(p(1), 6).unwrap();
        engine.apply_move(p(0), 6).unwrap();
        engine.apply_move(p(0), 6).unwrap();
        engine.apply_move(p(0), 4).unwrap();

        let captured = engine.resolve_captures(p(0)).unwrap();

        assert_eq!(captured.as_slice(), &[p(1)]);
        assert!(engine.tokens()[1].is_home());
        assert_eq!(engine.tokens()[0].position(), 10);
        assert_eq!(engine.record().moves().back().unwrap().captured.as_slice(), &[p(1)]);
    }

    #[test]
    fn test_no_capture_on_safe_square() {
        let config = MatchConfig::builder()
            .player_count(2)
            .track_length(40)
            .start_offsets([0, 10])
            .safe_zones([10])
            .build()
            .unwrap();
        let mut engine = TurnEngine::new(config);
        engine.apply_move(p(1), 6).unwrap();
        engine.apply_move(p(0), 6).unwrap();
        engine.apply_move(p(0), 5).unwrap();
        engine.apply_move(p(0), 5).unwrap();

        let captured = engine.resolve_captures(p(0)).unwrap();

        assert!(captured.is_empty());
        assert!(engine.tokens()[1].is_on_track());
        assert!(engine.tokens()[0].in_safe_zone());
        assert!(engine.tokens()[1].in_safe_zone());
    }

    #[test]
    fn test_selection_out_of_range() {
        let mut engine = engine(40, &[0, 10]);

        assert_eq!(
            engine.token(2).unwrap_err(),
            EngineError::OutOfRangeSelection { index: 2, player_count: 2 }
        );
        assert!(engine.apply_move(p(3), 6).is_err());
        assert!(engine.resolve_captures(p(2)).is_err());
        assert!(engine.record().moves().is_empty());
    }

    #[test]
    fn test_invalid_roll_is_refused() {
        let mut engine = engine(40, &[0, 10]);

        assert_eq!(
            engine.apply_move(p(0), 7).unwrap_err(),
            EngineError::InvariantViolation(Violation::InvalidRoll(7))
        );
        assert!(engine.record().throw_logs().iter().all(|(_, log)| log.is_empty()));
    }

    #[test]
    fn test_home_exit_earns_follow_up_roll() {
        let mut engine = engine(40, &[0, 10]);
        let mut die = ScriptedDie::new([6, 3]).unwrap();

        let outcome = engine.play_turn(&mut die);
        let summary = outcome.summary().unwrap();

        assert_eq!(summary.rolls.as_slice(), &[6, 3]);
        assert_eq!(engine.tokens()[0].position(), 3);
        assert_eq!(summary.next_player, p(1));
    }

    #[test]
    fn test_home_token_gets_one_roll() {
        let mut engine = engine(40, &[0, 10]);
        let mut die = ScriptedDie::new([2, 6]).unwrap();

        let outcome = engine.play_turn(&mut die);

        assert_eq!(outcome.summary().unwrap().rolls.as_slice(), &[2]);
        assert!(engine.tokens()[0].is_home());
        assert_eq!(engine.current_player(), p(1));
    }

    #[test]
    fn test_on_track_token_gets_two_rolls() {
        let mut engine = engine(40, &[0, 10]);
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([1, 2]).unwrap();

        let outcome = engine.play_turn(&mut die);

        assert_eq!(outcome.summary().unwrap().rolls.as_slice(), &[1, 2]);
        assert_eq!(engine.tokens()[0].position(), 3);
    }

    #[test]
    fn test_skip_square_skips_a_seat() {
        let config = MatchConfig::builder()
            .player_count(3)
            .track_length(30)
            .start_offsets([0, 10, 20])
            .safe_zones([])
            .special_space(4, SpecialSpace::Skip)
            .build()
            .unwrap();
        let mut engine = TurnEngine::new(config);
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([4, 1]).unwrap();

        engine.play_turn(&mut die);

        assert_eq!(engine.current_player(), p(2));
    }

    #[test]
    fn test_reverse_square_flips_direction() {
        let config = MatchConfig::builder()
            .player_count(4)
            .track_length(40)
            .special_space(5, SpecialSpace::Reverse)
            .build()
            .unwrap();
        let mut engine = TurnEngine::new(config);
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([2, 3]).unwrap();

        engine.play_turn(&mut die);

        assert_eq!(engine.current_player(), p(3));
        let order: Vec<_> = engine.state().turn_order().seats().to_vec();
        assert_eq!(order, vec![p(3), p(2), p(1), p(0)]);
    }

    #[test]
    fn test_extra_square_grants_roll() {
        let config = MatchConfig::builder()
            .player_count(2)
            .track_length(40)
            .start_offsets([0, 20])
            .safe_zones([])
            .special_space(3, SpecialSpace::Extra)
            .build()
            .unwrap();
        let mut engine = TurnEngine::new(config);
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([3, 1, 2]).unwrap();

        let outcome = engine.play_turn(&mut die);

        assert_eq!(outcome.summary().unwrap().rolls.as_slice(), &[3, 1, 2]);
        assert_eq!(engine.tokens()[0].position(), 6);
    }

    #[test]
    fn test_extra_moves_are_bounded() {
        // Every square is an extra square: only the bound ends the turn.
        let mut builder = MatchConfig::builder()
            .player_count(2)
            .track_length(200)
            .start_offsets([0, 100])
            .safe_zones([])
            .max_extra_moves(3);
        for square in 1..200 {
            builder = builder.special_space(square, SpecialSpace::Extra);
        }
        let mut engine = TurnEngine::new(builder.build().unwrap());
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([1]).unwrap();

        let outcome = engine.play_turn(&mut die);

        assert_eq!(outcome.summary().unwrap().rolls.len(), 2 + 3);
        assert_eq!(engine.tokens()[0].position(), 5);
    }

    #[test]
    fn test_winner_ends_match() {
        let mut engine = engine(10, &[5, 0]);
        engine.apply_move(p(0), 6).unwrap();
        let mut die = ScriptedDie::new([4, 1]).unwrap();

        let outcome = engine.play_turn(&mut die);

        let summary = outcome.summary().unwrap();
        assert_eq!(summary.rolls.as_slice(), &[4]);
        assert_eq!(summary.winner, Some(Color::Red));
        assert_eq!(engine.winner(), Some(Color::Red));

        let before = engine.state().clone();
        assert_eq!(engine.play_turn(&mut die), TurnOutcome::Ignored(Violation::MatchOver));
        assert!(engine.apply_move(p(1), 6).is_err());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_abandon_stops_play() {
        let mut engine = engine(40, &[0, 10]);
        let mut die = ScriptedDie::new([6, 2]).unwrap();
        engine.play_turn(&mut die);
        let position = engine.tokens()[0].position();

        engine.abandon();

        assert_eq!(engine.play_turn(&mut die), TurnOutcome::Ignored(Violation::Abandoned));
        assert_eq!(engine.tokens()[0].position(), position);
        assert!(engine.state().is_abandoned());
    }

    #[test]
    fn test_invalid_die_value_is_skipped() {
        struct Broken;
        impl Die for Broken {
            fn roll_one(&mut self) -> u8 {
                9
            }
        }
        let mut engine = engine(40, &[0, 10]);

        let outcome = engine.play_turn(&mut Broken);

        assert!(outcome.summary().unwrap().rolls.is_empty());
        assert!(engine.record().rolls().is_empty());
        assert_eq!(engine.current_player(), p(1));
    }

    #[test]
    fn test_run_until_winner() {
        let mut engine = engine(10, &[0, 5]);
        let mut die = ScriptedDie::new([6, 3, 6, 2, 3, 3]).unwrap();

        let winner = engine.run(&mut die, 100);

        assert!(winner.is_some());
        assert_eq!(engine.winner(), winner);
    }
}
