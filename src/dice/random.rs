//! Seeded uniform die.

use super::{Die, FACES};
use crate::core::{GameRng, GameRngState};

/// A fair six-sided die backed by [`GameRng`].
#[derive(Clone, Debug)]
pub struct RandomDie {
    rng: GameRng,
}

impl RandomDie {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    /// An independent die for another match, derived from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::from_rng(self.rng.fork())
    }

    /// Capture the stream position so a replay can resume it.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::from_rng(GameRng::from_state(state))
    }
}

impl Die for RandomDie {
    fn roll_one(&mut self) -> u8 {
        self.rng.roll_face(FACES)
    }
}
