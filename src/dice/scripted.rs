//! Deterministic die for tests and replays.

use super::{is_face, Die};
use crate::core::error::Violation;

/// Plays back a fixed roll sequence, wrapping around when it runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDie {
    script: Vec<u8>,
    cursor: usize,
}

impl ScriptedDie {
    /// Build from a sequence of faces.
    ///
    /// Rejects the first value outside `1..=6`. An empty sequence yields a
    /// die that always rolls 1.
    pub fn new(script: impl IntoIterator<Item = u8>) -> Result<Self, Violation> {
        let mut script: Vec<u8> = script.into_iter().collect();
        if let Some(&bad) = script.iter().find(|&&v| !is_face(v)) {
            return Err(Violation::InvalidRoll(bad));
        }
        if script.is_empty() {
            script.push(1);
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Rolls handed out so far.
    #[must_use]
    pub fn rolls_used(&self) -> usize {
        self.cursor
    }
}

impl Die for ScriptedDie {
    fn roll_one(&mut self) -> u8 {
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value
    }
}
