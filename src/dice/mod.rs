//! Die roll sources.
//!
//! The engine never owns randomness. Every turn draws from an injected
//! [`Die`], so matches can be driven by a seeded RNG in play and by a
//! scripted sequence in tests and replays.
//!
//! ```
//! use ludo_engine::dice::{Die, ScriptedDie};
//!
//! let mut die = ScriptedDie::new([6, 4]).unwrap();
//! assert_eq!(die.roll_n(2).as_slice(), &[6, 4]);
//! ```

mod random;
mod scripted;

pub use random::RandomDie;
pub use scripted::ScriptedDie;

use smallvec::SmallVec;

/// Number of faces on the die.
pub const FACES: u8 = 6;

/// The face that lets a token leave home.
pub const EXIT_ROLL: u8 = 6;

/// Rolls drawn for one turn. Turns rarely need more than a handful.
pub type Rolls = SmallVec<[u8; 4]>;

/// True when `value` is a face of the die.
#[must_use]
pub fn is_face(value: u8) -> bool {
    (1..=FACES).contains(&value)
}

/// A source of independent, uniform rolls in `1..=6`.
pub trait Die {
    /// Draw one roll.
    fn roll_one(&mut self) -> u8;

    /// Draw `count` rolls in order.
    fn roll_n(&mut self, count: usize) -> Rolls {
        (0..count).map(|_| self.roll_one()).collect()
    }
}

impl<D: Die + ?Sized> Die for &mut D {
    fn roll_one(&mut self) -> u8 {
        (**self).roll_one()
    }
}

impl<D: Die + ?Sized> Die for Box<D> {
    fn roll_one(&mut self) -> u8 {
        (**self).roll_one()
    }
}
