//! A single player piece.

use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::core::{Color, PlayerId};

/// Where a token is in its lifecycle.
///
/// `AtHome -> OnTrack -> Finished`. A capture sends `OnTrack` back to
/// `AtHome`; nothing leaves `Finished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    #[default]
    AtHome,
    OnTrack,
    Finished,
}

/// One player's piece.
///
/// Fields are only mutated by the turn engine. `in_safe_zone` is recomputed
/// on every move and never otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub(crate) color: Color,
    pub(crate) position: Square,
    pub(crate) status: TokenStatus,
    pub(crate) in_safe_zone: bool,
}

impl Token {
    /// A fresh token waiting at home.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            position: 0,
            status: TokenStatus::AtHome,
            in_safe_zone: false,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Seat that owns this token.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.color.seat()
    }

    #[must_use]
    pub fn position(&self) -> Square {
        self.position
    }

    #[must_use]
    pub fn status(&self) -> TokenStatus {
        self.status
    }

    #[must_use]
    pub fn in_safe_zone(&self) -> bool {
        self.in_safe_zone
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.status == TokenStatus::AtHome
    }

    #[must_use]
    pub fn is_on_track(&self) -> bool {
        self.status == TokenStatus::OnTrack
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == TokenStatus::Finished
    }

    /// Send the token back home.
    pub(crate) fn capture(&mut self) {
        self.position = 0;
        self.status = TokenStatus::AtHome;
        self.in_safe_zone = false;
    }

    /// Put the token on `square` and refresh its safe-zone flag.
    pub(crate) fn place(&mut self, square: Square, safe: bool) {
        self.position = square;
        self.status = TokenStatus::OnTrack;
        self.in_safe_zone = safe;
    }

    /// Park the token past the finish line.
    pub(crate) fn finish(&mut self, track_length: u16) {
        self.position = track_length;
        self.status = TokenStatus::Finished;
        self.in_safe_zone = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_home() {
        let token = Token::new(Color::Green);

        assert!(token.is_home());
        assert_eq!(token.position(), 0);
        assert!(!token.in_safe_zone());
        assert_eq!(token.owner(), PlayerId::new(1));
    }

    #[test]
    fn test_capture_resets_everything() {
        let mut token = Token::new(Color::Red);
        token.place(12, true);
        assert!(token.is_on_track());

        token.capture();

        assert_eq!(token, Token::new(Color::Red));
    }

    #[test]
    fn test_finish_parks_at_track_length() {
        let mut token = Token::new(Color::Blue);
        token.place(38, false);
        token.finish(40);

        assert!(token.is_finished());
        assert_eq!(token.position(), 40);
    }
}
