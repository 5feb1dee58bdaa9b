//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index in turn-creation order. The first seat is `PlayerId(0)`.
//!
//! ## Color
//!
//! Stable identity of a seat's token. Colors are assigned from
//! [`Color::ALL`] in seat order when the match is created, so the color
//! never depends on where a token happens to live in memory.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Player (seat) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` seats.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The color seated at this index.
    #[must_use]
    pub const fn color(self) -> Color {
        Color::ALL[self.0 as usize % MAX_PLAYERS]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Token color. The order of [`Color::ALL`] is the seating order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// Every color, in seating order.
    pub const ALL: [Color; MAX_PLAYERS] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Seat that owns this color.
    #[must_use]
    pub const fn seat(self) -> PlayerId {
        match self {
            Color::Red => PlayerId(0),
            Color::Green => PlayerId(1),
            Color::Yellow => PlayerId(2),
            Color::Blue => PlayerId(3),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{PlayerId, PlayerMap};
///
/// let mut rolls: PlayerMap<Vec<u8>> = PlayerMap::with_default(2);
/// rolls[PlayerId::new(1)].push(6);
/// assert_eq!(rolls[PlayerId::new(1)], vec![6]);
/// assert!(rolls[PlayerId::new(0)].is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 4 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Borrow the backing slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_color_seat_round_trip() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.seat(), PlayerId::new(i as u8));
            assert_eq!(PlayerId::new(i as u8).color(), *color);
        }
        assert_eq!(Color::Yellow.to_string(), "yellow");
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_get_out_of_range() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |_| 7);

        assert_eq!(map.get(PlayerId::new(1)), Some(&7));
        assert_eq!(map.get(PlayerId::new(2)), None);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_default(2);

        map[PlayerId::new(0)] = 10;
        if let Some(v) = map.get_mut(PlayerId::new(1)) {
            *v = 20;
        }

        assert_eq!(map.as_slice(), &[10, 20]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &2));
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_default(0);
    }
}
