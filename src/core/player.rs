//! Player identification, roles and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are numbered clockwise from 0 and the
//! turn order follows them.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting up to 255 players.
///
/// Seat indices are 0-based: the first seat is `PlayerId(0)`.
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

    /// Iterate over all seats of a game with `player_count` players.
    ///
    /// ```
    /// use bang_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Secret role dealt at game start.
///
/// The sheriff's role is always public; in a three-player game every role
/// is public and the win condition becomes a kill triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Sheriff,
    Deputy,
    Outlaw,
    Renegade,
}

impl PlayerRole {
    /// Role pool for 4 to 8 players, taken in order and then shuffled.
    pub const STANDARD: [PlayerRole; 8] = [
        PlayerRole::Sheriff,
        PlayerRole::Outlaw,
        PlayerRole::Outlaw,
        PlayerRole::Renegade,
        PlayerRole::Deputy,
        PlayerRole::Outlaw,
        PlayerRole::Deputy,
        PlayerRole::Renegade,
    ];

    /// Role pool for three players.
    pub const THREE_PLAYERS: [PlayerRole; 3] =
        [PlayerRole::Deputy, PlayerRole::Outlaw, PlayerRole::Renegade];

    /// Roles dealt for a table of `player_count` seats, before shuffling.
    #[must_use]
    pub fn pool(player_count: usize) -> &'static [PlayerRole] {
        if player_count == 3 {
            &Self::THREE_PLAYERS
        } else {
            &Self::STANDARD[..player_count.min(Self::STANDARD.len())]
        }
    }

    /// Sheriff and deputies win together.
    #[must_use]
    pub const fn is_law(self) -> bool {
        matches!(self, PlayerRole::Sheriff | PlayerRole::Deputy)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use bang_engine::core::{PlayerId, PlayerMap};
///
/// let mut hp: PlayerMap<i32> = PlayerMap::new(4, |_| 4);
/// hp[PlayerId::new(1)] -= 1;
/// assert_eq!(hp[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

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

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", PlayerId::new(3)), "Player 3");
    }

    #[test]
    fn test_role_pool_sizes() {
        assert_eq!(PlayerRole::pool(3), &PlayerRole::THREE_PLAYERS);
        assert_eq!(PlayerRole::pool(4).len(), 4);
        assert_eq!(PlayerRole::pool(7).len(), 7);
        assert_eq!(PlayerRole::pool(4)[0], PlayerRole::Sheriff);
        assert!(PlayerRole::pool(5).contains(&PlayerRole::Deputy));
        assert!(!PlayerRole::pool(4).contains(&PlayerRole::Deputy));
    }

    #[test]
    fn test_is_law() {
        assert!(PlayerRole::Sheriff.is_law());
        assert!(PlayerRole::Deputy.is_law());
        assert!(!PlayerRole::Renegade.is_law());
        assert!(!PlayerRole::Outlaw.is_law());
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);
        map[PlayerId::new(2)] = 10;

        let pairs: Vec<_> = map.iter().map(|(p, v)| (p.0, *v)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 10)]);
        assert_eq!(map.player_count(), 3);
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
