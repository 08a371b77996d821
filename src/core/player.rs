//! Player identification, teams, and per-player / per-team storage.
//!
//! ## PlayerId
//!
//! Seat identifier. The roster is fixed at setup, so a `PlayerId` is also the
//! player's index in `MatchState::players`.
//!
//! ## PlayerMap / TeamMap
//!
//! Dense storage indexed by `PlayerId` or `Team` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 0-based. Displayed as `p0`, `p1`, ...
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

    /// Iterate over all seats for a roster of `player_count` players.
    ///
    /// ```
    /// use verita_falso::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// The two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Verita,
    Falso,
}

impl Team {
    /// Both teams, VERITA first.
    pub const ALL: [Team; 2] = [Team::Verita, Team::Falso];

    /// The opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Team::Verita => Team::Falso,
            Team::Falso => Team::Verita,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Verita => f.write_str("VERITA"),
            Team::Falso => f.write_str("FALSO"),
        }
    }
}

/// One value per team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMap<T> {
    pub verita: T,
    pub falso: T,
}

impl<T> TeamMap<T> {
    /// Build both entries from a factory.
    pub fn new(mut factory: impl FnMut(Team) -> T) -> Self {
        Self {
            verita: factory(Team::Verita),
            falso: factory(Team::Falso),
        }
    }

    /// Iterate over (Team, &T) pairs, VERITA first.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Verita, &self.verita), (Team::Falso, &self.falso)].into_iter()
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::Verita => &self.verita,
            Team::Falso => &self.falso,
        }
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::Verita => &mut self.verita,
            Team::Falso => &mut self.falso,
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ```
/// use verita_falso::core::{PlayerId, PlayerMap};
///
/// let mut marks: PlayerMap<u8> = PlayerMap::with_value(4, 3);
/// marks[PlayerId::new(1)] = 1;
/// assert_eq!(marks[PlayerId::new(0)], 3);
/// assert_eq!(marks[PlayerId::new(1)], 1);
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

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Number of seats covered.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's entry, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable seat entry, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
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
