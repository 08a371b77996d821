//! Players and their AI temperament.

use serde::{Deserialize, Serialize};

use super::item::{Hand, Item};
use super::player::{PlayerId, Team};

/// Temperament of a non-human player, each value in `[0, 1]`.
///
/// Fixed at setup. Human seats carry an all-zero profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub aggression: f64,
    pub bluff_rate: f64,
    pub challenge_rate: f64,
    pub caution: f64,
}

impl AiProfile {
    /// Profile for seat `i`, spread across five tiers by `i mod 5`.
    ///
    /// Tier 0 is timid and bluffs a lot; tier 4 is aggressive, challenges
    /// more, and bluffs less.
    #[must_use]
    pub fn tiered(i: usize) -> Self {
        let base = (i % 5) as f64 / 4.0;
        Self {
            aggression: 0.35 + 0.35 * base,
            bluff_rate: 0.20 + 0.25 * (1.0 - base),
            challenge_rate: 0.10 + 0.12 * base,
            caution: 0.35 + 0.25 * (1.0 - base),
        }
    }
}

/// A seat in the match.
///
/// `is_leader` and the hand contents are authoritative and never shown to
/// other seats; use `MatchState::view_for` to build what a viewer may see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub is_human: bool,
    pub alive: bool,
    pub left: Item,
    pub right: Item,
    pub is_leader: bool,
    pub ai: AiProfile,
}

impl Player {
    /// What the given hand really holds.
    #[must_use]
    pub const fn item(&self, hand: Hand) -> Item {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }
}
