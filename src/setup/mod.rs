//! Match setup: dealing, leaders, attack orders, AI profiles.
//!
//! Each team gets its own ten-card deck (4 swords, 1 twin, 3 shields, 2 bare
//! hands), shuffled and dealt two per player with the hand order randomized.
//! Seat `p0` is the human; every other seat gets a tiered AI profile. One
//! hidden leader per team, an independent random attack order per team, and
//! a random opening team.

mod builder;

pub use builder::{create_initial_state, create_initial_state_with, MatchBuilder, TEAM_DECK};
