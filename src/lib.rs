//! # verita-falso
//!
//! A turn-based bluffing duel engine: two teams of five, VERITA and FALSO,
//! each holding two hidden items per player and one hidden leader.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `(state, action, rng) -> next state`. The input is
//!    never mutated, so callers may keep every snapshot.
//!
//! 2. **Injected Randomness**: setup and every AI decision draw from a
//!    `RandomSource`. A seeded `GameRng` reproduces whole matches and a
//!    `ScriptedRandom` pins individual rolls in tests.
//!
//! 3. **Hidden Information Stays Inside**: leaders and real hand contents
//!    live in `MatchState`; hosts render `MatchState::view_for`.
//!
//! ## Architecture
//!
//! - **Declarations Are Claims**: attacks claim SWORD or TWIN, defenses claim
//!   SHIELD or BARE. Opponents may challenge; a reveal kills whoever was wrong.
//!
//! - **Leader Death Ends The Match**: the first leader to fall decides the
//!   winner, whatever the phase.
//!
//! - **Persistent Data Structures**: `im::Vector` roster and log keep the
//!   per-action clone cheap.
//!
//! ## Modules
//!
//! - `core`: ids, items, declarations, state, actions, RNG, config, log, views
//! - `setup`: dealing a fresh match
//! - `ai`: profile-driven decisions and the `AiPolicy` seam
//! - `rules`: the reducer, turn order, and resolution

pub mod ai;
pub mod core;
pub mod rules;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    Action, AttackPlan, Awaiting, DefensePlan, Difficulty, GameRng, Hand, Item, MatchConfig,
    MatchError, MatchState, MatchView, Phase, PlayerId, Prompt, RandomSource, Result,
    ScriptedRandom, Team,
};

pub use crate::setup::{create_initial_state, create_initial_state_with, MatchBuilder};

pub use crate::ai::{AiPolicy, ProfilePolicy};

pub use crate::rules::{play_out, reduce, Reducer};
