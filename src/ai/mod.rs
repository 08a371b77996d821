//! AI decision policies for non-human seats.
//!
//! ## Overview
//!
//! Three decisions drive every AI seat through the reducer:
//!
//! - **Attack**: pass, or pick a living enemy, a hand, and a claim
//!   (SWORD favored over TWIN, possibly flipped as a bluff)
//! - **Defense**: claim SHIELD or BARE (SHIELD favored, rarely flipped)
//! - **Challenge**: doubt a declaration with a small, capped probability
//!
//! All three scale the seat's `AiProfile` by difficulty and draw from an
//! injected `RandomSource`, so fixed sequences make them reproducible.
//!
//! ## Usage
//!
//! ```
//! use verita_falso::ai::{choose_attack, AiPolicy, ProfilePolicy};
//! use verita_falso::core::{PlayerId, ScriptedRandom};
//! use verita_falso::setup::MatchBuilder;
//!
//! let (state, mut rng) = MatchBuilder::new().seed(1).build();
//! let plan = ProfilePolicy.choose_attack(&state, PlayerId::new(3), &mut rng).unwrap();
//!
//! // The same decision from a scripted source: a roll of 0.0 always passes.
//! let mut scripted = ScriptedRandom::constant(0.0);
//! let pass = choose_attack(&state, PlayerId::new(3), state.difficulty, &mut scripted).unwrap();
//! # let _ = (plan, pass);
//! ```

pub mod decisions;
pub mod policy;

pub use decisions::{
    challenge_ceiling, challenge_rate, choose_attack, choose_defense, pass_chance, should_challenge,
    DifficultyScale,
};
pub use policy::{AiPolicy, ProfilePolicy};
