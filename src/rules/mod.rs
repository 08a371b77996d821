//! Game rules as a pure reducer.
//!
//! `Reducer::reduce` takes a state, an action, and a random source and
//! returns the next state. The phase machine it drives:
//!
//! ```text
//! SETUP -> ATTACK_DECLARE -> CHALLENGE_ATTACK -> DEFENSE_DECLARE
//!              |                  |                    |
//!              | pass             | fizzle / attacker  v
//!              v                  v   died       CHALLENGE_DEFENSE
//!           RESOLVE <-------------+--------------------+
//!              |
//!              +-> next attacker (other team, same team, or new round)
//! ```
//!
//! Any leader death jumps straight to GAME_OVER.

pub mod autopilot;
pub mod reducer;
pub mod resolve;
pub mod turn;

pub use autopilot::{autopilot_action, play_out};
pub use reducer::{reduce, Reducer};
pub use resolve::{apply_defense_and_resolve, kill, resolve_challenge, transition_after_challenge};
pub use turn::{advance_turn_or_round, pick_next_attacker, start_new_round};
