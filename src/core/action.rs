//! The closed set of inputs the reducer accepts.
//!
//! Human turns carry a plan; AI turns are driven by `Action::AiStep`, which
//! asks the policy for the same plan types.

use serde::{Deserialize, Serialize};

use super::item::{AttackItem, DefenseItem, Hand};
use super::player::PlayerId;
use super::state::Difficulty;

/// What the current attacker does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPlan {
    /// Give up the attack. No declaration, no target.
    Pass,
    /// Claim `declared` in `hand` against `target`.
    Declare {
        target: PlayerId,
        hand: Hand,
        declared: AttackItem,
    },
}

/// What the defender claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensePlan {
    pub hand: Hand,
    pub declared: DefenseItem,
}

/// A reducer input.
///
/// ## Example
///
/// ```
/// use verita_falso::core::{Action, AttackPlan, AttackItem, Hand, PlayerId};
///
/// let strike = Action::HumanAttackDeclare(AttackPlan::Declare {
///     target: PlayerId::new(6),
///     hand: Hand::Left,
///     declared: AttackItem::Sword,
/// });
/// assert_ne!(strike, Action::HumanAttackDeclare(AttackPlan::Pass));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Change the AI difficulty. Accepted in every phase before game over.
    SetDifficulty(Difficulty),
    /// Leave SETUP and pick the first attacker.
    StartGame,
    /// The human seat's attack, when it is the current attacker.
    HumanAttackDeclare(AttackPlan),
    /// The human seat's defense, when it is the current target.
    HumanDefenseDeclare(DefensePlan),
    /// The human seat doubts the live declaration.
    HumanChallenge,
    /// Close the challenge window without a reveal.
    ChallengePass,
    /// Drive exactly one non-human decision (or turn advancement in RESOLVE).
    AiStep,
}
