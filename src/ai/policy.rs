//! The AI seam the reducer calls through.
//!
//! `ProfilePolicy` is the real opponent. Tests (or alternative bots) supply
//! their own `AiPolicy` to force specific decisions through the same state
//! machine.

use crate::core::{AttackPlan, Declaration, DefensePlan, MatchState, PlayerId, RandomSource, Result};

use super::decisions;

/// Decisions for non-human seats.
///
/// Implementations read the state but never mutate it; the reducer applies
/// whatever they return.
pub trait AiPolicy {
    /// Attack plan for the current attacker.
    fn choose_attack<R: RandomSource>(
        &self,
        state: &MatchState,
        attacker: PlayerId,
        rng: &mut R,
    ) -> Result<AttackPlan>;

    /// Defense plan for the current target.
    fn choose_defense<R: RandomSource>(
        &self,
        state: &MatchState,
        defender: PlayerId,
        rng: &mut R,
    ) -> Result<DefensePlan>;

    /// Whether `challenger` challenges `declaration`.
    fn should_challenge<R: RandomSource>(
        &self,
        state: &MatchState,
        challenger: PlayerId,
        declaration: &Declaration,
        rng: &mut R,
    ) -> Result<bool>;
}

/// Profile- and difficulty-driven policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfilePolicy;

impl AiPolicy for ProfilePolicy {
    fn choose_attack<R: RandomSource>(
        &self,
        state: &MatchState,
        attacker: PlayerId,
        rng: &mut R,
    ) -> Result<AttackPlan> {
        let plan = decisions::choose_attack(state, attacker, state.difficulty, rng)?;
        tracing::trace!(%attacker, ?plan, "ai attack");
        Ok(plan)
    }

    fn choose_defense<R: RandomSource>(
        &self,
        state: &MatchState,
        defender: PlayerId,
        rng: &mut R,
    ) -> Result<DefensePlan> {
        let plan = decisions::choose_defense(state, defender, state.difficulty, rng)?;
        tracing::trace!(%defender, ?plan, "ai defense");
        Ok(plan)
    }

    fn should_challenge<R: RandomSource>(
        &self,
        state: &MatchState,
        challenger: PlayerId,
        declaration: &Declaration,
        rng: &mut R,
    ) -> Result<bool> {
        let challenge =
            decisions::should_challenge(state, challenger, declaration, state.difficulty, rng)?;
        tracing::trace!(%challenger, challenge, "ai challenge decision");
        Ok(challenge)
    }
}
