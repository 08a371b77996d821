//! The match reducer: `(state, action, rng) -> next state`.
//!
//! The input state is never mutated. Every action is applied to a clone and
//! the clone is returned; actions that are not legal in the current phase
//! come back as an unchanged copy. Only broken references (a player id that
//! is not seated) surface as `Err`.

use smallvec::SmallVec;

use crate::ai::{AiPolicy, ProfilePolicy};
use crate::core::{
    Action, AttackDeclaration, AttackPlan, Declaration, DefenseDeclaration, DefensePlan, LogEvent,
    MatchState, Phase, PlayerId, RandomSource, Result, PLAYER_COUNT,
};

use super::resolve::{resolve_challenge, transition_after_challenge};
use super::turn::{advance_turn_or_round, begin_turn, pick_next_attacker};

/// Applies actions to match states, consulting `P` for non-human seats.
///
/// ## Example
///
/// ```
/// use verita_falso::core::{Action, Phase};
/// use verita_falso::rules::Reducer;
/// use verita_falso::setup::MatchBuilder;
///
/// let (state, mut rng) = MatchBuilder::new().seed(7).build();
/// let reducer = Reducer::new();
///
/// let started = reducer.reduce(&state, &Action::StartGame, &mut rng).unwrap();
/// assert_eq!(state.phase, Phase::Setup);
/// assert_eq!(started.phase, Phase::AttackDeclare);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Reducer<P = ProfilePolicy> {
    policy: P,
}

impl Reducer<ProfilePolicy> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: AiPolicy> Reducer<P> {
    /// Reducer that asks `policy` for every non-human decision.
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Apply `action` to a copy of `state`.
    pub fn reduce<R: RandomSource>(
        &self,
        state: &MatchState,
        action: &Action,
        rng: &mut R,
    ) -> Result<MatchState> {
        if state.is_over() {
            return Ok(state.clone());
        }

        let mut next = state.clone();
        let applied = match *action {
            Action::SetDifficulty(difficulty) => {
                next.difficulty = difficulty;
                next.push_log(LogEvent::Difficulty(difficulty));
                true
            }
            Action::StartGame => self.start_game(&mut next)?,
            Action::HumanAttackDeclare(plan) => self.human_attack(&mut next, plan)?,
            Action::HumanDefenseDeclare(plan) => self.human_defense(&mut next, plan)?,
            Action::HumanChallenge => self.human_challenge(&mut next)?,
            Action::ChallengePass => self.challenge_pass(&mut next)?,
            Action::AiStep => self.ai_step(&mut next, rng)?,
        };

        if !applied {
            tracing::debug!(?action, phase = ?state.phase, "action ignored");
            return Ok(state.clone());
        }
        if next.phase != state.phase {
            tracing::debug!(?action, from = ?state.phase, to = ?next.phase, "phase change");
        }
        Ok(next)
    }

    // === Human actions ===

    fn start_game(&self, state: &mut MatchState) -> Result<bool> {
        if state.phase != Phase::Setup {
            return Ok(false);
        }

        let team = state.acting_team;
        match pick_next_attacker(state, team)? {
            Some(first) => {
                state.push_log(LogEvent::GameStarted);
                begin_turn(state, team, first)?;
            }
            None => {
                let winner = team.other();
                state.push_log(LogEvent::NoAttackers { winner });
                state.finish(winner);
            }
        }
        Ok(true)
    }

    fn human_attack(&self, state: &mut MatchState, plan: AttackPlan) -> Result<bool> {
        if state.phase != Phase::AttackDeclare {
            return Ok(false);
        }
        let Some(attacker) = state.current_attacker else {
            return Ok(false);
        };
        let me = state.player(attacker)?;
        if !me.is_human || !me.alive {
            return Ok(false);
        }
        if let AttackPlan::Declare { target, .. } = plan {
            if !is_valid_target(state, attacker, target)? {
                return Ok(false);
            }
        }

        apply_attack_plan(state, attacker, plan)?;
        Ok(true)
    }

    fn human_defense(&self, state: &mut MatchState, plan: DefensePlan) -> Result<bool> {
        if state.phase != Phase::DefenseDeclare {
            return Ok(false);
        }
        let Some(defender) = state.current_target else {
            return Ok(false);
        };
        let me = state.player(defender)?;
        if !me.is_human || !me.alive {
            return Ok(false);
        }

        apply_defense_plan(state, defender, plan)?;
        Ok(true)
    }

    fn human_challenge(&self, state: &mut MatchState) -> Result<bool> {
        if !state.human_may_challenge()? {
            return Ok(false);
        }
        let Some(human) = state.human().map(|p| p.id) else {
            return Ok(false);
        };

        resolve_challenge(state, human)?;
        transition_after_challenge(state)?;
        Ok(true)
    }

    fn challenge_pass(&self, state: &mut MatchState) -> Result<bool> {
        if !state.phase.is_challenge_window() || state.last_declaration.is_none() {
            return Ok(false);
        }

        state.push_log(LogEvent::NoChallenge);
        transition_after_challenge(state)?;
        Ok(true)
    }

    // === AI step ===

    fn ai_step<R: RandomSource>(&self, state: &mut MatchState, rng: &mut R) -> Result<bool> {
        match state.phase {
            Phase::AttackDeclare => self.ai_attack(state, rng),
            Phase::DefenseDeclare => self.ai_defense(state, rng),
            Phase::ChallengeAttack | Phase::ChallengeDefense => self.ai_challenge_scan(state, rng),
            Phase::Resolve => {
                advance_turn_or_round(state)?;
                Ok(true)
            }
            Phase::Setup | Phase::GameOver => Ok(false),
        }
    }

    fn ai_attack<R: RandomSource>(&self, state: &mut MatchState, rng: &mut R) -> Result<bool> {
        let Some(attacker) = state.current_attacker else {
            return Ok(false);
        };
        let me = state.player(attacker)?;
        if me.is_human || !me.alive {
            return Ok(false);
        }

        let mut plan = self.policy.choose_attack(state, attacker, rng)?;
        if let AttackPlan::Declare { target, .. } = plan {
            if !is_valid_target(state, attacker, target)? {
                tracing::warn!(%attacker, %target, "policy chose an illegal target, passing");
                plan = AttackPlan::Pass;
            }
        }

        apply_attack_plan(state, attacker, plan)?;
        Ok(true)
    }

    fn ai_defense<R: RandomSource>(&self, state: &mut MatchState, rng: &mut R) -> Result<bool> {
        let Some(defender) = state.current_target else {
            return Ok(false);
        };
        let me = state.player(defender)?;
        if me.is_human || !me.alive {
            return Ok(false);
        }

        let plan = self.policy.choose_defense(state, defender, rng)?;
        apply_defense_plan(state, defender, plan)?;
        Ok(true)
    }

    /// Offer the live declaration to each eligible AI seat in roster order.
    /// The first to accept challenges; if none does, the window closes.
    fn ai_challenge_scan<R: RandomSource>(
        &self,
        state: &mut MatchState,
        rng: &mut R,
    ) -> Result<bool> {
        let Some(declaration) = state.last_declaration else {
            return Ok(false);
        };
        // A living human who may challenge decides first.
        if state.human_may_challenge()? {
            return Ok(false);
        }

        let mut candidates: SmallVec<[PlayerId; PLAYER_COUNT]> = SmallVec::new();
        for p in state.players.iter().filter(|p| !p.is_human) {
            if state.may_challenge(p.id, &declaration)? {
                candidates.push(p.id);
            }
        }

        for challenger in candidates {
            if self.policy.should_challenge(state, challenger, &declaration, rng)? {
                resolve_challenge(state, challenger)?;
                transition_after_challenge(state)?;
                return Ok(true);
            }
        }

        state.push_log(LogEvent::NoChallenge);
        transition_after_challenge(state)?;
        Ok(true)
    }
}

/// A declared target must be a living enemy of the attacker.
fn is_valid_target(state: &MatchState, attacker: PlayerId, target: PlayerId) -> Result<bool> {
    let team = state.player(attacker)?.team;
    let target = state.player(target)?;
    Ok(target.alive && target.team != team)
}

/// Mark the attacker spent for the round and record its plan.
fn apply_attack_plan(state: &mut MatchState, attacker: PlayerId, plan: AttackPlan) -> Result<()> {
    let team = state.player(attacker)?.team;
    state.attacked_this_round[team].insert(attacker);
    let attacker_name = state.name(attacker)?;

    match plan {
        AttackPlan::Pass => {
            state.push_log(LogEvent::Passed { name: attacker_name });
            state.phase = Phase::Resolve;
        }
        AttackPlan::Declare { target, hand, declared } => {
            let target_name = state.name(target)?;
            state.current_target = Some(target);
            state.last_declaration = Some(Declaration::Attack(AttackDeclaration {
                actor: attacker,
                target,
                hand,
                declared,
            }));
            state.push_log(LogEvent::AttackDeclared {
                attacker: attacker_name,
                target: target_name,
                hand,
                declared,
            });
            state.phase = Phase::ChallengeAttack;
        }
    }
    Ok(())
}

fn apply_defense_plan(state: &mut MatchState, defender: PlayerId, plan: DefensePlan) -> Result<()> {
    let DefensePlan { hand, declared } = plan;
    let defender_name = state.name(defender)?;
    state.last_declaration =
        Some(Declaration::Defense(DefenseDeclaration { actor: defender, hand, declared }));
    state.push_log(LogEvent::DefenseDeclared { defender: defender_name, hand, declared });
    state.phase = Phase::ChallengeDefense;
    Ok(())
}

/// Apply `action` with the default profile-driven AI.
pub fn reduce<R: RandomSource>(
    state: &MatchState,
    action: &Action,
    rng: &mut R,
) -> Result<MatchState> {
    Reducer::new().reduce(state, action, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttackItem, DefenseItem, Difficulty, Hand, ScriptedRandom, Team, HUMAN_SEAT};
    use crate::setup::MatchBuilder;

    /// Started match where the human opens the attack.
    fn human_to_attack() -> MatchState {
        let (mut state, _) = MatchBuilder::new().seed(4).build();
        state.round_start_team = Team::Verita;
        state.acting_team = Team::Verita;
        state.attack_order.verita = (0..5).map(PlayerId::new).collect();
        reduce(&state, &Action::StartGame, &mut ScriptedRandom::constant(0.5)).unwrap()
    }

    #[test]
    fn test_start_game_picks_first_attacker() {
        let state = human_to_attack();

        assert_eq!(state.phase, Phase::AttackDeclare);
        assert_eq!(state.current_attacker, Some(HUMAN_SEAT));
        assert_eq!(state.cursor.verita, 1);
        assert_eq!(state.log.lines()[5], "-- Game start");
    }

    #[test]
    fn test_start_game_without_attackers_skips_start_line() {
        let (mut state, _) = MatchBuilder::new().seed(4).build();
        state.acting_team = Team::Falso;
        for id in 5..10 {
            state.player_mut(PlayerId::new(id)).unwrap().alive = false;
        }

        let next = reduce(&state, &Action::StartGame, &mut ScriptedRandom::constant(0.5)).unwrap();

        assert_eq!(next.phase, Phase::GameOver);
        assert_eq!(next.winner, Some(Team::Verita));
        assert!(!next.log.iter().any(|e| *e == LogEvent::GameStarted));
        assert_eq!(next.log.last(), Some(&LogEvent::NoAttackers { winner: Team::Verita }));
    }

    #[test]
    fn test_start_game_twice_is_ignored() {
        let state = human_to_attack();
        let again = reduce(&state, &Action::StartGame, &mut ScriptedRandom::constant(0.5)).unwrap();
        assert_eq!(again, state);
    }

    #[test]
    fn test_human_pass_goes_to_resolve() {
        let state = human_to_attack();
        let action = Action::HumanAttackDeclare(AttackPlan::Pass);
        let next = reduce(&state, &action, &mut ScriptedRandom::constant(0.5)).unwrap();

        assert_eq!(next.phase, Phase::Resolve);
        assert!(next.attacked_this_round.verita.contains(&HUMAN_SEAT));
        assert!(next.last_declaration.is_none());
    }

    #[test]
    fn test_human_attack_rejects_ally_and_unknown() {
        let state = human_to_attack();
        let mut rng = ScriptedRandom::constant(0.5);

        let ally = Action::HumanAttackDeclare(AttackPlan::Declare {
            target: PlayerId::new(2),
            hand: Hand::Left,
            declared: AttackItem::Sword,
        });
        assert_eq!(reduce(&state, &ally, &mut rng).unwrap(), state);

        let ghost = Action::HumanAttackDeclare(AttackPlan::Declare {
            target: PlayerId::new(42),
            hand: Hand::Left,
            declared: AttackItem::Sword,
        });
        assert!(reduce(&state, &ghost, &mut rng).is_err());
    }

    #[test]
    fn test_ai_step_waits_on_human_prompts() {
        let state = human_to_attack();
        let next = reduce(&state, &Action::AiStep, &mut ScriptedRandom::constant(0.5)).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_defense_out_of_phase_is_ignored() {
        let state = human_to_attack();
        let plan = DefensePlan { hand: Hand::Left, declared: DefenseItem::Shield };
        let action = Action::HumanDefenseDeclare(plan);
        let next = reduce(&state, &action, &mut ScriptedRandom::constant(0.5)).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_set_difficulty_logs() {
        let state = human_to_attack();
        let action = Action::SetDifficulty(Difficulty::Hard);
        let next = reduce(&state, &action, &mut ScriptedRandom::constant(0.5)).unwrap();

        assert_eq!(next.difficulty, Difficulty::Hard);
        assert_eq!(next.phase, state.phase);
        assert_eq!(next.log.lines().last().map(String::as_str), Some("Difficulty: HARD"));
    }
}
