//! Profile-driven decision functions.
//!
//! Each function reads the state, the deciding seat's `AiProfile`, and the
//! difficulty, draws from the supplied `RandomSource`, and returns a
//! decision. None of them mutate the state.
//!
//! Attack and defense claims are drawn without looking at the seat's real
//! hand, so any claim may turn out false when challenged.

use crate::core::{
    AiProfile, AttackItem, AttackPlan, Declaration, DefenseItem, DefensePlan, Difficulty, Hand,
    MatchState, PlayerId, RandomSource, Result,
};

/// Per-difficulty multipliers applied to a profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyScale {
    pub aggression: f64,
    pub bluff: f64,
    pub challenge: f64,
    pub caution: f64,
}

impl DifficultyScale {
    /// EASY attacks, bluffs, and challenges less and is more cautious.
    /// HARD does the opposite.
    #[must_use]
    pub const fn of(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                aggression: 0.85,
                bluff: 0.70,
                challenge: 0.55,
                caution: 1.10,
            },
            Difficulty::Normal => Self {
                aggression: 1.00,
                bluff: 1.00,
                challenge: 1.00,
                caution: 1.00,
            },
            Difficulty::Hard => Self {
                aggression: 1.10,
                bluff: 1.05,
                challenge: 1.35,
                caution: 0.90,
            },
        }
    }
}

/// Probability that an unbluffed attack claim is TWIN.
#[must_use]
pub const fn twin_bias(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.20,
        Difficulty::Normal => 0.30,
        Difficulty::Hard => 0.35,
    }
}

/// Base probability of claiming SHIELD on defense, before the caution bonus.
#[must_use]
pub const fn shield_preference(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.68,
        Difficulty::Normal => 0.78,
        Difficulty::Hard => 0.88,
    }
}

/// Fraction of the bluff rate that applies to defense claims.
#[must_use]
pub const fn defense_bluff_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.22,
        Difficulty::Normal => 0.32,
        Difficulty::Hard => 0.40,
    }
}

/// Hard upper bound on any challenge probability.
#[must_use]
pub const fn challenge_ceiling(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.10,
        Difficulty::Normal => 0.13,
        Difficulty::Hard => 0.18,
    }
}

/// Extra challenge probability against a bold claim (TWIN / SHIELD).
#[must_use]
pub fn bold_claim_bonus(declaration: &Declaration, difficulty: Difficulty) -> f64 {
    let hard = difficulty == Difficulty::Hard;
    match declaration {
        Declaration::Attack(_) if declaration.is_bold() => if hard { 0.020 } else { 0.012 },
        Declaration::Defense(_) if declaration.is_bold() => if hard { 0.012 } else { 0.008 },
        _ => 0.0,
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn random_hand<R: RandomSource>(rng: &mut R) -> Hand {
    if rng.chance(0.5) { Hand::Left } else { Hand::Right }
}

/// Probability that `profile` gives up its attack.
#[must_use]
pub fn pass_chance(profile: &AiProfile, difficulty: Difficulty) -> f64 {
    let k = DifficultyScale::of(difficulty);
    let aggression = clamp01(profile.aggression * k.aggression);
    let caution = clamp01(profile.caution * k.caution);
    0.30 * (1.0 - aggression) * (0.7 + 0.6 * caution)
}

/// Attack choice for `attacker`: pass, or a target, hand, and claim.
///
/// With no living enemy the attacker always passes.
pub fn choose_attack<R: RandomSource>(
    state: &MatchState,
    attacker: PlayerId,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<AttackPlan> {
    let me = state.player(attacker)?;
    let enemies = state.alive_ids(me.team.other());
    if enemies.is_empty() {
        return Ok(AttackPlan::Pass);
    }

    let k = DifficultyScale::of(difficulty);
    let bluff_rate = clamp01(me.ai.bluff_rate * k.bluff);

    if rng.chance(pass_chance(&me.ai, difficulty)) {
        return Ok(AttackPlan::Pass);
    }

    let target = enemies[rng.below(enemies.len())];
    let hand = random_hand(rng);
    let declared = if rng.chance(1.0 - twin_bias(difficulty)) {
        AttackItem::Sword
    } else {
        AttackItem::Twin
    };
    let declared = if rng.chance(bluff_rate) { declared.flipped() } else { declared };

    Ok(AttackPlan::Declare { target, hand, declared })
}

/// Defense choice for `defender`: SHIELD or BARE in a random hand.
pub fn choose_defense<R: RandomSource>(
    state: &MatchState,
    defender: PlayerId,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<DefensePlan> {
    let me = state.player(defender)?;
    let k = DifficultyScale::of(difficulty);

    let bluff_rate = clamp01(me.ai.bluff_rate * k.bluff);
    let caution = clamp01(me.ai.caution * k.caution);
    let prefer_shield = clamp01(shield_preference(difficulty) + 0.10 * caution);

    let declared = if rng.chance(prefer_shield) { DefenseItem::Shield } else { DefenseItem::Bare };
    let bluff = rng.chance(bluff_rate * defense_bluff_multiplier(difficulty));
    let declared = if bluff { declared.flipped() } else { declared };

    Ok(DefensePlan { hand: random_hand(rng), declared })
}

/// Probability that `challenger` challenges `declaration`. Zero when dead.
pub fn challenge_rate(
    state: &MatchState,
    challenger: PlayerId,
    declaration: &Declaration,
    difficulty: Difficulty,
) -> Result<f64> {
    let me = state.player(challenger)?;
    let actor = state.player(declaration.actor())?;
    if !me.alive {
        return Ok(0.0);
    }

    let k = DifficultyScale::of(difficulty);
    let caution = clamp01(me.ai.caution * k.caution);

    let mut rate = clamp01(me.ai.challenge_rate * k.challenge);
    rate *= 1.0 - 0.65 * caution;
    if me.is_leader {
        rate *= 0.25;
    }
    rate += bold_claim_bonus(declaration, difficulty);
    if actor.team == me.team {
        rate *= 0.55;
    }

    Ok(rate.min(challenge_ceiling(difficulty)))
}

/// Whether `challenger` challenges `declaration` this time.
pub fn should_challenge<R: RandomSource>(
    state: &MatchState,
    challenger: PlayerId,
    declaration: &Declaration,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<bool> {
    let rate = challenge_rate(state, challenger, declaration, difficulty)?;
    if rate <= 0.0 {
        return Ok(false);
    }
    Ok(rng.chance(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttackDeclaration, DefenseDeclaration, ScriptedRandom, Team};
    use crate::setup::MatchBuilder;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn fresh() -> MatchState {
        MatchBuilder::new().seed(11).build().0
    }

    fn sword_at(actor: PlayerId, target: PlayerId) -> Declaration {
        Declaration::Attack(AttackDeclaration {
            actor,
            target,
            hand: Hand::Left,
            declared: AttackItem::Sword,
        })
    }

    #[test]
    fn test_pass_chance_table() {
        let profile =
            AiProfile { aggression: 0.5, bluff_rate: 0.0, challenge_rate: 0.0, caution: 0.5 };
        assert!(approx(pass_chance(&profile, Difficulty::Normal), 0.30 * 0.5 * 1.0));

        // EASY: aggression 0.425, caution 0.55.
        let easy = 0.30 * (1.0 - 0.425) * (0.7 + 0.6 * 0.55);
        assert!(approx(pass_chance(&profile, Difficulty::Easy), easy));
        let (hard, normal) = (Difficulty::Hard, Difficulty::Normal);
        assert!(pass_chance(&profile, hard) < pass_chance(&profile, normal));
    }

    #[test]
    fn test_attack_pass_when_roll_low() {
        let state = fresh();
        let mut rng = ScriptedRandom::constant(0.0);
        let plan = choose_attack(&state, PlayerId::new(1), Difficulty::Normal, &mut rng).unwrap();
        assert_eq!(plan, AttackPlan::Pass);
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn test_attack_declares_against_living_enemy() {
        let state = fresh();
        // pass roll fails, target index 0, left hand, sword, no bluff.
        let mut rng = ScriptedRandom::new(vec![0.99, 0.0, 0.1, 0.1, 0.99]);
        let plan = choose_attack(&state, PlayerId::new(1), Difficulty::Normal, &mut rng).unwrap();

        assert_eq!(
            plan,
            AttackPlan::Declare {
                target: PlayerId::new(5),
                hand: Hand::Left,
                declared: AttackItem::Sword,
            }
        );
    }

    #[test]
    fn test_attack_bluff_flips_claim() {
        let state = fresh();
        // Same rolls as above but the bluff roll succeeds.
        let mut rng = ScriptedRandom::new(vec![0.99, 0.0, 0.9, 0.1, 0.0]);
        let plan = choose_attack(&state, PlayerId::new(1), Difficulty::Normal, &mut rng).unwrap();

        assert_eq!(
            plan,
            AttackPlan::Declare {
                target: PlayerId::new(5),
                hand: Hand::Right,
                declared: AttackItem::Twin,
            }
        );
    }

    #[test]
    fn test_attack_without_enemies_passes() {
        let mut state = fresh();
        for id in 5..10 {
            state.player_mut(PlayerId::new(id)).unwrap().alive = false;
        }
        let mut rng = ScriptedRandom::constant(0.99);
        let plan = choose_attack(&state, PlayerId::new(1), Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(plan, AttackPlan::Pass);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_defense_prefers_shield() {
        let state = fresh();
        let mut rng = ScriptedRandom::new(vec![0.5, 0.99, 0.7]);
        let plan = choose_defense(&state, PlayerId::new(6), Difficulty::Normal, &mut rng).unwrap();
        assert_eq!(plan, DefensePlan { hand: Hand::Right, declared: DefenseItem::Shield });
    }

    #[test]
    fn test_defense_bluff_flips_claim() {
        let state = fresh();
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.1]);
        let plan = choose_defense(&state, PlayerId::new(6), Difficulty::Normal, &mut rng).unwrap();
        assert_eq!(plan, DefensePlan { hand: Hand::Left, declared: DefenseItem::Bare });
    }

    #[test]
    fn test_challenge_rate_respects_ceiling() {
        let mut state = fresh();
        let challenger = PlayerId::new(6);
        {
            let p = state.player_mut(challenger).unwrap();
            p.ai =
                AiProfile { aggression: 1.0, bluff_rate: 0.0, challenge_rate: 1.0, caution: 0.0 };
            p.is_leader = false;
        }
        let decl = sword_at(PlayerId::new(1), challenger);

        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let rate = challenge_rate(&state, challenger, &decl, d).unwrap();
            assert!(approx(rate, challenge_ceiling(d)), "{d}: {rate}");
        }
    }

    #[test]
    fn test_challenge_rate_modifiers() {
        let mut state = fresh();
        let me = PlayerId::new(7);
        {
            let p = state.player_mut(me).unwrap();
            p.ai =
                AiProfile { aggression: 0.5, bluff_rate: 0.0, challenge_rate: 0.1, caution: 0.4 };
            p.is_leader = false;
        }
        let base = 0.1 * (1.0 - 0.65 * 0.4);

        let enemy_sword = sword_at(PlayerId::new(2), me);
        let normal = Difficulty::Normal;
        assert!(approx(challenge_rate(&state, me, &enemy_sword, normal).unwrap(), base));

        let enemy_twin = Declaration::Attack(AttackDeclaration {
            actor: PlayerId::new(2),
            target: me,
            hand: Hand::Right,
            declared: AttackItem::Twin,
        });
        assert!(approx(challenge_rate(&state, me, &enemy_twin, normal).unwrap(), base + 0.012));

        let ally_shield = Declaration::Defense(DefenseDeclaration {
            actor: PlayerId::new(8),
            hand: Hand::Left,
            declared: DefenseItem::Shield,
        });
        assert!(approx(
            challenge_rate(&state, me, &ally_shield, normal).unwrap(),
            (base + 0.008) * 0.55
        ));

        state.player_mut(me).unwrap().is_leader = true;
        assert!(approx(challenge_rate(&state, me, &enemy_sword, normal).unwrap(), base * 0.25));
    }

    #[test]
    fn test_dead_seat_never_challenges() {
        let mut state = fresh();
        let me = PlayerId::new(9);
        state.player_mut(me).unwrap().alive = false;
        let decl = sword_at(PlayerId::new(1), PlayerId::new(5));

        let mut rng = ScriptedRandom::constant(0.0);
        assert!(!should_challenge(&state, me, &decl, Difficulty::Hard, &mut rng).unwrap());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_unknown_seat_is_an_error() {
        let state = fresh();
        let mut rng = ScriptedRandom::constant(0.5);
        assert!(choose_defense(&state, PlayerId::new(42), Difficulty::Normal, &mut rng).is_err());
        assert_eq!(state.player(PlayerId::new(3)).unwrap().team, Team::Verita);
    }
}
