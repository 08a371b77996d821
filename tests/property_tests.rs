//! Property tests over whole AI-driven matches.
//!
//! Each case deals a seeded match, drives it with the autopilot, and checks
//! the state after every single reducer call.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use verita_falso::core::{
    Action, Difficulty, GameRng, Hand, MatchState, Phase, PlayerId, Team, LOG_CAPACITY, SHIELD_MAX,
};
use verita_falso::rules::{autopilot_action, Reducer};
use verita_falso::setup::MatchBuilder;

const MAX_STEPS: usize = 100_000;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![Just(Difficulty::Easy), Just(Difficulty::Normal), Just(Difficulty::Hard)]
}

/// Every snapshot of a match, from setup to game over.
fn trace(seed: u64, difficulty: Difficulty) -> Vec<MatchState> {
    let reducer = Reducer::new();
    let (mut state, mut rng): (MatchState, GameRng) =
        MatchBuilder::new().seed(seed).difficulty(difficulty).build();
    let mut states = vec![state.clone()];

    for _ in 0..MAX_STEPS {
        let Some(action) = autopilot_action(reducer.policy(), &state, &mut rng).unwrap() else {
            break;
        };
        state = reducer.reduce(&state, &action, &mut rng).unwrap();
        states.push(state.clone());
    }
    states
}

fn check_snapshot(state: &MatchState) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.winner.is_some(), state.phase == Phase::GameOver);

    for team in Team::ALL {
        for id in state.attacked_this_round[team].iter() {
            prop_assert_eq!(state.player(*id).unwrap().team, team);
        }
    }

    for (_, pair) in state.shields.iter() {
        prop_assert!(pair.iter().all(|d| *d <= SHIELD_MAX));
    }

    if state.phase == Phase::AttackDeclare {
        let attacker = state.player(state.current_attacker.unwrap()).unwrap();
        prop_assert!(attacker.alive);
        prop_assert_eq!(attacker.team, state.acting_team);
    }
    if state.phase == Phase::DefenseDeclare {
        prop_assert!(state.player(state.current_target.unwrap()).unwrap().alive);
        prop_assert!(state.pending_attack.is_some());
    }

    prop_assert!(state.log.len() <= LOG_CAPACITY);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Matches always finish, and every snapshot on the way is consistent.
    #[test]
    fn prop_match_invariants(seed in any::<u64>(), difficulty in difficulty()) {
        let states = trace(seed, difficulty);
        let last = states.last().unwrap();
        prop_assert_eq!(last.phase, Phase::GameOver);

        for state in &states {
            check_snapshot(state)?;
        }
    }

    /// Shield durability never goes back up.
    #[test]
    fn prop_durability_never_increases(seed in any::<u64>()) {
        let states = trace(seed, Difficulty::Normal);
        for pair in states.windows(2) {
            for id in PlayerId::all(pair[0].players.len()) {
                for hand in Hand::BOTH {
                    prop_assert!(pair[1].shields.get(id, hand) <= pair[0].shields.get(id, hand));
                }
            }
        }
    }

    /// The attacked sets are empty right after a round starts, and nobody
    /// attacks twice in one round.
    #[test]
    fn prop_round_robin(seed in any::<u64>()) {
        let states = trace(seed, Difficulty::Hard);
        let mut turns: FxHashSet<(u32, PlayerId)> = FxHashSet::default();

        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.round != before.round {
                prop_assert_eq!(after.round, before.round + 1);
                prop_assert!(after.attacked_this_round.verita.is_empty());
                prop_assert!(after.attacked_this_round.falso.is_empty());
            }

            let new_turn = after.phase == Phase::AttackDeclare
                && (before.phase != Phase::AttackDeclare
                    || before.current_attacker != after.current_attacker);
            if new_turn {
                let attacker = after.current_attacker.unwrap();
                prop_assert!(
                    turns.insert((after.round, attacker)),
                    "{} attacked twice in round {}",
                    attacker,
                    after.round
                );
            }
        }
    }

    /// Terminal states absorb every action.
    #[test]
    fn prop_game_over_is_idempotent(seed in any::<u64>()) {
        let states = trace(seed, Difficulty::Normal);
        let last = states.last().unwrap();
        let mut rng = GameRng::new(seed);

        let actions =
            [Action::AiStep, Action::StartGame, Action::ChallengePass, Action::HumanChallenge];
        for action in actions {
            let next = Reducer::new().reduce(last, &action, &mut rng).unwrap();
            prop_assert_eq!(&next, last);
        }
    }

    /// Any snapshot survives a JSON round trip.
    #[test]
    fn prop_snapshot_serde_round_trip(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let states = trace(seed, Difficulty::Normal);
        let state = pick.get(&states);

        let json = serde_json::to_string(state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, state);
    }
}
