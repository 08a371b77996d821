//! Headless driving: let the policy play every seat, the human's included.

use crate::ai::AiPolicy;
use crate::core::{Action, Awaiting, MatchState, Prompt, RandomSource, Result, HUMAN_SEAT};

use super::reducer::Reducer;

/// The action a headless driver dispatches next, or `None` once finished.
///
/// The human seat attacks and defends as `policy` would and never
/// challenges.
pub fn autopilot_action<P: AiPolicy, R: RandomSource>(
    policy: &P,
    state: &MatchState,
    rng: &mut R,
) -> Result<Option<Action>> {
    let human = state.human().map_or(HUMAN_SEAT, |p| p.id);
    Ok(match state.awaiting()? {
        Awaiting::Start => Some(Action::StartGame),
        Awaiting::Ai => Some(Action::AiStep),
        Awaiting::Human(Prompt::Attack) => {
            Some(Action::HumanAttackDeclare(policy.choose_attack(state, human, rng)?))
        }
        Awaiting::Human(Prompt::Defense) => {
            Some(Action::HumanDefenseDeclare(policy.choose_defense(state, human, rng)?))
        }
        Awaiting::Human(Prompt::Challenge) => Some(Action::ChallengePass),
        Awaiting::Finished => None,
    })
}

/// Drive `state` until GAME_OVER or `max_steps` actions, whichever first.
pub fn play_out<P: AiPolicy, R: RandomSource>(
    reducer: &Reducer<P>,
    state: &MatchState,
    rng: &mut R,
    max_steps: usize,
) -> Result<MatchState> {
    let mut current = state.clone();
    for _ in 0..max_steps {
        let Some(action) = autopilot_action(reducer.policy(), &current, rng)? else {
            break;
        };
        current = reducer.reduce(&current, &action, rng)?;
    }
    Ok(current)
}
