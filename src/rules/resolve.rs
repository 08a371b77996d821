//! Deaths, challenge resolution, and defense resolution.

use crate::core::{
    DeathCause, Declaration, DefenseItem, LogEvent, MatchState, Phase, PlayerId, Result,
};

/// Kill `victim`. Killing the dead does nothing.
///
/// A fallen leader ends the match for the other team on the spot.
pub fn kill(state: &mut MatchState, victim: PlayerId, cause: DeathCause) -> Result<()> {
    let player = state.player_mut(victim)?;
    if !player.alive {
        return Ok(());
    }
    player.alive = false;
    let (name, team, was_leader) = (player.name.clone(), player.team, player.is_leader);

    tracing::debug!(%victim, %cause, "death");
    state.push_log(LogEvent::Killed { name, cause });

    if was_leader {
        let winner = team.other();
        state.push_log(LogEvent::LeaderFallen { team, winner });
        state.finish(winner);
        tracing::info!(%winner, "game over: leader fallen");
    }
    Ok(())
}

/// `challenger` doubts the live declaration; reveal the hand and kill the
/// loser. Exactly one player dies.
pub fn resolve_challenge(state: &mut MatchState, challenger: PlayerId) -> Result<()> {
    let Some(declaration) = state.last_declaration else {
        return Ok(());
    };

    let actor = state.player(declaration.actor())?;
    let actual = actor.item(declaration.hand());
    let actor_name = actor.name.clone();
    let truthful = actual == declaration.claimed();

    let challenger_name = state.name(challenger)?;
    state.push_log(LogEvent::Challenged {
        challenger: challenger_name,
        actor: actor_name.clone(),
        kind: declaration.kind(),
    });
    state.push_log(LogEvent::Revealed {
        actor: actor_name,
        hand: declaration.hand(),
        item: actual,
    });

    tracing::debug!(%challenger, actor = %declaration.actor(), truthful, "challenge resolved");
    if truthful {
        kill(state, challenger, DeathCause::DoubtedTruth)
    } else {
        kill(state, declaration.actor(), DeathCause::FalseDeclaration)
    }
}

/// Close a challenge window: an attack becomes pending (or fizzles), a
/// defense is resolved. Any other phase is left alone.
pub fn transition_after_challenge(state: &mut MatchState) -> Result<()> {
    if state.is_over() {
        return Ok(());
    }

    match state.phase {
        Phase::ChallengeAttack => match state.last_declaration {
            Some(Declaration::Attack(attack)) if state.player(attack.actor)?.alive => {
                let target = state.player(attack.target)?;
                if target.alive {
                    state.pending_attack = Some(attack);
                    state.phase = Phase::DefenseDeclare;
                } else {
                    let target = target.name.clone();
                    state.push_log(LogEvent::AttackFizzled { target });
                    state.phase = Phase::Resolve;
                }
            }
            // The attacker died to a challenge, or nothing is live.
            _ => state.phase = Phase::Resolve,
        },
        Phase::ChallengeDefense => apply_defense_and_resolve(state)?,
        _ => {}
    }
    Ok(())
}

/// Apply the pending attack against the declared defense, then move to
/// RESOLVE unless the match ended.
///
/// The claim is taken at face value: an unchallenged SHIELD absorbs the hit
/// even if the hand is really bare.
pub fn apply_defense_and_resolve(state: &mut MatchState) -> Result<()> {
    let (Some(attack), Some(defender), Some(Declaration::Defense(defense))) =
        (state.pending_attack, state.current_target, state.last_declaration)
    else {
        state.phase = Phase::Resolve;
        return Ok(());
    };

    if !state.player(defender)?.alive {
        state.phase = Phase::Resolve;
        return Ok(());
    }

    let damage = attack.declared.damage();
    match defense.declared {
        DefenseItem::Bare => kill(state, defender, DeathCause::DefenseFailure)?,
        DefenseItem::Shield => {
            if state.shields.get(defender, defense.hand) == 0 {
                kill(state, defender, DeathCause::ShieldBroken)?;
            } else {
                let remaining = state.shields.wear(defender, defense.hand, damage);
                let name = state.name(defender)?;
                state.push_log(LogEvent::ShieldHit {
                    defender: name,
                    hand: defense.hand,
                    remaining,
                    damage,
                });
            }
        }
    }

    if !state.is_over() {
        state.phase = Phase::Resolve;
    }
    Ok(())
}
