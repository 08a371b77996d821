//! Turn order: round-robin attacker selection, team alternation, rounds.

use crate::core::{LogEvent, MatchState, Phase, PlayerId, Result, Team};

/// Next eligible attacker of `team`: alive and not yet attacked this round.
///
/// Scans the team's fixed attack order from its cursor, wrapping once around.
/// On success the cursor moves just past the chosen seat, so repeated calls
/// walk the order round-robin.
pub fn pick_next_attacker(state: &mut MatchState, team: Team) -> Result<Option<PlayerId>> {
    let n = state.attack_order[team].len();
    let start = state.cursor[team];

    let mut found = None;
    for step in 0..n {
        let idx = (start + step) % n;
        let id = state.attack_order[team][idx];
        if state.player(id)?.alive && !state.attacked_this_round[team].contains(&id) {
            found = Some((idx, id));
            break;
        }
    }

    Ok(found.map(|(idx, id)| {
        state.cursor[team] = (idx + 1) % n;
        id
    }))
}

/// Hand the turn to `attacker` of `team`, clearing the previous exchange.
pub(crate) fn begin_turn(state: &mut MatchState, team: Team, attacker: PlayerId) -> Result<()> {
    let name = state.name(attacker)?;
    state.acting_team = team;
    state.current_attacker = Some(attacker);
    state.current_target = None;
    state.pending_attack = None;
    state.last_declaration = None;
    state.phase = Phase::AttackDeclare;
    state.push_log(LogEvent::Turn { name, team });
    Ok(())
}

/// Leave RESOLVE: the other team attacks next if it can, otherwise the same
/// team continues, otherwise a new round starts.
pub fn advance_turn_or_round(state: &mut MatchState) -> Result<()> {
    if state.is_over() {
        return Ok(());
    }

    let next_team = state.acting_team.other();
    if let Some(id) = pick_next_attacker(state, next_team)? {
        return begin_turn(state, next_team, id);
    }

    let same_team = state.acting_team;
    if let Some(id) = pick_next_attacker(state, same_team)? {
        return begin_turn(state, same_team, id);
    }

    start_new_round(state)
}

/// Both teams are exhausted: flip the opening team and reset the round.
pub fn start_new_round(state: &mut MatchState) -> Result<()> {
    if state.is_over() {
        return Ok(());
    }

    state.round += 1;
    state.round_start_team = state.round_start_team.other();
    state.acting_team = state.round_start_team;
    for team in Team::ALL {
        state.attacked_this_round[team].clear();
    }
    state.current_attacker = None;
    state.current_target = None;
    state.pending_attack = None;
    state.last_declaration = None;

    tracing::info!(round = state.round, starter = %state.round_start_team, "round start");
    state.push_log(LogEvent::RoundStarted { round: state.round, starter: state.round_start_team });

    let team = state.acting_team;
    match pick_next_attacker(state, team)? {
        Some(id) => begin_turn(state, team, id),
        None => {
            let winner = team.other();
            state.push_log(LogEvent::NoAttackers { winner });
            state.finish(winner);
            tracing::info!(%winner, "game over: no attackers");
            Ok(())
        }
    }
}
