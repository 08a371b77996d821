//! Per-viewer projection of the match state.
//!
//! `MatchView` is what one seat is entitled to see: no leader flags, and
//! hand contents only for the viewer's own seat. The projection is a fresh
//! value; the authoritative `MatchState` is never redacted in place.

use serde::{Deserialize, Serialize};

use super::declaration::Declaration;
use super::error::Result;
use super::item::Item;
use super::player::{PlayerId, Team, TeamMap};
use super::state::{Difficulty, MatchState, Phase};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub is_human: bool,
    pub alive: bool,
    /// `Some` only on the viewer's own seat.
    pub left: Option<Item>,
    pub right: Option<Item>,
    /// Shield durability, left then right. Public knowledge.
    pub shields: [u8; 2],
    /// This seat is the current attacker of a live turn.
    pub acting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub viewer: PlayerId,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub round: u32,
    pub round_start_team: Team,
    pub acting_team: Team,
    pub players: Vec<PlayerView>,
    pub alive: TeamMap<usize>,
    pub current_attacker: Option<PlayerId>,
    pub current_target: Option<PlayerId>,
    pub last_declaration: Option<Declaration>,
    pub winner: Option<Team>,
    /// It is the viewer's attack turn.
    pub my_attack_turn: bool,
    /// The viewer must declare a defense.
    pub my_defense_turn: bool,
    /// The viewer may challenge the live declaration.
    pub can_challenge: bool,
}

impl MatchState {
    /// Build what `viewer` may see.
    pub fn view_for(&self, viewer: PlayerId) -> Result<MatchView> {
        let me = self.player(viewer)?;
        let live_turn = !matches!(self.phase, Phase::Setup | Phase::GameOver);

        let players = self
            .players
            .iter()
            .map(|p| {
                let own = p.id == viewer;
                PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    team: p.team,
                    is_human: p.is_human,
                    alive: p.alive,
                    left: own.then_some(p.left),
                    right: own.then_some(p.right),
                    shields: self.shields.pair(p.id),
                    acting: live_turn && self.current_attacker == Some(p.id),
                }
            })
            .collect();

        let live = self.last_declaration.as_ref();
        let can_challenge = match (self.phase.is_challenge_window(), live) {
            (true, Some(declaration)) => self.may_challenge(viewer, declaration)?,
            _ => false,
        };

        Ok(MatchView {
            viewer,
            difficulty: self.difficulty,
            phase: self.phase,
            round: self.round,
            round_start_team: self.round_start_team,
            acting_team: self.acting_team,
            players,
            alive: TeamMap::new(|team| self.alive_count(team)),
            current_attacker: self.current_attacker,
            current_target: self.current_target,
            last_declaration: self.last_declaration,
            winner: self.winner,
            my_attack_turn: me.alive
                && self.phase == Phase::AttackDeclare
                && self.current_attacker == Some(viewer),
            my_defense_turn: me.alive
                && self.phase == Phase::DefenseDeclare
                && self.current_target == Some(viewer),
            can_challenge,
        })
    }
}
