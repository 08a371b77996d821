//! The authoritative match state.
//!
//! ## MatchState
//!
//! Everything the reducer needs, including hidden information (leaders and
//! hand contents). Only the reducer writes it; callers hold snapshots.
//!
//! Uses `im` persistent vectors for the roster and the log, so the copy the
//! reducer takes on every action shares structure with the caller's value.
//!
//! ## Invariants
//!
//! - In `AttackDeclare` and `DefenseDeclare`, `current_attacker` is a living
//!   member of `acting_team`.
//! - `attack_order[t]` is a permutation of team `t`'s seats.
//! - `attacked_this_round[t]` only grows within a round.
//! - `winner` is set at most once, together with `Phase::GameOver`.
//! - Shield durability never increases.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::declaration::{AttackDeclaration, Declaration};
use super::error::{MatchError, Result};
use super::item::Hand;
use super::log::{GameLog, LogEvent};
use super::player::{PlayerId, PlayerMap, Team, TeamMap};
use super::roster::Player;

/// Players per team.
pub const TEAM_SIZE: usize = 5;

/// Seats in a match.
pub const PLAYER_COUNT: usize = TEAM_SIZE * 2;

/// The only human seat.
pub const HUMAN_SEAT: PlayerId = PlayerId::new(0);

/// Starting (and maximum) durability of every hand's shield.
pub const SHIELD_MAX: u8 = 3;

/// Fixed attack order of one team.
pub type AttackOrder = SmallVec<[PlayerId; TEAM_SIZE]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    AttackDeclare,
    ChallengeAttack,
    DefenseDeclare,
    ChallengeDefense,
    Resolve,
    GameOver,
}

impl Phase {
    /// Phases in which a declaration may be challenged or passed.
    #[must_use]
    pub const fn is_challenge_window(self) -> bool {
        matches!(self, Phase::ChallengeAttack | Phase::ChallengeDefense)
    }
}

/// Remaining shield durability per (player, hand), starting at `SHIELD_MAX`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldDurability {
    hands: PlayerMap<[u8; 2]>,
}

impl ShieldDurability {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self { hands: PlayerMap::with_value(player_count, [SHIELD_MAX; 2]) }
    }

    /// Current durability. Unknown seats read as a fresh shield.
    #[must_use]
    pub fn get(&self, player: PlayerId, hand: Hand) -> u8 {
        self.hands.get(player).map_or(SHIELD_MAX, |pair| pair[hand.index()])
    }

    /// Both hands, left first.
    #[must_use]
    pub fn pair(&self, player: PlayerId) -> [u8; 2] {
        self.hands.get(player).copied().unwrap_or([SHIELD_MAX; 2])
    }

    /// Apply `damage`, flooring at zero. Returns the remaining durability.
    pub fn wear(&mut self, player: PlayerId, hand: Hand, damage: u8) -> u8 {
        match self.hands.get_mut(player) {
            Some(pair) => {
                pair[hand.index()] = pair[hand.index()].saturating_sub(damage);
                pair[hand.index()]
            }
            None => SHIELD_MAX.saturating_sub(damage),
        }
    }

    /// Overwrite a value. Only lowers durability; higher values are ignored.
    pub fn lower_to(&mut self, player: PlayerId, hand: Hand, value: u8) {
        if let Some(pair) = self.hands.get_mut(player) {
            pair[hand.index()] = pair[hand.index()].min(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, [u8; 2])> + '_ {
        self.hands.iter().map(|(id, pair)| (id, *pair))
    }
}

/// What the match is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Awaiting {
    /// SETUP: waiting for `StartGame`.
    Start,
    /// The human seat must act.
    Human(Prompt),
    /// Dispatch `AiStep`.
    Ai,
    /// GAME_OVER.
    Finished,
}

/// Which human decision is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    Attack,
    Defense,
    /// Challenge or pass the live declaration.
    Challenge,
}

/// Full match state, including hidden information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub difficulty: Difficulty,
    pub phase: Phase,

    /// Round number (starts at 1).
    pub round: u32,
    pub round_start_team: Team,
    pub acting_team: Team,

    /// Roster, indexed by `PlayerId`.
    pub players: Vector<Player>,

    pub attack_order: TeamMap<AttackOrder>,
    /// Per-team cursor into `attack_order`.
    pub cursor: TeamMap<usize>,
    pub attacked_this_round: TeamMap<FxHashSet<PlayerId>>,

    pub current_attacker: Option<PlayerId>,
    pub current_target: Option<PlayerId>,
    /// The attack that survived its challenge window and awaits a defense.
    pub pending_attack: Option<AttackDeclaration>,
    pub last_declaration: Option<Declaration>,

    pub shields: ShieldDurability,

    pub log: GameLog,
    pub winner: Option<Team>,
}

impl MatchState {
    // === Roster ===

    /// Look up a seat. A missing seat is a caller bug.
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id.index()).ok_or(MatchError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id.index()).ok_or(MatchError::PlayerNotFound(id))
    }

    /// Display name of a seat.
    pub fn name(&self, id: PlayerId) -> Result<String> {
        self.player(id).map(|p| p.name.clone())
    }

    /// The human seat, if the roster has one.
    #[must_use]
    pub fn human(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human)
    }

    /// Living members of `team`, in roster order.
    #[must_use]
    pub fn alive_ids(&self, team: Team) -> SmallVec<[PlayerId; TEAM_SIZE]> {
        self.players.iter().filter(|p| p.alive && p.team == team).map(|p| p.id).collect()
    }

    #[must_use]
    pub fn alive_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.alive && p.team == team).count()
    }

    /// The hidden leader of `team`.
    #[must_use]
    pub fn leader(&self, team: Team) -> Option<PlayerId> {
        self.players.iter().find(|p| p.team == team && p.is_leader).map(|p| p.id)
    }

    // === Challenge eligibility ===

    /// Whether `challenger` may challenge `declaration`: alive, not its
    /// actor, and on the opposing team.
    pub fn may_challenge(&self, challenger: PlayerId, declaration: &Declaration) -> Result<bool> {
        let me = self.player(challenger)?;
        let actor = self.player(declaration.actor())?;
        Ok(me.alive && me.id != actor.id && me.team != actor.team)
    }

    /// Whether a living human may challenge the live declaration right now.
    ///
    /// While true, the AI challenge scan waits for the human's decision.
    pub fn human_may_challenge(&self) -> Result<bool> {
        if !self.phase.is_challenge_window() {
            return Ok(false);
        }
        match (self.human(), self.last_declaration.as_ref()) {
            (Some(human), Some(declaration)) => self.may_challenge(human.id, declaration),
            _ => Ok(false),
        }
    }

    // === Progress ===

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// What the match is waiting for.
    pub fn awaiting(&self) -> Result<Awaiting> {
        let human_seat = |id: Option<PlayerId>| -> Result<bool> {
            match id {
                Some(id) => {
                    let p = self.player(id)?;
                    Ok(p.is_human && p.alive)
                }
                None => Ok(false),
            }
        };

        Ok(match self.phase {
            Phase::Setup => Awaiting::Start,
            Phase::GameOver => Awaiting::Finished,
            Phase::AttackDeclare if human_seat(self.current_attacker)? => {
                Awaiting::Human(Prompt::Attack)
            }
            Phase::DefenseDeclare if human_seat(self.current_target)? => {
                Awaiting::Human(Prompt::Defense)
            }
            Phase::ChallengeAttack | Phase::ChallengeDefense if self.human_may_challenge()? => {
                Awaiting::Human(Prompt::Challenge)
            }
            _ => Awaiting::Ai,
        })
    }

    pub(crate) fn push_log(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    /// Declare `winner` and end the match.
    pub(crate) fn finish(&mut self, winner: Team) {
        self.winner = Some(winner);
        self.phase = Phase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_wear_floors_at_zero() {
        let mut shields = ShieldDurability::new(2);
        let p = PlayerId::new(1);

        assert_eq!(shields.get(p, Hand::Left), SHIELD_MAX);
        assert_eq!(shields.wear(p, Hand::Left, 2), 1);
        assert_eq!(shields.wear(p, Hand::Left, 2), 0);
        assert_eq!(shields.wear(p, Hand::Left, 1), 0);
        assert_eq!(shields.get(p, Hand::Right), SHIELD_MAX);
        assert_eq!(shields.pair(p), [0, SHIELD_MAX]);
    }

    #[test]
    fn test_shield_lower_to_never_raises() {
        let mut shields = ShieldDurability::new(1);
        let p = PlayerId::new(0);

        shields.lower_to(p, Hand::Right, 1);
        shields.lower_to(p, Hand::Right, 3);
        assert_eq!(shields.get(p, Hand::Right), 1);
    }

    #[test]
    fn test_challenge_window() {
        assert!(Phase::ChallengeAttack.is_challenge_window());
        assert!(Phase::ChallengeDefense.is_challenge_window());
        assert!(!Phase::DefenseDeclare.is_challenge_window());
        assert!(!Phase::Resolve.is_challenge_window());
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
        assert_eq!(Difficulty::Hard.to_string(), "HARD");
    }
}
