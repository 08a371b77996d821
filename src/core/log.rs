//! Bounded match log.
//!
//! Entries are semantic (`LogEvent`) and render to fixed English labels via
//! `Display`. The log is append-only with a drop-oldest trim: once it grows
//! past `LOG_CAPACITY` entries it keeps only the newest `LOG_RETAIN`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::declaration::DeclarationKind;
use super::item::{AttackItem, DefenseItem, Hand, Item};
use super::player::Team;
use super::state::Difficulty;

/// Length above which the log is trimmed.
pub const LOG_CAPACITY: usize = 600;

/// Entries kept after a trim.
pub const LOG_RETAIN: usize = 420;

/// Why a player died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Challenged on a false declaration.
    FalseDeclaration,
    /// Challenged a declaration that turned out true.
    DoubtedTruth,
    /// Declared a bare-hand defense against a landed attack.
    DefenseFailure,
    /// Defended with a shield that was already at zero durability.
    ShieldBroken,
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DeathCause::FalseDeclaration => "false declaration caught",
            DeathCause::DoubtedTruth => "wrongly doubted the truth",
            DeathCause::DefenseFailure => "defense failure",
            DeathCause::ShieldBroken => "shield broken",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    AttackOrder { team: Team, names: Vec<String> },
    OpeningTeam { team: Team },
    LeadersHidden,
    Difficulty(Difficulty),
    GameStarted,
    Turn { name: String, team: Team },
    Passed { name: String },
    AttackDeclared { attacker: String, target: String, hand: Hand, declared: AttackItem },
    DefenseDeclared { defender: String, hand: Hand, declared: DefenseItem },
    Challenged { challenger: String, actor: String, kind: DeclarationKind },
    Revealed { actor: String, hand: Hand, item: Item },
    Killed { name: String, cause: DeathCause },
    LeaderFallen { team: Team, winner: Team },
    NoChallenge,
    ShieldHit { defender: String, hand: Hand, remaining: u8, damage: u8 },
    AttackFizzled { target: String },
    RoundStarted { round: u32, starter: Team },
    NoAttackers { winner: Team },
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEvent::AttackOrder { team, names } => {
                write!(f, "Order {}: {}", team, names.join(", "))
            }
            LogEvent::OpeningTeam { team } => write!(f, "Round 1 start team: {}", team),
            LogEvent::LeadersHidden => f.write_str("Leaders are hidden."),
            LogEvent::Difficulty(d) => write!(f, "Difficulty: {}", d),
            LogEvent::GameStarted => f.write_str("-- Game start"),
            LogEvent::Turn { name, team } => write!(f, "Turn: {} ({})", name, team),
            LogEvent::Passed { name } => write!(f, "{} passes", name),
            LogEvent::AttackDeclared { attacker, target, hand, declared } => {
                let item = Item::from(*declared);
                write!(f, "{} -> {} : {} {} declared", attacker, target, hand, item)
            }
            LogEvent::DefenseDeclared { defender, hand, declared } => {
                write!(f, "{} : {} {} declared", defender, hand, Item::from(*declared))
            }
            LogEvent::Challenged { challenger, actor, kind } => {
                write!(f, "{} doubts {} ({})", challenger, actor, kind)
            }
            LogEvent::Revealed { actor, hand, item } => {
                write!(f, "Reveal: {} {} = {}", actor, hand, item)
            }
            LogEvent::Killed { name, cause } => write!(f, "{} dies ({})", name, cause),
            LogEvent::LeaderFallen { team, winner } => {
                write!(f, "Leader of {} has fallen -> {} wins", team, winner)
            }
            LogEvent::NoChallenge => f.write_str("No challenge"),
            LogEvent::ShieldHit { defender, hand, remaining, damage } => write!(
                f,
                "{} {} shield durability {}/{} (damage {})",
                defender,
                hand,
                remaining,
                super::state::SHIELD_MAX,
                damage
            ),
            LogEvent::AttackFizzled { target } => {
                write!(f, "{} already fallen, attack fizzles", target)
            }
            LogEvent::RoundStarted { round, starter } => {
                write!(f, "-- Round {} start (first: {})", round, starter)
            }
            LogEvent::NoAttackers { winner } => write!(f, "No attackers left -> {} wins", winner),
        }
    }
}

/// Append-only, drop-oldest event log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vector<LogEvent>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, trimming to `LOG_RETAIN` when over `LOG_CAPACITY`.
    pub fn push(&mut self, event: LogEvent) {
        self.entries.push_back(event);
        if self.entries.len() > LOG_CAPACITY {
            let drop = self.entries.len() - LOG_RETAIN;
            self.entries = self.entries.split_off(drop);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEvent> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEvent> {
        self.entries.last()
    }

    /// Rendered lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
