//! Domain model: ids, items, declarations, players, actions, state, RNG,
//! configuration, errors, the bounded log, and per-viewer projection.
//!
//! No game rules live here; see `rules` for the reducer.

pub mod action;
pub mod config;
pub mod declaration;
pub mod error;
pub mod item;
pub mod log;
pub mod player;
pub mod rng;
pub mod roster;
pub mod state;
pub mod view;

pub use action::{Action, AttackPlan, DefensePlan};
pub use config::MatchConfig;
pub use declaration::{AttackDeclaration, Declaration, DeclarationKind, DefenseDeclaration};
pub use error::{MatchError, Result};
pub use item::{AttackItem, DefenseItem, Hand, Item};
pub use log::{DeathCause, GameLog, LogEvent, LOG_CAPACITY, LOG_RETAIN};
pub use player::{PlayerId, PlayerMap, Team, TeamMap};
pub use rng::{GameRng, RandomSource, ScriptedRandom};
pub use roster::{AiProfile, Player};
pub use state::{
    AttackOrder, Awaiting, Difficulty, MatchState, Phase, Prompt, ShieldDurability, HUMAN_SEAT,
    PLAYER_COUNT, SHIELD_MAX, TEAM_SIZE,
};
pub use view::{MatchView, PlayerView};
