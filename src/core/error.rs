//! Fatal reducer errors.
//!
//! Illegal actions are not errors: the reducer ignores them and returns the
//! state unchanged. An error means the caller handed the reducer a state or
//! action that references a seat the roster does not have.

use thiserror::Error;

use super::player::PlayerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),
}

pub type Result<T> = std::result::Result<T, MatchError>;
