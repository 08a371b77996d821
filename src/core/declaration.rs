//! Public, possibly false, claims about the content of one hand.

use serde::{Deserialize, Serialize};

use super::item::{AttackItem, DefenseItem, Hand, Item};
use super::player::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    pub actor: PlayerId,
    pub target: PlayerId,
    pub hand: Hand,
    pub declared: AttackItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseDeclaration {
    pub actor: PlayerId,
    pub hand: Hand,
    pub declared: DefenseItem,
}

/// The live declaration. Each new declaration replaces the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    Attack(AttackDeclaration),
    Defense(DefenseDeclaration),
}

/// Discriminant of a `Declaration`, used in log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Attack,
    Defense,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Attack => f.write_str("ATTACK"),
            DeclarationKind::Defense => f.write_str("DEFENSE"),
        }
    }
}

impl Declaration {
    #[must_use]
    pub const fn actor(&self) -> PlayerId {
        match self {
            Declaration::Attack(d) => d.actor,
            Declaration::Defense(d) => d.actor,
        }
    }

    #[must_use]
    pub const fn hand(&self) -> Hand {
        match self {
            Declaration::Attack(d) => d.hand,
            Declaration::Defense(d) => d.hand,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Attack(_) => DeclarationKind::Attack,
            Declaration::Defense(_) => DeclarationKind::Defense,
        }
    }

    /// The claimed item, widened for comparison against the real hand.
    #[must_use]
    pub fn claimed(&self) -> Item {
        match self {
            Declaration::Attack(d) => d.declared.into(),
            Declaration::Defense(d) => d.declared.into(),
        }
    }

    /// True for the riskier claim of each kind: TWIN attacks, SHIELD defenses.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        matches!(
            self,
            Declaration::Attack(AttackDeclaration { declared: AttackItem::Twin, .. })
                | Declaration::Defense(DefenseDeclaration { declared: DefenseItem::Shield, .. })
        )
    }
}
