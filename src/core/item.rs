//! Items, hands, and the two claim vocabularies.
//!
//! A player holds exactly one `Item` per `Hand`. Declarations never name an
//! arbitrary item: attacks claim an `AttackItem`, defenses a `DefenseItem`.

use serde::{Deserialize, Serialize};

/// What a hand actually holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Sword,
    Twin,
    Shield,
    Bare,
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Item::Sword => "sword",
            Item::Twin => "twin swords",
            Item::Shield => "shield",
            Item::Bare => "bare hand",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    /// Slot index: left = 0, right = 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Hand::Left => "left hand",
            Hand::Right => "right hand",
        })
    }
}

/// Item an attacker may claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackItem {
    Sword,
    Twin,
}

impl AttackItem {
    /// Shield durability consumed when this attack lands on a shield.
    #[must_use]
    pub const fn damage(self) -> u8 {
        match self {
            AttackItem::Sword => 1,
            AttackItem::Twin => 2,
        }
    }

    /// The other attack claim (used when an AI bluffs).
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            AttackItem::Sword => AttackItem::Twin,
            AttackItem::Twin => AttackItem::Sword,
        }
    }
}

impl From<AttackItem> for Item {
    fn from(value: AttackItem) -> Self {
        match value {
            AttackItem::Sword => Item::Sword,
            AttackItem::Twin => Item::Twin,
        }
    }
}

/// Item a defender may claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseItem {
    Shield,
    Bare,
}

impl DefenseItem {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            DefenseItem::Shield => DefenseItem::Bare,
            DefenseItem::Bare => DefenseItem::Shield,
        }
    }
}

impl From<DefenseItem> for Item {
    fn from(value: DefenseItem) -> Self {
        match value {
            DefenseItem::Shield => Item::Shield,
            DefenseItem::Bare => Item::Bare,
        }
    }
}
