//! Card instances - the eighteen physical cards of a match.
//!
//! Identity is by `CardId`, never by role: the two Soldiers are distinct
//! cards, and counting rules count occurrences of physical cards.

use serde::{Deserialize, Serialize};

use super::definition::CardKind;

/// Identity of one physical card, unique within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A physical card.
///
/// `revealed` is a presentation hint: the card is currently shown to the
/// seat that would not normally see it. It carries no rules meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    #[serde(default)]
    pub revealed: bool,
}

impl Card {
    /// Create a hidden card.
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            revealed: false,
        }
    }

    /// Printed number.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.kind.number()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.kind == CardKind::Hero
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind, self.id.0)
    }
}
