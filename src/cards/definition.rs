//! Card definitions - the ten roles and the fixed deck composition.
//!
//! `CardKind` is a closed enum: every rule that depends on a card's role
//! matches on it exhaustively, so adding a role is a compile error until
//! every effect, policy and evaluator handles it.

use serde::{Deserialize, Serialize};

/// The ten card roles, ordered by printed number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    Boy,
    Soldier,
    FortuneTeller,
    Maiden,
    Reaper,
    Noble,
    Sage,
    Spirit,
    Emperor,
    Hero,
}

impl CardKind {
    /// Every role in printed-number order.
    pub const ALL: [CardKind; 10] = [
        CardKind::Boy,
        CardKind::Soldier,
        CardKind::FortuneTeller,
        CardKind::Maiden,
        CardKind::Reaper,
        CardKind::Noble,
        CardKind::Sage,
        CardKind::Spirit,
        CardKind::Emperor,
        CardKind::Hero,
    ];

    /// Printed number, 1..=10.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            CardKind::Boy => 1,
            CardKind::Soldier => 2,
            CardKind::FortuneTeller => 3,
            CardKind::Maiden => 4,
            CardKind::Reaper => 5,
            CardKind::Noble => 6,
            CardKind::Sage => 7,
            CardKind::Spirit => 8,
            CardKind::Emperor => 9,
            CardKind::Hero => 10,
        }
    }

    /// Look up a role by its printed number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.number() == number)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Boy => "Boy",
            CardKind::Soldier => "Soldier",
            CardKind::FortuneTeller => "Fortune Teller",
            CardKind::Maiden => "Maiden",
            CardKind::Reaper => "Reaper",
            CardKind::Noble => "Noble",
            CardKind::Sage => "Sage",
            CardKind::Spirit => "Spirit",
            CardKind::Emperor => "Emperor",
            CardKind::Hero => "Hero",
        }
    }

    /// How many physical copies the deck contains.
    #[must_use]
    pub const fn copies(self) -> usize {
        match self {
            CardKind::Emperor | CardKind::Hero => 1,
            _ => 2,
        }
    }

    /// Whether the card may be played voluntarily from hand.
    ///
    /// The Hero only ever leaves a hand through a forced discard.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        !matches!(self, CardKind::Hero)
    }

    /// Whether the card's effect targets the opponent and is therefore
    /// subject to the Maiden shield.
    #[must_use]
    pub const fn targets_opponent(self) -> bool {
        !matches!(
            self,
            CardKind::Boy | CardKind::Maiden | CardKind::Sage | CardKind::Hero
        )
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}

/// Total number of physical cards in a match.
pub const DECK_SIZE: usize = 18;

/// Highest printed number; valid Soldier guesses are `1..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 10;
