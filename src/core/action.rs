//! Choice requests and answers.
//!
//! Effects that need a decision suspend with a `ChoiceRequest`; the seat's
//! controller answers it with a `Choice`.
//! Human seats answer through `Match::submit_choice`, scripted seats through
//! the decision policy, both validated the same way.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, CardId};
use crate::effects::DiscardSource;

/// Shape of the answer a request expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceKind {
    PickNumber,
    PickCard,
}

/// Why the engine is asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoicePurpose {
    /// Soldier: name the opponent's held card.
    Guess,
    /// Sage bonus draw: keep one of the offered cards.
    KeepBonusCard,
    /// Forced-discard duel: pick the opponent's card to discard.
    ForcedDiscard(DiscardSource),
}

impl ChoicePurpose {
    #[must_use]
    pub const fn kind(self) -> ChoiceKind {
        match self {
            ChoicePurpose::Guess => ChoiceKind::PickNumber,
            ChoicePurpose::KeepBonusCard | ChoicePurpose::ForcedDiscard(_) => ChoiceKind::PickCard,
        }
    }
}

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceOption {
    Number(u8),
    Card(Card),
}

/// An answer to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Number(u8),
    Card(CardId),
}

impl ChoiceOption {
    /// The answer that selects this option.
    #[must_use]
    pub fn as_choice(&self) -> Choice {
        match self {
            ChoiceOption::Number(n) => Choice::Number(*n),
            ChoiceOption::Card(card) => Choice::Card(card.id),
        }
    }
}

pub type ChoiceOptions = SmallVec<[ChoiceOption; 10]>;

/// A pending decision, emitted when an effect or bonus draw suspends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRequest {
    /// Sequence number, unique within a match.
    pub id: u32,
    pub actor: PlayerId,
    pub purpose: ChoicePurpose,
    pub options: ChoiceOptions,
}

impl ChoiceRequest {
    #[must_use]
    pub fn kind(&self) -> ChoiceKind {
        self.purpose.kind()
    }

    /// Whether `choice` selects one of the offered options.
    #[must_use]
    pub fn offers(&self, choice: Choice) -> bool {
        self.options.iter().any(|option| option.as_choice() == choice)
    }

    /// Offered cards, in offer order. Empty for number requests.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.options.iter().filter_map(|option| match option {
            ChoiceOption::Card(card) => Some(card),
            ChoiceOption::Number(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    fn card_request() -> ChoiceRequest {
        ChoiceRequest {
            id: 1,
            actor: PlayerId::FIRST,
            purpose: ChoicePurpose::KeepBonusCard,
            options: [
                ChoiceOption::Card(Card::new(CardId::new(4), CardKind::FortuneTeller)),
                ChoiceOption::Card(Card::new(CardId::new(17), CardKind::Hero)),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_offers_by_identity() {
        let request = card_request();
        assert_eq!(request.kind(), ChoiceKind::PickCard);
        assert!(request.offers(Choice::Card(CardId::new(17))));
        assert!(!request.offers(Choice::Card(CardId::new(5))));
        assert!(!request.offers(Choice::Number(10)));
        assert_eq!(request.cards().count(), 2);
    }

    #[test]
    fn test_guess_request_kind() {
        assert_eq!(ChoicePurpose::Guess.kind(), ChoiceKind::PickNumber);
        assert_eq!(
            ChoicePurpose::ForcedDiscard(DiscardSource::Emperor).kind(),
            ChoiceKind::PickCard
        );
    }

    #[test]
    fn test_request_serde() {
        let request = card_request();
        let json = serde_json::to_string(&request).unwrap();
        let back: ChoiceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
