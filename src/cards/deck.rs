//! Deck construction.
//!
//! The deck is built once per match from the fixed composition table,
//! shuffled, and split into the reincarnation card and the draw pile.
//! Draw and discard primitives operate on `MatchState` and live there.

use crate::core::rng::GameRng;

use super::definition::{CardKind, DECK_SIZE};
use super::instance::{Card, CardId};

/// Result of building a match deck.
#[derive(Clone, Debug)]
pub struct Deal {
    /// Top of the pile is the end of the vec.
    pub draw_pile: Vec<Card>,
    /// The card set aside for the first reincarnation.
    pub reincarnation: Card,
}

/// All eighteen cards in composition order, ids `0..18`.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for kind in CardKind::ALL {
        for _ in 0..kind.copies() {
            let id = CardId::new(cards.len() as u8);
            cards.push(Card::new(id, kind));
        }
    }
    cards
}

/// Build, shuffle and split the deck.
///
/// The shuffle is an unbiased Fisher-Yates driven by `rng`, so the same
/// seed always yields the same reincarnation card and draw order.
#[must_use]
pub fn build_and_shuffle(rng: &mut GameRng) -> Deal {
    let mut cards = full_deck();
    rng.shuffle(&mut cards);
    // The top card after shuffling; `full_deck` always holds DECK_SIZE cards.
    let reincarnation = cards.remove(DECK_SIZE - 1);
    Deal {
        draw_pile: cards,
        reincarnation,
    }
}

/// Hands out physical cards by role for arranged positions.
///
/// Each physical card can be taken at most once, so arranged positions keep
/// card identities unique even when they use fewer than eighteen cards.
#[derive(Clone, Debug)]
pub struct CardPool {
    remaining: Vec<Card>,
}

impl CardPool {
    /// A pool holding the full composition.
    #[must_use]
    pub fn new() -> Self {
        Self {
            remaining: full_deck(),
        }
    }

    /// Take the lowest-id unused card of `kind`.
    pub fn take(&mut self, kind: CardKind) -> Option<Card> {
        let pos = self.remaining.iter().position(|c| c.kind == kind)?;
        Some(self.remaining.remove(pos))
    }

    /// Cards not yet taken, in composition order.
    #[must_use]
    pub fn remaining(&self) -> &[Card] {
        &self.remaining
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}
