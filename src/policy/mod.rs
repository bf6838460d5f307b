//! Decision policies for seats the engine plays itself.
//!
//! A `DecisionPolicy` answers the two kinds of decision a seat faces:
//! which card to play, and how to answer a `ChoiceRequest`. Policies only
//! see a `PolicyView`, never the match state, so they cannot peek at the
//! opponent's hand or the pile order.
//!
//! - `ScriptedPolicy`: the built-in opponent
//! - `RandomPolicy`: uniform over legal options, for simulations and fuzzing

mod random;
mod scripted;

use rustc_hash::FxHashMap;

use crate::cards::CardKind;
use crate::core::{Choice, ChoiceRequest, GameRng, Hand, MatchState, PlayerId};

pub use random::RandomPolicy;
pub use scripted::ScriptedPolicy;

/// What a deciding seat is allowed to know.
#[derive(Clone, Debug)]
pub struct PolicyView {
    pub player: PlayerId,
    pub hand: Hand,
    /// Discard occurrences per role across both piles.
    pub discarded: FxHashMap<CardKind, usize>,
    pub draw_pile_len: usize,
    pub opponent_protected: bool,
}

impl PolicyView {
    #[must_use]
    pub fn new(state: &MatchState, player: PlayerId) -> Self {
        Self {
            player,
            hand: state.player(player).hand.clone(),
            discarded: state.discard_counts(),
            draw_pile_len: state.draw_pile().len(),
            opponent_protected: state.player(player.opponent()).is_protected,
        }
    }

    /// Discarded copies of `kind`.
    #[must_use]
    pub fn discarded(&self, kind: CardKind) -> usize {
        self.discarded.get(&kind).copied().unwrap_or(0)
    }

    /// Whether every printed copy of `kind` is already discarded.
    #[must_use]
    pub fn exhausted(&self, kind: CardKind) -> bool {
        self.discarded(kind) >= kind.copies()
    }

    /// Playable hand positions.
    pub fn playable(&self) -> impl Iterator<Item = (usize, CardKind)> + '_ {
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.kind.is_playable())
            .map(|(index, card)| (index, card.kind))
    }
}

/// Decides for one seat.
pub trait DecisionPolicy {
    /// Pick a hand position to play. `None` passes the turn, which only
    /// happens when nothing is playable.
    fn choose_play(&self, view: &PolicyView, rng: &mut GameRng) -> Option<usize>;

    /// Answer a pending request. `None` if no option is acceptable.
    fn choose(&self, view: &PolicyView, request: &ChoiceRequest, rng: &mut GameRng) -> Option<Choice>;
}
