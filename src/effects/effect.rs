//! Effect outcomes and suspended continuations.
//!
//! An effect either finishes in one step or stops at a decision point. A
//! stopped effect is captured as a `PendingChoice`: the request shown to the
//! deciding seat plus the `Continuation` that finishes the effect once the
//! answer arrives. Nothing else about the effect is kept, so a suspended
//! match is plain data and can be cloned or inspected freely.

use serde::{Deserialize, Serialize};

use crate::core::{ChoiceRequest, PlayerId};

/// What forced a card out of a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardSource {
    /// Emperor duel. Discarding the Hero here eliminates outright.
    Emperor,
    /// Boy revolution duel. The Hero reincarnates.
    Revolution,
    /// Reaper's random discard, or the hand dump during reincarnation.
    Effect,
}

/// How a suspended effect finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    /// Sage bonus draw: the top `offered` cards of the pile are on offer.
    KeepBonusCard { offered: usize },
    /// Soldier: compare the named number against `target`'s held card.
    Guess { target: PlayerId },
    /// Duel: discard the selected card from `target`'s hand.
    ForcedDiscard { target: PlayerId, source: DiscardSource },
}

/// A decision the match is blocked on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChoice {
    pub request: ChoiceRequest,
    pub continuation: Continuation,
}

/// Outcome of running (part of) an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectStep {
    /// The effect finished.
    Done,
    /// The effect is waiting on a decision.
    Suspended(PendingChoice),
}

impl EffectStep {
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, EffectStep::Done)
    }
}
