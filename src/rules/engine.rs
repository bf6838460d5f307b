//! Win evaluation and play legality.
//!
//! `evaluate` is a pure function of the match state: it never mutates and
//! returns the same answer for the same state. The turn controller calls it
//! after every effect and at every turn end, and once it returns a result
//! the match is frozen.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::PlayerId;
use crate::core::state::{MatchState, TurnPhase};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal numbers in the final showdown.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Decide whether the match has ended.
///
/// - A seat that is out loses, checked in seat order.
/// - With the pile empty and neither seat holding two cards, the held
///   numbers are compared (an empty hand counts as 0).
/// - Otherwise the match continues.
#[must_use]
pub fn evaluate(state: &MatchState) -> Option<GameResult> {
    for (id, player) in state.players().iter() {
        if player.is_out {
            return Some(GameResult::Winner(id.opponent()));
        }
    }
    let hands_settled = state.players().iter().all(|(_, p)| p.hand.len() < 2);
    if state.draw_pile().is_empty() && hands_settled {
        Some(showdown(state))
    } else {
        None
    }
}

/// Compare held numbers. Higher wins, equal is a draw.
#[must_use]
pub fn showdown(state: &MatchState) -> GameResult {
    let first = state.player(PlayerId::FIRST).held_number();
    let second = state.player(PlayerId::SECOND).held_number();
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
        std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
        std::cmp::Ordering::Equal => GameResult::Draw,
    }
}

/// Hand positions `player` may play right now.
///
/// Empty unless it is `player`'s turn, nothing is resolving and exactly two
/// cards are held. The Hero is never listed.
#[must_use]
pub fn legal_plays(state: &MatchState, player: PlayerId) -> SmallVec<[usize; 2]> {
    let seat = state.player(player);
    if state.phase() != TurnPhase::AwaitingPlay
        || state.active() != player
        || state.effect_in_progress()
        || state.pending_request().is_some()
        || seat.hand.len() != 2
    {
        return SmallVec::new();
    }
    seat.hand
        .iter()
        .enumerate()
        .filter(|(_, card)| card.kind.is_playable())
        .map(|(index, _)| index)
        .collect()
}
