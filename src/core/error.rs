//! Error types.
//!
//! Rejected plays and choices leave the match untouched and are reported to
//! the caller. `InvalidIndex` means a caller acted on a stale view of the
//! match and is surfaced rather than ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Why a play was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidPlay {
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },
    #[error("a play needs exactly two cards in hand, {held} held")]
    WrongHandSize { held: usize },
    #[error("the Hero cannot be played from hand")]
    HeroNotPlayable,
    #[error("another card is still resolving")]
    EffectInProgress,
    #[error("a choice must be answered first")]
    ChoicePending,
}

/// Why a choice was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidChoice {
    #[error("no choice is pending")]
    NoPendingChoice,
    #[error("the pending choice belongs to {actor}")]
    NotYourChoice { actor: PlayerId },
    #[error("the selected option was not offered")]
    NotOffered,
}

/// Errors returned by match entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MatchError {
    #[error("invalid play: {0}")]
    InvalidPlay(#[from] InvalidPlay),
    #[error("invalid choice: {0}")]
    InvalidChoice(#[from] InvalidChoice),
    #[error("hand index {index} out of range for {player} holding {len} card(s)")]
    InvalidIndex {
        player: PlayerId,
        index: usize,
        len: usize,
    },
}

/// The draw pile is empty.
///
/// Not a failure of the engine: the turn controller ends the match on it,
/// effects simply continue without the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("the draw pile is exhausted")]
pub struct DeckExhausted;
