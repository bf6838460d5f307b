//! Match event log.
//!
//! Every state transition appends a `GameEvent`. The log is what a
//! presentation layer narrates and animates; `Pause` entries are pacing
//! hints only. Events never name a hidden card: a card identity appears
//! only once it is public (played, discarded) or revealed to its viewer.

use serde::{Deserialize, Serialize};

use super::action::ChoicePurpose;
use super::player::PlayerId;
use crate::cards::{Card, CardKind};
use crate::effects::DiscardSource;
use crate::rules::GameResult;

/// Why a seat left the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    /// A Soldier named the held card.
    Guessed,
    /// Lost the second-Noble comparison.
    Outranked,
    /// Hero force-discarded by the Emperor.
    HeroExecuted,
    /// Hero force-discarded after the reincarnation card was spent.
    NoReincarnation,
}

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MatchStarted {
        first: PlayerId,
    },
    TurnStarted {
        player: PlayerId,
    },
    CardDrawn {
        player: PlayerId,
    },
    DeckExhausted {
        player: PlayerId,
    },
    BonusDrawOffered {
        player: PlayerId,
        offered: usize,
    },
    BonusCardKept {
        player: PlayerId,
        returned: usize,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    /// The targeted seat is shielded; the effect stops here.
    Blocked {
        card: CardKind,
        target: PlayerId,
    },
    /// The effect ran but changed nothing.
    NoEffect {
        card: CardKind,
    },
    Guessed {
        player: PlayerId,
        guess: u8,
        hit: bool,
    },
    /// A scripted seat looked at the opponent's hand.
    HandObserved {
        observer: PlayerId,
        owner: PlayerId,
    },
    CardRevealed {
        owner: PlayerId,
        card: Card,
    },
    Protected {
        player: PlayerId,
    },
    BonusDrawGranted {
        player: PlayerId,
    },
    HandsSwapped {
        player: PlayerId,
        opponent: PlayerId,
    },
    NobleShowdown {
        winner: Option<PlayerId>,
    },
    CardDiscarded {
        player: PlayerId,
        card: Card,
        source: DiscardSource,
    },
    Reincarnated {
        player: PlayerId,
    },
    Eliminated {
        player: PlayerId,
        cause: EliminationCause,
    },
    ChoiceRequested {
        actor: PlayerId,
        purpose: ChoicePurpose,
        options: usize,
    },
    TurnEnded {
        player: PlayerId,
    },
    MatchOver {
        result: GameResult,
    },
    Pause {
        millis: u32,
    },
}

/// A logged event with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub sequence: u32,
    pub turn: u32,
    pub event: GameEvent,
}
