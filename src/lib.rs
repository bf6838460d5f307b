//! # hero-duel
//!
//! Rules engine for a two-player deduction card duel: an eighteen-card
//! deck, ten roles, a one-time reincarnation card, and a scripted opponent.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: `MatchState` owns every card. Cards move
//!    by value between pile, hands and discards, so all eighteen are always
//!    accounted for.
//!
//! 2. **Explicit Suspension**: an effect that needs a decision stores a
//!    `PendingChoice` in the state and the match reports
//!    `Status::AwaitingChoice`. Answering it resumes the effect. There are
//!    no callbacks and no timers.
//!
//! 3. **Presentation Agnostic**: every transition is appended to an event
//!    log. Pacing hints travel as `Pause` events; nothing in the rules
//!    waits.
//!
//! 4. **Deterministic**: all randomness flows through one seeded
//!    `GameRng`, so a seed replays a match exactly.
//!
//! ## Modules
//!
//! - `core`: players, state, actions, events, errors, RNG, configuration
//! - `cards`: roles, card instances, deck construction
//! - `effects`: per-card effect resolution
//! - `rules`: turn state machine and win evaluation
//! - `policy`: decision policies for engine-controlled seats
//!
//! ## Example
//!
//! ```
//! use hero_duel::{Match, MatchConfig, Status};
//!
//! let mut duel = Match::new(MatchConfig::new(7));
//! match duel.advance().unwrap() {
//!     Status::AwaitingPlay(player) => {
//!         let index = hero_duel::legal_plays(duel.state(), player)[0];
//!         duel.submit_play(player, index).unwrap();
//!     }
//!     other => panic!("unexpected status {other:?}"),
//! }
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Choice, ChoiceKind, ChoiceOption, ChoicePurpose, ChoiceRequest, Controller,
    DeckExhausted, EliminationCause, EventRecord, GameEvent, GameRng, InvalidChoice,
    InvalidPlay, MatchConfig, MatchError, MatchSnapshot, MatchState, PacingConfig,
    Player, PlayerId, PlayerMap, SeatConfig, StateBuilder, TurnPhase,
};

pub use crate::cards::{build_and_shuffle, Card, CardId, CardKind, Deal, DECK_SIZE};

pub use crate::effects::{DiscardSource, EffectResolver, ResolverContext};

pub use crate::rules::{evaluate, legal_plays, showdown, GameResult, Match, Status};

pub use crate::policy::{DecisionPolicy, PolicyView, RandomPolicy, ScriptedPolicy};
