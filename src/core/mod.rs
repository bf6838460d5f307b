//! Core engine types: players, state, actions, events, RNG, configuration.
//!
//! Everything here is rules-agnostic plumbing. Card effects live in
//! `effects`, the turn state machine and win evaluation in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Choice, ChoiceKind, ChoiceOption, ChoiceOptions, ChoicePurpose, ChoiceRequest};
pub use config::{Controller, MatchConfig, PacingConfig, SeatConfig};
pub use error::{DeckExhausted, InvalidChoice, InvalidPlay, MatchError};
pub use event::{EliminationCause, EventRecord, GameEvent};
pub use player::{Hand, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{ArrangeError, MatchSnapshot, MatchState, StateBuilder, TurnPhase};
