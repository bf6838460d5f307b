//! Match rules: the turn state machine and win evaluation.
//!
//! `Match` drives turns, dispatches played cards to the effect resolver and
//! answers scripted seats through a `DecisionPolicy`. `evaluate` decides
//! when the match is over.

pub mod engine;
pub mod turn;

pub use engine::{evaluate, legal_plays, showdown, GameResult};
pub use turn::{Match, Status};
