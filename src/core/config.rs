//! Match configuration.
//!
//! A match is configured once at startup:
//! - `seed`: drives every random decision
//! - `SeatConfig`: display name and who controls each seat
//! - `first_player`: whose turn comes first
//! - `PacingConfig`: presentation pacing hints carried in the event log
//!
//! Deck composition is fixed and not configurable.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};

/// Who makes decisions for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Plays and choices arrive through `submit_play` / `submit_choice`.
    Human,
    /// Plays and choices are answered internally by the decision policy.
    Scripted,
}

/// Configuration for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub controller: Controller,
}

impl SeatConfig {
    /// A human-controlled seat.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    /// A seat driven by the scripted policy.
    pub fn scripted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Scripted,
        }
    }
}

/// Pacing hints, in milliseconds.
///
/// The engine only copies these into `GameEvent::Pause` records; nothing in
/// the rules waits on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// How long a revealed card stays face up.
    pub reveal_ms: u32,
    /// Pause between turns and after effects.
    pub turn_delay_ms: u32,
    /// Pause before a scripted seat plays.
    pub think_ms: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            reveal_ms: 3000,
            turn_delay_ms: 1000,
            think_ms: 1500,
        }
    }
}

impl PacingConfig {
    /// No pauses at all, for simulations and tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reveal_ms: 0,
            turn_delay_ms: 0,
            think_ms: 0,
        }
    }
}

/// Complete match configuration.
///
/// ```
/// use hero_duel::core::{Controller, MatchConfig, PlayerId, SeatConfig};
///
/// let config = MatchConfig::new(42)
///     .seat(PlayerId::SECOND, SeatConfig::human("Guest"))
///     .first_player(PlayerId::SECOND);
///
/// assert_eq!(config.seats[PlayerId::SECOND].controller, Controller::Human);
/// assert_eq!(config.first_player, PlayerId::SECOND);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub seed: u64,
    pub seats: PlayerMap<SeatConfig>,
    pub first_player: PlayerId,
    pub pacing: PacingConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            seats: PlayerMap::new(|p| {
                if p == PlayerId::FIRST {
                    SeatConfig::human("You")
                } else {
                    SeatConfig::scripted("CPU")
                }
            }),
            first_player: PlayerId::FIRST,
            pacing: PacingConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Default seats (human vs scripted) with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Default seats with a seed taken from the OS entropy source.
    #[must_use]
    pub fn with_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Both seats scripted, no pacing. Runs to completion on its own.
    #[must_use]
    pub fn simulation(seed: u64) -> Self {
        Self {
            seed,
            seats: PlayerMap::new(|p| SeatConfig::scripted(format!("CPU {}", p.0 + 1))),
            first_player: PlayerId::FIRST,
            pacing: PacingConfig::instant(),
        }
    }

    /// Replace one seat's configuration.
    #[must_use]
    pub fn seat(mut self, player: PlayerId, seat: SeatConfig) -> Self {
        self.seats[player] = seat;
        self
    }

    #[must_use]
    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    #[must_use]
    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Controller of a seat.
    #[must_use]
    pub fn controller(&self, player: PlayerId) -> Controller {
        self.seats[player].controller
    }

    #[must_use]
    pub fn is_human(&self, player: PlayerId) -> bool {
        self.controller(player) == Controller::Human
    }
}
