//! Card model: roles, physical cards and deck construction.
//!
//! - `CardKind`: the ten roles and their print counts
//! - `Card`: one physical card with a stable `CardId`
//! - `deck`: composition table, seeded shuffle, reincarnation split

pub mod deck;
pub mod definition;
pub mod instance;

pub use deck::{build_and_shuffle, full_deck, CardPool, Deal};
pub use definition::{CardKind, DECK_SIZE, MAX_NUMBER};
pub use instance::{Card, CardId};
