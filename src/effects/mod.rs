//! Card effects.
//!
//! - `EffectResolver`: runs a played card's effect on the match state
//! - `PendingChoice` / `Continuation`: an effect suspended on a decision
//! - `DiscardSource`: what forced a card out of a hand, which decides how
//!   a discarded Hero is treated
//!
//! Effects dispatch on the closed `CardKind` enum; there is no effect
//! registry.

mod effect;
mod resolver;

pub use effect::{Continuation, DiscardSource, EffectStep, PendingChoice};
pub use resolver::{EffectResolver, ResolverContext, BONUS_DRAW_SIZE};
