//! Effect resolution - executing card effects on match state.
//!
//! `EffectResolver::resolve` runs a played card's effect. Effects that need
//! a decision return `EffectStep::Suspended`; the turn controller stores the
//! pending choice and later calls `EffectResolver::resume` with the answer.
//!
//! Every effect that targets the opponent checks the Maiden shield first and
//! stops with a `Blocked` event when it is up.

use crate::cards::{Card, CardKind, MAX_NUMBER};
use crate::core::{
    Choice, ChoiceOption, ChoiceOptions, ChoicePurpose, ChoiceRequest, EliminationCause,
    GameEvent, InvalidChoice, MatchConfig, MatchError, MatchState, PlayerId,
};

use super::effect::{Continuation, DiscardSource, EffectStep, PendingChoice};

/// Cards offered by a Sage bonus draw.
pub const BONUS_DRAW_SIZE: usize = 3;

/// Context for resolving effects.
///
/// Effects read seat controllers (a Fortune Teller only flips the card face
/// up for a human observer) and pacing hints from here.
pub struct ResolverContext<'a> {
    pub config: &'a MatchConfig,
}

impl<'a> ResolverContext<'a> {
    #[must_use]
    pub fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    fn reveal_pause(&self) -> GameEvent {
        GameEvent::Pause {
            millis: self.config.pacing.reveal_ms,
        }
    }
}

/// Resolves card effects on match state.
pub struct EffectResolver;

impl EffectResolver {
    /// Run the effect of `card`, just played by `actor`.
    ///
    /// The card must already be in `actor`'s discard pile: the Boy and Noble
    /// count it.
    pub fn resolve(
        state: &mut MatchState,
        ctx: &ResolverContext,
        actor: PlayerId,
        card: CardKind,
    ) -> Result<EffectStep, MatchError> {
        let step = match card {
            CardKind::Boy => Self::boy(state, ctx, actor),
            CardKind::Soldier => Self::soldier(state, actor),
            CardKind::FortuneTeller => Self::fortune_teller(state, ctx, actor),
            CardKind::Maiden => {
                state.players[actor].is_protected = true;
                state.log(GameEvent::Protected { player: actor });
                EffectStep::Done
            }
            CardKind::Reaper => Self::reaper(state, actor)?,
            CardKind::Noble => Self::noble(state, ctx, actor),
            CardKind::Sage => {
                state.players[actor].has_pending_bonus_draw = true;
                state.log(GameEvent::BonusDrawGranted { player: actor });
                EffectStep::Done
            }
            CardKind::Spirit => Self::spirit(state, actor),
            CardKind::Emperor => Self::duel(state, ctx, actor, CardKind::Emperor, DiscardSource::Emperor),
            // Refused at play validation.
            CardKind::Hero => EffectStep::Done,
        };
        Ok(step)
    }

    /// Finish a suspended effect with an answer.
    ///
    /// `selected` is the position of the chosen option in the request.
    pub fn resume(
        state: &mut MatchState,
        actor: PlayerId,
        continuation: Continuation,
        choice: Choice,
        selected: usize,
    ) -> Result<(), MatchError> {
        match continuation {
            Continuation::KeepBonusCard { offered } => {
                Self::keep_bonus_card(state, actor, offered, selected)
            }
            Continuation::Guess { target } => {
                let Choice::Number(guess) = choice else {
                    return Err(InvalidChoice::NotOffered.into());
                };
                Self::settle_guess(state, actor, target, guess);
                Ok(())
            }
            // Options mirror the target's hand, which cannot change while
            // the choice is pending.
            Continuation::ForcedDiscard { target, source } => {
                Self::forced_discard(state, target, selected, source)
            }
        }
    }

    /// Offer the top cards of the pile for a Sage bonus draw.
    pub fn offer_bonus_draw(state: &mut MatchState, actor: PlayerId) -> EffectStep {
        let offered = state.draw_pile.len().min(BONUS_DRAW_SIZE);
        state.log(GameEvent::BonusDrawOffered {
            player: actor,
            offered,
        });
        if offered == 0 {
            return EffectStep::Done;
        }

        let options = state
            .draw_pile
            .iter()
            .rev()
            .take(offered)
            .map(|card| ChoiceOption::Card(face_up(card)))
            .collect();
        Self::suspend(
            state,
            actor,
            ChoicePurpose::KeepBonusCard,
            options,
            Continuation::KeepBonusCard { offered },
        )
    }

    fn keep_bonus_card(
        state: &mut MatchState,
        actor: PlayerId,
        offered: usize,
        selected: usize,
    ) -> Result<(), MatchError> {
        let offered = offered.min(state.draw_pile.len());
        if selected >= offered {
            return Err(MatchError::InvalidIndex {
                player: actor,
                index: selected,
                len: offered,
            });
        }

        let split = state.draw_pile.len() - offered;
        let mut drawn: Vec<Card> = state.draw_pile.drain(split..).rev().collect();
        let kept = drawn.remove(selected);
        state.players[actor].hand.push(kept);
        state.log(GameEvent::BonusCardKept {
            player: actor,
            returned: drawn.len(),
        });
        if !drawn.is_empty() {
            state.return_and_reshuffle(drawn);
        }
        Ok(())
    }

    // === Per-card effects ===

    fn boy(state: &mut MatchState, ctx: &ResolverContext, actor: PlayerId) -> EffectStep {
        if state.discarded(CardKind::Boy) == 2 {
            Self::duel(state, ctx, actor, CardKind::Boy, DiscardSource::Revolution)
        } else {
            state.log(GameEvent::NoEffect { card: CardKind::Boy });
            EffectStep::Done
        }
    }

    fn soldier(state: &mut MatchState, actor: PlayerId) -> EffectStep {
        let target = actor.opponent();
        if Self::shielded(state, CardKind::Soldier, target) {
            return EffectStep::Done;
        }
        let options = (1..=MAX_NUMBER).map(ChoiceOption::Number).collect();
        Self::suspend(
            state,
            actor,
            ChoicePurpose::Guess,
            options,
            Continuation::Guess { target },
        )
    }

    fn settle_guess(state: &mut MatchState, actor: PlayerId, target: PlayerId, guess: u8) {
        let hit = state.players[target]
            .held()
            .is_some_and(|card| card.number() == guess);
        state.log(GameEvent::Guessed {
            player: actor,
            guess,
            hit,
        });
        if hit {
            Self::eliminate(state, target, EliminationCause::Guessed);
        }
    }

    fn fortune_teller(state: &mut MatchState, ctx: &ResolverContext, actor: PlayerId) -> EffectStep {
        let target = actor.opponent();
        if Self::shielded(state, CardKind::FortuneTeller, target) {
            return EffectStep::Done;
        }
        if state.players[target].hand.is_empty() {
            state.log(GameEvent::NoEffect {
                card: CardKind::FortuneTeller,
            });
        } else if ctx.config.is_human(actor) {
            Self::reveal(state, target, 0);
            state.log(ctx.reveal_pause());
        } else {
            state.log(GameEvent::HandObserved {
                observer: actor,
                owner: target,
            });
        }
        EffectStep::Done
    }

    fn reaper(state: &mut MatchState, actor: PlayerId) -> Result<EffectStep, MatchError> {
        let target = actor.opponent();
        if Self::shielded(state, CardKind::Reaper, target) {
            return Ok(EffectStep::Done);
        }
        // An empty pile only means there is nothing extra to draw.
        state.draw(target).ok();
        let held = state.players[target].hand.len();
        if held == 0 {
            state.log(GameEvent::NoEffect { card: CardKind::Reaper });
            return Ok(EffectStep::Done);
        }
        let index = state.rng.gen_index(held);
        Self::forced_discard(state, target, index, DiscardSource::Effect)?;
        Ok(EffectStep::Done)
    }

    fn noble(state: &mut MatchState, ctx: &ResolverContext, actor: PlayerId) -> EffectStep {
        let target = actor.opponent();
        let nobles = state.discarded(CardKind::Noble);
        if Self::shielded(state, CardKind::Noble, target) {
            return EffectStep::Done;
        }

        if nobles < 2 {
            for owner in [actor, target] {
                if !state.players[owner].hand.is_empty() {
                    Self::reveal(state, owner, 0);
                }
            }
            state.log(ctx.reveal_pause());
            return EffectStep::Done;
        }

        if state.players[actor].hand.is_empty() || state.players[target].hand.is_empty() {
            state.log(GameEvent::NoEffect { card: CardKind::Noble });
            return EffectStep::Done;
        }
        Self::reveal(state, actor, 0);
        Self::reveal(state, target, 0);
        state.log(ctx.reveal_pause());

        let mine = state.players[actor].held_number();
        let theirs = state.players[target].held_number();
        let winner = match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => Some(actor),
            std::cmp::Ordering::Less => Some(target),
            std::cmp::Ordering::Equal => None,
        };
        state.log(GameEvent::NobleShowdown { winner });
        if let Some(winner) = winner {
            Self::eliminate(state, winner.opponent(), EliminationCause::Outranked);
        }
        EffectStep::Done
    }

    fn spirit(state: &mut MatchState, actor: PlayerId) -> EffectStep {
        let target = actor.opponent();
        if Self::shielded(state, CardKind::Spirit, target) {
            return EffectStep::Done;
        }
        let (mine, theirs) = state.players.pair_mut(actor);
        if mine.hand.is_empty() || theirs.hand.is_empty() {
            state.log(GameEvent::NoEffect { card: CardKind::Spirit });
            return EffectStep::Done;
        }
        std::mem::swap(&mut mine.hand[0], &mut theirs.hand[0]);
        state.log(GameEvent::HandsSwapped {
            player: actor,
            opponent: target,
        });
        EffectStep::Done
    }

    /// Forced-discard duel shared by the Emperor and the Boy revolution.
    ///
    /// The target draws, shows the actor every card, and the actor picks
    /// one to discard.
    fn duel(
        state: &mut MatchState,
        ctx: &ResolverContext,
        actor: PlayerId,
        card: CardKind,
        source: DiscardSource,
    ) -> EffectStep {
        let target = actor.opponent();
        if Self::shielded(state, card, target) {
            return EffectStep::Done;
        }
        state.draw(target).ok();
        let held = state.players[target].hand.len();
        if held == 0 {
            state.log(GameEvent::NoEffect { card });
            return EffectStep::Done;
        }

        for index in 0..held {
            Self::reveal(state, target, index);
        }
        state.log(ctx.reveal_pause());

        let options = state.players[target]
            .hand
            .iter()
            .map(|card| ChoiceOption::Card(card.clone()))
            .collect();
        Self::suspend(
            state,
            actor,
            ChoicePurpose::ForcedDiscard(source),
            options,
            Continuation::ForcedDiscard { target, source },
        )
    }

    /// Discard the card at `index` from `target`'s hand and apply the Hero
    /// rules if it was the Hero.
    fn forced_discard(
        state: &mut MatchState,
        target: PlayerId,
        index: usize,
        source: DiscardSource,
    ) -> Result<(), MatchError> {
        let card = state.discard(target, index)?;
        let is_hero = card.is_hero();
        state.log(GameEvent::CardDiscarded {
            player: target,
            card,
            source,
        });
        if is_hero {
            match source {
                DiscardSource::Emperor => {
                    Self::eliminate(state, target, EliminationCause::HeroExecuted);
                }
                DiscardSource::Revolution | DiscardSource::Effect => {
                    Self::reincarnate(state, target, source);
                }
            }
        }
        Ok(())
    }

    /// Dump the rest of the hand and take the reincarnation card, or go out
    /// if it is already spent.
    fn reincarnate(state: &mut MatchState, player: PlayerId, source: DiscardSource) {
        let hand = std::mem::take(&mut state.players[player].hand);
        for card in hand {
            state.players[player].discard.push(card.clone());
            state.log(GameEvent::CardDiscarded {
                player,
                card,
                source,
            });
        }

        match state.reincarnation_card.take() {
            Some(card) => {
                state.players[player].hand.push(card);
                state.log(GameEvent::Reincarnated { player });
            }
            None => Self::eliminate(state, player, EliminationCause::NoReincarnation),
        }
    }

    // === Helpers ===

    fn shielded(state: &mut MatchState, card: CardKind, target: PlayerId) -> bool {
        if state.players[target].is_protected {
            state.log(GameEvent::Blocked { card, target });
            true
        } else {
            false
        }
    }

    fn reveal(state: &mut MatchState, owner: PlayerId, index: usize) {
        let Some(card) = state.players[owner].hand.get_mut(index) else {
            return;
        };
        card.revealed = true;
        let card = card.clone();
        state.log(GameEvent::CardRevealed { owner, card });
    }

    fn eliminate(state: &mut MatchState, player: PlayerId, cause: EliminationCause) {
        state.players[player].is_out = true;
        state.log(GameEvent::Eliminated { player, cause });
    }

    fn suspend(
        state: &mut MatchState,
        actor: PlayerId,
        purpose: ChoicePurpose,
        options: ChoiceOptions,
        continuation: Continuation,
    ) -> EffectStep {
        let request = ChoiceRequest {
            id: state.next_request_id(),
            actor,
            purpose,
            options,
        };
        EffectStep::Suspended(PendingChoice {
            request,
            continuation,
        })
    }
}

fn face_up(card: &Card) -> Card {
    let mut card = card.clone();
    card.revealed = true;
    card
}
