//! Match state: the single source of truth for one duel.
//!
//! ## MatchState
//!
//! Both seats, the draw pile, the reincarnation card, turn bookkeeping, the
//! pending choice (if an effect is suspended), the RNG and the event log.
//! Only the turn controller and the effect resolver it drives mutate it;
//! everything else reads through accessors or a `MatchSnapshot`.
//!
//! ## Deck primitives
//!
//! `draw`, `discard` and `return_and_reshuffle` move cards by value between
//! the pile, hands and discard piles, so the eighteen physical cards are
//! always accounted for exactly once.
//!
//! ## StateBuilder
//!
//! Arranges specific positions for tests and tutorials.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ChoiceRequest;
use super::config::MatchConfig;
use super::error::{DeckExhausted, MatchError};
use super::event::{EventRecord, GameEvent};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{build_and_shuffle, Card, CardId, CardKind, CardPool};
use crate::effects::PendingChoice;
use crate::rules::GameResult;

/// Where the turn state machine currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Protection clears, then the normal or bonus draw happens.
    TurnStart,
    /// Waiting for the Sage keep choice.
    AwaitingBonusChoice,
    /// Waiting for the active seat to play one of two cards.
    AwaitingPlay,
    /// A played card's effect is running or suspended on a choice.
    EffectResolving,
    /// Win check, then the other seat's turn.
    TurnEnd,
    /// Terminal. Nothing mutates the match any more.
    MatchOver,
}

/// Full match state.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Top of the pile is the end of the vec.
    pub(crate) draw_pile: Vec<Card>,
    pub(crate) reincarnation_card: Option<Card>,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) active: PlayerId,
    pub(crate) phase: TurnPhase,
    /// Set from the moment a played card leaves the hand until its effect
    /// has finished; no other play is accepted meanwhile.
    pub(crate) effect_in_progress: bool,
    pub(crate) pending: Option<PendingChoice>,
    pub(crate) result: Option<GameResult>,
    pub(crate) turn_number: u32,
    pub(crate) rng: GameRng,
    events: Vector<EventRecord>,
    next_sequence: u32,
    next_request_id: u32,
}

impl MatchState {
    /// Build the deck, deal one card to each seat and stand at the first
    /// player's turn start.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let deal = build_and_shuffle(&mut rng);

        let mut state = Self::empty(rng, config.first_player, TurnPhase::TurnStart);
        state.draw_pile = deal.draw_pile;
        state.reincarnation_card = Some(deal.reincarnation);
        state.apply_names(config);

        state.log(GameEvent::MatchStarted {
            first: config.first_player,
        });
        for player in PlayerId::both() {
            // 17 cards in the pile, two opening draws.
            state.draw(player).ok();
        }
        state
    }

    fn empty(rng: GameRng, active: PlayerId, phase: TurnPhase) -> Self {
        Self {
            draw_pile: Vec::new(),
            reincarnation_card: None,
            players: PlayerMap::new(|p| Player::new(p, p.to_string())),
            active,
            phase,
            effect_in_progress: false,
            pending: None,
            result: None,
            turn_number: 1,
            rng,
            events: Vector::new(),
            next_sequence: 0,
            next_request_id: 0,
        }
    }

    pub(crate) fn apply_names(&mut self, config: &MatchConfig) {
        for (id, player) in self.players.iter_mut() {
            player.name = config.seats[id].name.clone();
        }
    }

    /// Start arranging a specific position.
    #[must_use]
    pub fn builder(seed: u64) -> StateBuilder {
        StateBuilder::new(seed)
    }

    // === Accessors ===

    /// Cards left to draw, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    #[must_use]
    pub fn reincarnation_card(&self) -> Option<&Card> {
        self.reincarnation_card.as_ref()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::MatchOver
    }

    #[must_use]
    pub fn effect_in_progress(&self) -> bool {
        self.effect_in_progress
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// The suspended decision, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<&ChoiceRequest> {
        self.pending.as_ref().map(|p| &p.request)
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every event so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &Vector<EventRecord> {
        &self.events
    }

    /// Events with `sequence >= from`.
    pub fn events_since(&self, from: u32) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().skip_while(move |r| r.sequence < from)
    }

    /// Occurrences of `kind` across both discard piles.
    #[must_use]
    pub fn discarded(&self, kind: CardKind) -> usize {
        self.players.iter().map(|(_, p)| p.discarded(kind)).sum()
    }

    /// Discard occurrences per role across both piles.
    #[must_use]
    pub fn discard_counts(&self) -> FxHashMap<CardKind, usize> {
        let mut counts = FxHashMap::default();
        for (_, player) in self.players.iter() {
            for card in &player.discard {
                *counts.entry(card.kind).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Cards in the pile, the reserve, both hands and both discards.
    ///
    /// Always 18 for a dealt match.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + usize::from(self.reincarnation_card.is_some())
            + self
                .players
                .iter()
                .map(|(_, p)| p.hand.len() + p.discard.len())
                .sum::<usize>()
    }

    /// Read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            players: self.players.clone(),
            draw_pile_len: self.draw_pile.len(),
            reincarnation_available: self.reincarnation_card.is_some(),
            active: self.active,
            turn_number: self.turn_number,
            phase: self.phase,
            effect_in_progress: self.effect_in_progress,
            pending: self.pending_request().cloned(),
            result: self.result,
            last_event: self.next_sequence.checked_sub(1),
        }
    }

    // === Deck primitives ===

    /// Move the top card of the pile into `player`'s hand.
    pub(crate) fn draw(&mut self, player: PlayerId) -> Result<CardId, DeckExhausted> {
        let Some(card) = self.draw_pile.pop() else {
            self.log(GameEvent::DeckExhausted { player });
            return Err(DeckExhausted);
        };
        let id = card.id;
        self.players[player].hand.push(card);
        self.log(GameEvent::CardDrawn { player });
        Ok(id)
    }

    /// Move the card at `hand_index` from hand to the discard pile.
    pub(crate) fn discard(&mut self, player: PlayerId, hand_index: usize) -> Result<Card, MatchError> {
        let seat = &mut self.players[player];
        if hand_index >= seat.hand.len() {
            return Err(MatchError::InvalidIndex {
                player,
                index: hand_index,
                len: seat.hand.len(),
            });
        }
        let card = seat.hand.remove(hand_index);
        seat.discard.push(card.clone());
        Ok(card)
    }

    /// Put cards back into the pile and reshuffle the whole pile.
    pub(crate) fn return_and_reshuffle(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.draw_pile.extend(cards.into_iter().map(|mut card| {
            card.revealed = false;
            card
        }));
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Hide every card still in a hand.
    pub(crate) fn hide_hands(&mut self) {
        for (_, player) in self.players.iter_mut() {
            for card in player.hand.iter_mut() {
                card.revealed = false;
            }
        }
    }

    /// Reveal every card still in a hand.
    pub(crate) fn reveal_hands(&mut self) {
        for (_, player) in self.players.iter_mut() {
            for card in player.hand.iter_mut() {
                card.revealed = true;
            }
        }
    }

    // === Bookkeeping ===

    pub(crate) fn log(&mut self, event: GameEvent) {
        self.events.push_back(EventRecord {
            sequence: self.next_sequence,
            turn: self.turn_number,
            event,
        });
        self.next_sequence += 1;
    }

    pub(crate) fn next_request_id(&mut self) -> u32 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

/// Read-only copy of the public-facing match state.
///
/// Hands are included with their reveal flags; deciding what to draw face
/// down is the presentation's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub players: PlayerMap<Player>,
    pub draw_pile_len: usize,
    pub reincarnation_available: bool,
    pub active: PlayerId,
    pub turn_number: u32,
    pub phase: TurnPhase,
    pub effect_in_progress: bool,
    pub pending: Option<ChoiceRequest>,
    pub result: Option<GameResult>,
    /// Sequence number of the newest logged event.
    pub last_event: Option<u32>,
}

/// A role was requested more often than the deck prints it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no unused copy of {0} left to arrange")]
pub struct ArrangeError(pub CardKind);

/// Arranges a specific position.
///
/// Cards are taken from the fixed composition, so identities stay unique.
/// Roles not placed anywhere are left out unless `rest_to_draw_pile` is
/// called.
///
/// ```
/// use hero_duel::cards::CardKind;
/// use hero_duel::core::{MatchState, PlayerId};
///
/// let state = MatchState::builder(7)
///     .hand(PlayerId::FIRST, &[CardKind::Reaper, CardKind::Maiden])
///     .hand(PlayerId::SECOND, &[CardKind::Hero])
///     .draw_pile(&[CardKind::Boy])
///     .reincarnation(CardKind::Noble)
///     .build()
///     .unwrap();
///
/// assert_eq!(state.player(PlayerId::FIRST).hand.len(), 2);
/// assert_eq!(state.draw_pile().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct StateBuilder {
    seed: u64,
    pool: CardPool,
    players: PlayerMap<Player>,
    /// Listed top first.
    pile: Vec<Card>,
    rest_to_pile: bool,
    reincarnation: Option<Card>,
    active: PlayerId,
    phase: TurnPhase,
    turn_number: u32,
    error: Option<ArrangeError>,
}

impl StateBuilder {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            pool: CardPool::new(),
            players: PlayerMap::new(|p| Player::new(p, p.to_string())),
            pile: Vec::new(),
            rest_to_pile: false,
            reincarnation: None,
            active: PlayerId::FIRST,
            phase: TurnPhase::AwaitingPlay,
            turn_number: 1,
            error: None,
        }
    }

    fn take(&mut self, kind: CardKind) -> Option<Card> {
        if self.error.is_some() {
            return None;
        }
        let card = self.pool.take(kind);
        if card.is_none() {
            self.error = Some(ArrangeError(kind));
        }
        card
    }

    fn take_all(&mut self, kinds: &[CardKind]) -> Vec<Card> {
        kinds.iter().filter_map(|&kind| self.take(kind)).collect()
    }

    /// Append cards to a seat's hand.
    #[must_use]
    pub fn hand(mut self, player: PlayerId, kinds: &[CardKind]) -> Self {
        let cards = self.take_all(kinds);
        self.players[player].hand.extend(cards);
        self
    }

    /// Append cards to a seat's discard pile.
    #[must_use]
    pub fn discard(mut self, player: PlayerId, kinds: &[CardKind]) -> Self {
        let cards = self.take_all(kinds);
        self.players[player].discard.extend(cards);
        self
    }

    /// Append cards to the draw pile; the first listed is drawn first.
    #[must_use]
    pub fn draw_pile(mut self, kinds: &[CardKind]) -> Self {
        let cards = self.take_all(kinds);
        self.pile.extend(cards);
        self
    }

    /// Put every card not placed elsewhere under the listed pile cards.
    #[must_use]
    pub fn rest_to_draw_pile(mut self) -> Self {
        self.rest_to_pile = true;
        self
    }

    #[must_use]
    pub fn reincarnation(mut self, kind: CardKind) -> Self {
        self.reincarnation = self.take(kind);
        self
    }

    #[must_use]
    pub fn protected(mut self, player: PlayerId) -> Self {
        self.players[player].is_protected = true;
        self
    }

    #[must_use]
    pub fn bonus_draw(mut self, player: PlayerId) -> Self {
        self.players[player].has_pending_bonus_draw = true;
        self
    }

    #[must_use]
    pub fn active(mut self, player: PlayerId) -> Self {
        self.active = player;
        self
    }

    /// Stand at the active seat's turn start instead of awaiting its play.
    #[must_use]
    pub fn at_turn_start(mut self) -> Self {
        self.phase = TurnPhase::TurnStart;
        self
    }

    #[must_use]
    pub fn turn_number(mut self, turn: u32) -> Self {
        self.turn_number = turn;
        self
    }

    pub fn build(self) -> Result<MatchState, ArrangeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut state = MatchState::empty(GameRng::new(self.seed), self.active, self.phase);
        if self.rest_to_pile {
            let mut rest = self.pool.remaining().to_vec();
            state.rng.shuffle(&mut rest);
            state.draw_pile = rest;
        }
        state.draw_pile.extend(self.pile.into_iter().rev());
        state.reincarnation_card = self.reincarnation;
        state.players = self.players;
        state.turn_number = self.turn_number;
        Ok(state)
    }
}
