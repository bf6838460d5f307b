//! The turn state machine.
//!
//! ## Match
//!
//! Owns the configuration, the match state and the policy that answers for
//! scripted seats. External callers interact through three entry points:
//!
//! - `advance`: run until a human decision is needed or the match ends
//! - `submit_play`: a human seat plays a card
//! - `submit_choice`: a human seat answers a pending request
//!
//! Each returns a `Status` telling the caller what the match waits on.
//!
//! ## Phases
//!
//! `TurnStart` clears the Maiden shield and draws (or offers the Sage bonus
//! draw). `AwaitingPlay` waits for a play. `EffectResolving` runs the played
//! card, possibly suspended on a choice. `TurnEnd` checks for a winner and
//! hands the turn over. `MatchOver` is terminal.

use serde::{Deserialize, Serialize};

use crate::core::{
    Choice, ChoiceRequest, GameEvent, InvalidChoice, InvalidPlay, MatchConfig, MatchError,
    MatchSnapshot, MatchState, PlayerId, TurnPhase,
};
use crate::effects::{Continuation, EffectResolver, EffectStep, PendingChoice, ResolverContext};
use crate::policy::{DecisionPolicy, PolicyView, ScriptedPolicy};

use super::engine::{evaluate, showdown, GameResult};

/// What the match is waiting on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// A human seat must call `submit_play`.
    AwaitingPlay(PlayerId),
    /// A human seat must call `submit_choice`.
    AwaitingChoice(ChoiceRequest),
    /// Nothing external is needed; call `advance`.
    Running,
    Over(GameResult),
}

impl Status {
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Over(_))
    }
}

/// A two-seat duel.
///
/// ```
/// use hero_duel::core::MatchConfig;
/// use hero_duel::rules::{Match, Status};
///
/// let mut duel = Match::new(MatchConfig::simulation(11));
/// let status = duel.advance().unwrap();
/// assert!(matches!(status, Status::Over(_)));
/// assert_eq!(duel.state().total_cards(), 18);
/// ```
#[derive(Clone, Debug)]
pub struct Match<P = ScriptedPolicy> {
    config: MatchConfig,
    state: MatchState,
    policy: P,
}

impl Match<ScriptedPolicy> {
    /// Deal a new match; scripted seats use the built-in opponent.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_policy(config, ScriptedPolicy)
    }

    /// Resume from an arranged state.
    #[must_use]
    pub fn from_state(config: MatchConfig, state: MatchState) -> Self {
        Self::from_state_with_policy(config, state, ScriptedPolicy)
    }
}

impl<P: DecisionPolicy> Match<P> {
    #[must_use]
    pub fn with_policy(config: MatchConfig, policy: P) -> Self {
        let state = MatchState::new(&config);
        Self {
            config,
            state,
            policy,
        }
    }

    /// Resume from an arranged state. Seat names are taken from `config`.
    #[must_use]
    pub fn from_state_with_policy(config: MatchConfig, mut state: MatchState, policy: P) -> Self {
        state.apply_names(&config);
        Self {
            config,
            state,
            policy,
        }
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// What the match waits on, without advancing it.
    #[must_use]
    pub fn status(&self) -> Status {
        if let Some(result) = self.state.result {
            return Status::Over(result);
        }
        if let Some(pending) = &self.state.pending {
            if self.config.is_human(pending.request.actor) {
                return Status::AwaitingChoice(pending.request.clone());
            }
            return Status::Running;
        }
        let active = self.state.active;
        if self.state.phase == TurnPhase::AwaitingPlay
            && self.config.is_human(active)
            && self.state.players[active].hand.len() == 2
        {
            return Status::AwaitingPlay(active);
        }
        Status::Running
    }

    /// Run the state machine until a human decision is needed or the match
    /// is over. Scripted seats are answered by the policy along the way.
    pub fn advance(&mut self) -> Result<Status, MatchError> {
        loop {
            match self.state.phase {
                TurnPhase::MatchOver => return Ok(self.status()),
                TurnPhase::TurnStart => self.begin_turn(),
                TurnPhase::AwaitingPlay => {
                    let player = self.state.active;
                    if self.state.players[player].hand.len() < 2 {
                        self.state.phase = TurnPhase::TurnEnd;
                        continue;
                    }
                    if self.config.is_human(player) {
                        return Ok(Status::AwaitingPlay(player));
                    }
                    self.state.log(GameEvent::Pause {
                        millis: self.config.pacing.think_ms,
                    });
                    let view = PolicyView::new(&self.state, player);
                    match self.policy.choose_play(&view, &mut self.state.rng) {
                        Some(index) => {
                            self.validate_play(player, index)?;
                            self.play(player, index)?;
                        }
                        None => self.state.phase = TurnPhase::TurnEnd,
                    }
                }
                TurnPhase::AwaitingBonusChoice | TurnPhase::EffectResolving => {
                    let Some(pending) = &self.state.pending else {
                        // An effect that finished without suspending.
                        self.finish_effect();
                        continue;
                    };
                    let request = pending.request.clone();
                    if self.config.is_human(request.actor) {
                        return Ok(Status::AwaitingChoice(request));
                    }
                    let view = PolicyView::new(&self.state, request.actor);
                    let choice = self
                        .policy
                        .choose(&view, &request, &mut self.state.rng)
                        .ok_or(InvalidChoice::NotOffered)?;
                    self.apply_choice(request.actor, choice)?;
                }
                TurnPhase::TurnEnd => self.end_turn(),
            }
        }
    }

    /// A human seat plays the card at `hand_index`.
    ///
    /// Rejected plays leave the match untouched. After the match is over
    /// this is a no-op returning `Status::Over`.
    pub fn submit_play(&mut self, player: PlayerId, hand_index: usize) -> Result<Status, MatchError> {
        if let Some(result) = self.state.result {
            return Ok(Status::Over(result));
        }
        self.validate_play(player, hand_index)?;
        self.play(player, hand_index)?;
        self.advance()
    }

    /// A human seat answers the pending request.
    ///
    /// Rejected choices leave the request pending and the match untouched.
    pub fn submit_choice(&mut self, player: PlayerId, choice: Choice) -> Result<Status, MatchError> {
        if let Some(result) = self.state.result {
            return Ok(Status::Over(result));
        }
        self.apply_choice(player, choice)?;
        self.advance()
    }

    fn validate_play(&self, player: PlayerId, hand_index: usize) -> Result<(), MatchError> {
        if self.state.effect_in_progress {
            return Err(InvalidPlay::EffectInProgress.into());
        }
        if self.state.pending.is_some() {
            return Err(InvalidPlay::ChoicePending.into());
        }
        if player != self.state.active {
            return Err(InvalidPlay::NotYourTurn { player }.into());
        }
        let hand = &self.state.players[player].hand;
        if self.state.phase != TurnPhase::AwaitingPlay || hand.len() != 2 {
            return Err(InvalidPlay::WrongHandSize { held: hand.len() }.into());
        }
        let Some(card) = hand.get(hand_index) else {
            return Err(MatchError::InvalidIndex {
                player,
                index: hand_index,
                len: hand.len(),
            });
        };
        if !card.kind.is_playable() {
            return Err(InvalidPlay::HeroNotPlayable.into());
        }
        Ok(())
    }

    fn play(&mut self, player: PlayerId, hand_index: usize) -> Result<(), MatchError> {
        let card = self.state.discard(player, hand_index)?;
        self.state.effect_in_progress = true;
        self.state.phase = TurnPhase::EffectResolving;
        let kind = card.kind;
        self.state.log(GameEvent::CardPlayed { player, card });

        let ctx = ResolverContext::new(&self.config);
        match EffectResolver::resolve(&mut self.state, &ctx, player, kind)? {
            EffectStep::Done => self.finish_effect(),
            EffectStep::Suspended(pending) => self.suspend(pending),
        }
        Ok(())
    }

    fn apply_choice(&mut self, player: PlayerId, choice: Choice) -> Result<(), MatchError> {
        let Some(pending) = &self.state.pending else {
            return Err(InvalidChoice::NoPendingChoice.into());
        };
        let actor = pending.request.actor;
        if player != actor {
            return Err(InvalidChoice::NotYourChoice { actor }.into());
        }
        let Some(selected) = pending
            .request
            .options
            .iter()
            .position(|option| option.as_choice() == choice)
        else {
            return Err(InvalidChoice::NotOffered.into());
        };
        let continuation = pending.continuation;

        // The request stays pending until the effect accepts the answer.
        EffectResolver::resume(&mut self.state, actor, continuation, choice, selected)?;
        self.state.pending = None;
        match continuation {
            Continuation::KeepBonusCard { .. } => self.state.phase = TurnPhase::AwaitingPlay,
            Continuation::Guess { .. } | Continuation::ForcedDiscard { .. } => self.finish_effect(),
        }
        Ok(())
    }

    fn suspend(&mut self, pending: PendingChoice) {
        self.state.log(GameEvent::ChoiceRequested {
            actor: pending.request.actor,
            purpose: pending.request.purpose,
            options: pending.request.options.len(),
        });
        self.state.pending = Some(pending);
    }

    fn begin_turn(&mut self) {
        let player = self.state.active;
        self.state.log(GameEvent::TurnStarted { player });
        let seat = &mut self.state.players[player];
        seat.is_protected = false;

        if seat.has_pending_bonus_draw {
            seat.has_pending_bonus_draw = false;
            match EffectResolver::offer_bonus_draw(&mut self.state, player) {
                EffectStep::Done => self.state.phase = TurnPhase::AwaitingPlay,
                EffectStep::Suspended(pending) => {
                    self.state.phase = TurnPhase::AwaitingBonusChoice;
                    self.suspend(pending);
                }
            }
            return;
        }

        match self.state.draw(player) {
            Ok(_) => self.state.phase = TurnPhase::AwaitingPlay,
            Err(_) => {
                let result = evaluate(&self.state).unwrap_or_else(|| showdown(&self.state));
                self.conclude(result);
            }
        }
    }

    fn finish_effect(&mut self) {
        self.state.hide_hands();
        self.state.effect_in_progress = false;
        self.state.log(GameEvent::Pause {
            millis: self.config.pacing.turn_delay_ms,
        });
        match evaluate(&self.state) {
            Some(result) => self.conclude(result),
            None => self.state.phase = TurnPhase::TurnEnd,
        }
    }

    fn end_turn(&mut self) {
        if let Some(result) = evaluate(&self.state) {
            self.conclude(result);
            return;
        }
        let player = self.state.active;
        self.state.log(GameEvent::TurnEnded { player });
        self.state.active = player.opponent();
        self.state.turn_number += 1;
        self.state.phase = TurnPhase::TurnStart;
    }

    fn conclude(&mut self, result: GameResult) {
        self.state.result = Some(result);
        self.state.phase = TurnPhase::MatchOver;
        self.state.effect_in_progress = false;
        self.state.pending = None;
        self.state.reveal_hands();
        self.state.log(GameEvent::MatchOver { result });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::core::SeatConfig;

    const ME: PlayerId = PlayerId::FIRST;
    const THEM: PlayerId = PlayerId::SECOND;

    fn hot_seat() -> MatchConfig {
        MatchConfig::new(4).seat(THEM, SeatConfig::human("Guest"))
    }

    #[test]
    fn test_opening_turn_awaits_first_player() {
        let mut duel = Match::new(MatchConfig::new(21));
        let status = duel.advance().unwrap();

        assert_eq!(status, Status::AwaitingPlay(ME));
        assert_eq!(duel.state().player(ME).hand.len(), 2);
        assert_eq!(duel.state().player(THEM).hand.len(), 1);
        assert_eq!(duel.state().draw_pile().len(), 14);
    }

    #[test]
    fn test_play_rejected_out_of_turn() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Boy, CardKind::Maiden])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let before = duel.snapshot();
        let err = duel.submit_play(THEM, 0).unwrap_err();
        assert_eq!(err, InvalidPlay::NotYourTurn { player: THEM }.into());
        assert_eq!(duel.snapshot(), before);
    }

    #[test]
    fn test_hero_cannot_be_played() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Hero, CardKind::Maiden])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let err = duel.submit_play(ME, 0).unwrap_err();
        assert_eq!(err, InvalidPlay::HeroNotPlayable.into());
        assert_eq!(duel.state().player(ME).hand.len(), 2);
    }

    #[test]
    fn test_index_out_of_range() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Boy, CardKind::Maiden])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let err = duel.submit_play(ME, 2).unwrap_err();
        assert!(matches!(err, MatchError::InvalidIndex { index: 2, len: 2, .. }));
    }

    #[test]
    fn test_play_rejected_while_choice_pending() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Soldier, CardKind::Maiden])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let status = duel.submit_play(ME, 0).unwrap();
        assert!(matches!(status, Status::AwaitingChoice(ref r) if r.actor == ME));
        assert!(duel.state().effect_in_progress());

        let err = duel.submit_play(ME, 0).unwrap_err();
        assert_eq!(err, InvalidPlay::EffectInProgress.into());
        let err = duel.submit_choice(THEM, Choice::Number(7)).unwrap_err();
        assert_eq!(err, InvalidChoice::NotYourChoice { actor: ME }.into());
        let err = duel.submit_choice(ME, Choice::Number(11)).unwrap_err();
        assert_eq!(err, InvalidChoice::NotOffered.into());
        assert!(duel.state().pending_request().is_some());
    }

    #[test]
    fn test_failed_resume_keeps_request() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Emperor, CardKind::Boy])
            .hand(THEM, &[CardKind::Spirit])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let Status::AwaitingChoice(request) = duel.submit_play(ME, 0).unwrap() else {
            panic!("expected the Emperor's choice");
        };
        assert_eq!(request.options.len(), 2);
        let drawn = request.cards().nth(1).map(|c| c.id).unwrap();
        // Shrink the hand behind the request so the offered index is stale.
        duel.state.players[THEM].hand.pop();

        let err = duel.submit_choice(ME, Choice::Card(drawn)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidIndex { index: 1, len: 1, .. }));
        assert_eq!(duel.state().pending_request(), Some(&request));
        assert!(duel.state().effect_in_progress());
        assert_eq!(duel.status(), Status::AwaitingChoice(request));
    }

    #[test]
    fn test_guess_ends_match() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Soldier, CardKind::Maiden])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        duel.submit_play(ME, 0).unwrap();
        let status = duel.submit_choice(ME, Choice::Number(7)).unwrap();
        assert_eq!(status, Status::Over(GameResult::Winner(ME)));
        assert!(duel.is_over());
        assert!(!duel.state().effect_in_progress());

        // Frozen.
        let before = duel.snapshot();
        assert_eq!(duel.submit_play(THEM, 0).unwrap(), status);
        assert_eq!(duel.advance().unwrap(), status);
        assert_eq!(duel.snapshot(), before);
    }

    #[test]
    fn test_turn_passes_and_protection_clears() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Maiden, CardKind::Boy])
            .hand(THEM, &[CardKind::Sage])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let status = duel.submit_play(ME, 0).unwrap();
        assert_eq!(status, Status::AwaitingPlay(THEM));
        assert!(duel.state().player(ME).is_protected);
        assert_eq!(duel.state().turn_number(), 2);

        // THEM plays the Sage; protection only clears on ME's own turn.
        let sage = duel
            .state()
            .player(THEM)
            .hand
            .iter()
            .position(|c| c.kind == CardKind::Sage)
            .unwrap();
        let status = duel.submit_play(THEM, sage).unwrap();
        assert!(matches!(status, Status::AwaitingPlay(p) if p == ME));
        assert!(!duel.state().player(ME).is_protected);
    }

    #[test]
    fn test_bonus_draw_at_turn_start() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Sage, CardKind::Boy])
            .hand(THEM, &[CardKind::Noble])
            .draw_pile(&[CardKind::Soldier, CardKind::Spirit, CardKind::Maiden, CardKind::Reaper])
            .build()
            .unwrap();
        let config = MatchConfig::new(4).seat(THEM, SeatConfig::human("Guest"));
        let mut duel = Match::from_state(config, state);

        // ME plays the Sage, THEM draws the Soldier and plays a first Noble.
        assert_eq!(duel.submit_play(ME, 0).unwrap(), Status::AwaitingPlay(THEM));
        let status = duel.submit_play(THEM, 0).unwrap();
        let Status::AwaitingChoice(request) = status else {
            panic!("expected the bonus draw offer");
        };
        assert_eq!(request.purpose, crate::core::ChoicePurpose::KeepBonusCard);
        assert_eq!(request.options.len(), 3);
        assert_eq!(duel.state().phase(), TurnPhase::AwaitingBonusChoice);

        let pick = request.cards().next().map(|c| Choice::Card(c.id)).unwrap();
        let status = duel.submit_choice(ME, pick).unwrap();
        assert_eq!(status, Status::AwaitingPlay(ME));
        assert_eq!(duel.state().player(ME).hand.len(), 2);
        assert_eq!(duel.state().draw_pile().len(), 2);
        assert!(!duel.state().player(ME).has_pending_bonus_draw);
    }

    #[test]
    fn test_deck_exhaustion_forces_showdown() {
        let state = MatchState::builder(1)
            .hand(ME, &[CardKind::Maiden, CardKind::Emperor])
            .hand(THEM, &[CardKind::Noble])
            .build()
            .unwrap();
        let mut duel = Match::from_state(hot_seat(), state);

        let status = duel.submit_play(ME, 0).unwrap();
        assert_eq!(status, Status::Over(GameResult::Winner(ME)));
        assert!(duel
            .state()
            .events()
            .iter()
            .any(|r| matches!(r.event, GameEvent::MatchOver { .. })));
    }

    #[test]
    fn test_scripted_opponent_takes_its_turn() {
        let state = MatchState::builder(2)
            .hand(ME, &[CardKind::Maiden, CardKind::Boy])
            .hand(THEM, &[CardKind::Emperor])
            .rest_to_draw_pile()
            .build()
            .unwrap();
        let mut duel = Match::from_state(MatchConfig::new(2), state);

        let status = duel.submit_play(ME, 0).unwrap();
        assert!(matches!(status, Status::AwaitingPlay(p) if p == ME) || status.is_over());
        assert_eq!(duel.state().player(THEM).discard.len(), 1);
    }
}
