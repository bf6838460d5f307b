//! Turn controller integration tests.
//!
//! These tests exercise the status/advance protocol, input validation and
//! the scripted seat through the public API only.

use hero_duel::cards::CardKind;
use hero_duel::core::{
    Choice, GameEvent, InvalidChoice, InvalidPlay, MatchConfig, MatchError, MatchSnapshot,
    MatchState, PacingConfig, PlayerId, SeatConfig, TurnPhase,
};
use hero_duel::rules::{legal_plays, GameResult, Match, Status};
use hero_duel::policy::RandomPolicy;

const ME: PlayerId = PlayerId::FIRST;
const THEM: PlayerId = PlayerId::SECOND;

fn hot_seat(seed: u64) -> MatchConfig {
    MatchConfig::new(seed).seat(THEM, SeatConfig::human("Guest"))
}

// =============================================================================
// Status protocol
// =============================================================================

/// Test that a fresh match reports Running until advanced.
#[test]
fn test_fresh_match_is_running() {
    let duel = Match::new(MatchConfig::new(1));
    assert_eq!(duel.status(), Status::Running);
    assert_eq!(duel.state().phase(), TurnPhase::TurnStart);
    assert_eq!(duel.state().player(ME).hand.len(), 1);
    assert_eq!(duel.state().player(THEM).hand.len(), 1);
}

/// Test that advancing a default match stops at the human's first play.
#[test]
fn test_advance_stops_for_human() {
    let mut duel = Match::new(MatchConfig::new(1));
    let status = duel.advance().unwrap();

    assert_eq!(status, Status::AwaitingPlay(ME));
    assert_eq!(duel.status(), status);
    assert!(!legal_plays(duel.state(), ME).is_empty());
    assert!(legal_plays(duel.state(), THEM).is_empty());
}

/// Test that a scripted first player moves before the human is asked.
#[test]
fn test_scripted_first_player() {
    for seed in 0..20 {
        let config = MatchConfig::new(seed).first_player(THEM);
        let mut duel = Match::new(config);
        let status = duel.advance().unwrap();

        assert_ne!(status, Status::Running);
        assert_eq!(duel.state().player(THEM).discard.len(), 1, "seed {seed}");
        if let Status::AwaitingPlay(player) = status {
            assert_eq!(player, ME);
            assert_eq!(duel.state().turn_number(), 2);
        }
    }
}

/// Test that a think pause precedes every scripted play.
#[test]
fn test_scripted_play_is_paced() {
    let pacing = PacingConfig {
        think_ms: 42,
        ..PacingConfig::default()
    };
    let config = MatchConfig::new(6).first_player(THEM).pacing(pacing);
    let mut duel = Match::new(config);
    duel.advance().unwrap();

    let log: Vec<_> = duel.state().events().iter().map(|r| &r.event).collect();
    let played = log
        .iter()
        .position(|e| matches!(e, GameEvent::CardPlayed { player, .. } if *player == THEM))
        .unwrap();
    assert_eq!(*log[played - 1], GameEvent::Pause { millis: 42 });
}

/// Test that two scripted seats play a whole match inside one advance.
#[test]
fn test_simulation_runs_to_completion() {
    for seed in 0..50 {
        let mut duel = Match::new(MatchConfig::simulation(seed));
        let status = duel.advance().unwrap();

        let Status::Over(result) = status else {
            panic!("seed {seed}: simulation stopped at {status:?}");
        };
        assert_eq!(duel.state().result(), Some(&result));
        assert_eq!(duel.state().total_cards(), 18);
        let last = duel.state().events().back().map(|r| r.event.clone());
        assert_eq!(last, Some(GameEvent::MatchOver { result }));
    }
}

/// Test that random policies also always finish.
#[test]
fn test_random_policy_simulation() {
    for seed in 0..50 {
        let mut duel = Match::with_policy(MatchConfig::simulation(seed), RandomPolicy);
        assert!(duel.advance().unwrap().is_over(), "seed {seed}");
    }
}

/// Test that the same seed replays the same match.
#[test]
fn test_seed_determinism() {
    let run = |seed| {
        let mut duel = Match::new(MatchConfig::simulation(seed));
        duel.advance().unwrap();
        duel.state().events().clone()
    };
    assert_eq!(run(77), run(77));
    assert_ne!(run(77), run(78));
}

// =============================================================================
// Validation
// =============================================================================

/// Test that a play with one card in hand is refused.
#[test]
fn test_wrong_hand_size() {
    let mut duel = Match::new(MatchConfig::new(3));
    let err = duel.submit_play(ME, 0).unwrap_err();
    assert_eq!(err, InvalidPlay::WrongHandSize { held: 1 }.into());
}

/// Test that answering with nothing pending is refused.
#[test]
fn test_choice_without_request() {
    let mut duel = Match::new(MatchConfig::new(3));
    duel.advance().unwrap();
    let err = duel.submit_choice(ME, Choice::Number(1)).unwrap_err();
    assert_eq!(err, InvalidChoice::NoPendingChoice.into());
}

/// Test that a play during the bonus keep choice is refused.
#[test]
fn test_play_during_bonus_choice() {
    let state = MatchState::builder(1)
        .hand(ME, &[CardKind::Soldier])
        .hand(THEM, &[CardKind::Boy])
        .bonus_draw(ME)
        .at_turn_start()
        .rest_to_draw_pile()
        .build()
        .unwrap();
    let mut duel = Match::from_state(hot_seat(1), state);

    let status = duel.advance().unwrap();
    assert!(matches!(status, Status::AwaitingChoice(_)));
    assert_eq!(duel.state().phase(), TurnPhase::AwaitingBonusChoice);

    let err = duel.submit_play(ME, 0).unwrap_err();
    assert_eq!(err, InvalidPlay::ChoicePending.into());
}

/// Test that a card not on offer is refused and the request stays.
#[test]
fn test_choice_not_offered() {
    let state = MatchState::builder(1)
        .hand(ME, &[CardKind::Emperor, CardKind::Boy])
        .hand(THEM, &[CardKind::Spirit])
        .rest_to_draw_pile()
        .build()
        .unwrap();
    let mut duel = Match::from_state(hot_seat(1), state);

    let Status::AwaitingChoice(request) = duel.submit_play(ME, 0).unwrap() else {
        panic!("expected the Emperor's choice");
    };
    let own = duel.state().player(ME).hand[0].id;
    let err = duel.submit_choice(ME, Choice::Card(own)).unwrap_err();
    assert!(matches!(err, MatchError::InvalidChoice(InvalidChoice::NotOffered)));
    assert_eq!(duel.state().pending_request(), Some(&request));

    let err = duel.submit_choice(ME, Choice::Number(8)).unwrap_err();
    assert_eq!(err, InvalidChoice::NotOffered.into());
}

/// Test that requests after the match ended change nothing.
#[test]
fn test_frozen_after_match_over() {
    let mut duel = Match::new(MatchConfig::simulation(9));
    let status = duel.advance().unwrap();
    let before = duel.snapshot();

    assert_eq!(duel.submit_play(ME, 0).unwrap(), status);
    assert_eq!(duel.submit_choice(THEM, Choice::Number(2)).unwrap(), status);
    assert_eq!(duel.advance().unwrap(), status);
    assert_eq!(duel.snapshot(), before);
}

// =============================================================================
// Snapshots and configuration
// =============================================================================

/// Test that snapshots survive a JSON round trip.
#[test]
fn test_snapshot_serde() {
    let mut duel = Match::new(MatchConfig::new(12));
    duel.advance().unwrap();

    let snapshot = duel.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
    assert_eq!(back.draw_pile_len, 14);
    assert!(back.reincarnation_available);
    assert_eq!(back.active, ME);
}

/// Test that a match configured from JSON uses the given seats.
#[test]
fn test_config_from_json() {
    let config: MatchConfig = serde_json::from_str(
        r#"{
            "seed": 5,
            "seats": {"data": [
                {"name": "Ana", "controller": "scripted"},
                {"name": "Bo", "controller": "scripted"}
            ]},
            "first_player": 1
        }"#,
    )
    .unwrap();
    let mut duel = Match::new(config);

    assert_eq!(duel.state().player(ME).name, "Ana");
    assert!(duel.advance().unwrap().is_over());
    let first = duel.state().events().iter().find_map(|r| match r.event {
        GameEvent::TurnStarted { player } => Some(player),
        _ => None,
    });
    assert_eq!(first, Some(THEM));
}

/// Test that events carry their turn number.
#[test]
fn test_events_tagged_with_turn() {
    let mut duel = Match::new(MatchConfig::simulation(4));
    duel.advance().unwrap();

    let events = duel.state().events();
    assert!(events.iter().zip(events.iter().skip(1)).all(|(a, b)| a.turn <= b.turn));
    let tail = duel.state().events_since(events.len() as u32 - 1).count();
    assert_eq!(tail, 1);
}

/// Test that a showdown result names the higher card.
#[test]
fn test_showdown_result_reported() {
    let state = MatchState::builder(1)
        .hand(ME, &[CardKind::Maiden, CardKind::Boy])
        .hand(THEM, &[CardKind::Reaper])
        .build()
        .unwrap();
    let mut duel = Match::from_state(hot_seat(1), state);

    let status = duel.submit_play(ME, 0).unwrap();
    assert_eq!(status, Status::Over(GameResult::Winner(THEM)));
    assert!(duel.snapshot().players[THEM].hand.iter().all(|c| c.revealed));
}
