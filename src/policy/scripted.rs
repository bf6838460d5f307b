//! The built-in opponent.

use crate::cards::CardKind;
use crate::core::{Choice, ChoiceKind, ChoiceOption, ChoiceRequest, GameRng};

use super::{DecisionPolicy, PolicyView};

/// Simple fixed heuristics.
///
/// - Plays a Sage if it holds one, otherwise its lowest playable card.
/// - Guesses uniformly among numbers that still have a copy out of the
///   discard piles.
/// - Keeps or discards the first non-Hero card when the Hero is offered
///   alongside others; otherwise takes the lowest number.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedPolicy;

impl DecisionPolicy for ScriptedPolicy {
    fn choose_play(&self, view: &PolicyView, _rng: &mut GameRng) -> Option<usize> {
        if let Some((index, _)) = view.playable().find(|(_, kind)| *kind == CardKind::Sage) {
            return Some(index);
        }
        view.playable()
            .min_by_key(|(_, kind)| kind.number())
            .map(|(index, _)| index)
    }

    fn choose(&self, view: &PolicyView, request: &ChoiceRequest, rng: &mut GameRng) -> Option<Choice> {
        match request.kind() {
            ChoiceKind::PickNumber => {
                let offered: Vec<u8> = request
                    .options
                    .iter()
                    .filter_map(|option| match option {
                        ChoiceOption::Number(n) => Some(*n),
                        ChoiceOption::Card(_) => None,
                    })
                    .collect();
                let live: Vec<u8> = offered
                    .iter()
                    .copied()
                    .filter(|&n| CardKind::from_number(n).is_some_and(|kind| !view.exhausted(kind)))
                    .collect();
                let pool = if live.is_empty() { &offered } else { &live };
                rng.choose(pool).copied().map(Choice::Number)
            }
            ChoiceKind::PickCard => {
                let has_hero = request.cards().any(|card| card.is_hero());
                let first_other = request.cards().find(|card| !card.is_hero());
                if let (true, Some(card)) = (has_hero, first_other) {
                    return Some(Choice::Card(card.id));
                }
                request
                    .cards()
                    .min_by_key(|card| card.number())
                    .map(|card| Choice::Card(card.id))
            }
        }
    }
}
