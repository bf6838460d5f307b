//! Uniform random policy.

use crate::core::{Choice, ChoiceRequest, GameRng};

use super::{DecisionPolicy, PolicyView};

/// Picks uniformly among playable cards and offered options.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl DecisionPolicy for RandomPolicy {
    fn choose_play(&self, view: &PolicyView, rng: &mut GameRng) -> Option<usize> {
        let playable: Vec<usize> = view.playable().map(|(index, _)| index).collect();
        rng.choose(&playable).copied()
    }

    fn choose(&self, _view: &PolicyView, request: &ChoiceRequest, rng: &mut GameRng) -> Option<Choice> {
        let options: Vec<Choice> = request.options.iter().map(|o| o.as_choice()).collect();
        rng.choose(&options).copied()
    }
}
