// crates/lumen_core/src/input/arbiter.rs
use glam::Vec2;
use lumen_shared::{ActionSignal, InputState, MovementSignal, PriorityLayer, MAX_AXES};

const LAYERS_BY_PRIORITY: [PriorityLayer; 4] = [
    PriorityLayer::Reflex,
    PriorityLayer::Cutscene,
    PriorityLayer::Control,
    PriorityLayer::Ambient,
];

/// Collects competing input signals for a frame and resolves them into one
/// `InputState`. The highest-priority layer present wins, independently for
/// each player's axis pair and for each action id.
#[derive(Default)]
pub struct Arbiter {
    pub move_signals: Vec<MovementSignal>,
    pub action_signals: Vec<ActionSignal>,
}

impl Arbiter {
    pub fn clear(&mut self) {
        self.move_signals.clear();
        self.action_signals.clear();
    }

    pub fn add_movement(&mut self, signal: MovementSignal) {
        self.move_signals.push(signal);
    }

    pub fn add_action(&mut self, signal: ActionSignal) {
        self.action_signals.push(signal);
    }

    pub fn resolve(&self) -> InputState {
        let mut state = InputState::default();

        // A. Movement, one winner layer per axis pair
        for pair in 0..MAX_AXES / 2 {
            let layers = self
                .move_signals
                .iter()
                .filter(|s| s.axis_pair == pair)
                .map(|s| s.layer);
            let Some(layer) = winning_layer(layers) else {
                continue;
            };

            let mut final_vector = Vec2::ZERO;
            for s in self.move_signals.iter().filter(|s| s.axis_pair == pair && s.layer == layer) {
                final_vector += s.vector * s.weight;
            }
            if final_vector.length_squared() > 1.0 {
                final_vector = final_vector.normalize();
            }

            state.set_axis(pair * 2, final_vector.x);
            state.set_axis(pair * 2 + 1, final_vector.y);
        }

        // B. Actions: the strongest layer speaking about an action decides it
        for s in &self.action_signals {
            let layer = winning_layer(
                self.action_signals
                    .iter()
                    .filter(|o| o.action_id == s.action_id)
                    .map(|o| o.layer),
            );
            if Some(s.layer) == layer && s.active {
                state.set_active(s.action_id, true);
            }
        }

        state
    }
}

fn winning_layer(layers: impl Iterator<Item = PriorityLayer> + Clone) -> Option<PriorityLayer> {
    LAYERS_BY_PRIORITY
        .into_iter()
        .find(|layer| layers.clone().any(|l| l == *layer))
}
