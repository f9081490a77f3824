// crates/lumen_core/src/input/poller.rs

use glam::Vec2;
use lumen_shared::{ActionSignal, InputState, KeyCode, MovementSignal, PlayerBindings, PriorityLayer, MAX_AXES};

use crate::input::{Arbiter, InputMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A raw keyboard transition from whatever device layer feeds the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub state: KeyState,
}

/// Low-level input collector that tracks held keys and analog sticks.
/// Keeps raw device state out of the scheduler and the gameplay layer.
pub struct InputPoller {
    active_keys: Vec<KeyCode>,
    sticks: [Vec2; MAX_AXES / 2],
}

impl Default for InputPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPoller {
    pub fn new() -> Self {
        Self {
            active_keys: Vec::new(),
            sticks: [Vec2::ZERO; MAX_AXES / 2],
        }
    }

    pub fn handle_event(&mut self, event: &KeyEvent) {
        match event.state {
            KeyState::Pressed => {
                if !self.active_keys.contains(&event.key) {
                    self.active_keys.push(event.key);
                }
            }
            KeyState::Released => {
                self.active_keys.retain(|&k| k != event.key);
            }
        }
    }

    pub fn is_key_active(&self, key: KeyCode) -> bool {
        self.active_keys.contains(&key)
    }

    /// Analog stick for one axis pair; ignored for pairs past the frame's axes.
    pub fn set_stick(&mut self, axis_pair: usize, value: Vec2) {
        if let Some(stick) = self.sticks.get_mut(axis_pair) {
            *stick = value;
        }
    }

    /// Sync raw physical state into the Arbiter using the InputMap.
    /// Clears the Arbiter first. Held direction actions of each player are
    /// folded into a Control-layer movement signal on that player's axis pair.
    pub fn synchronize_with_arbiter(&self, arbiter: &mut Arbiter, input_map: &InputMap, players: &[PlayerBindings]) {
        arbiter.clear();

        let mut held = InputState::default();
        for &key in &self.active_keys {
            if let Some(action_id) = input_map.map_signal_to_intent(key) {
                held.set_active(action_id, true);
                arbiter.add_action(ActionSignal {
                    layer: PriorityLayer::Control,
                    action_id,
                    active: true,
                });
            }
        }

        for bindings in players {
            let digital = bindings.digital_vector(&held);
            if digital != Vec2::ZERO {
                arbiter.add_movement(MovementSignal {
                    layer: PriorityLayer::Control,
                    axis_pair: bindings.axis_pair,
                    vector: digital,
                    weight: 1.0,
                });
            }
        }

        for (axis_pair, stick) in self.sticks.iter().enumerate() {
            if *stick != Vec2::ZERO {
                arbiter.add_movement(MovementSignal {
                    layer: PriorityLayer::Control,
                    axis_pair,
                    vector: *stick,
                    weight: 1.0,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode) -> KeyEvent {
        KeyEvent { key, state: KeyState::Pressed }
    }

    fn bindings() -> PlayerBindings {
        PlayerBindings {
            left: 0,
            right: 1,
            jump: 2,
            ..PlayerBindings::unbound(1)
        }
    }

    fn map() -> InputMap {
        let mut map = InputMap::default();
        map.bind(KeyCode::ArrowLeft, 0);
        map.bind(KeyCode::ArrowRight, 1);
        map.bind(KeyCode::Enter, 2);
        map
    }

    #[test]
    fn held_keys_become_actions_and_movement() {
        let mut poller = InputPoller::new();
        poller.handle_event(&press(KeyCode::ArrowRight));
        poller.handle_event(&press(KeyCode::Enter));
        poller.handle_event(&press(KeyCode::KeyQ));

        let mut arb = Arbiter::default();
        poller.synchronize_with_arbiter(&mut arb, &map(), &[bindings()]);
        let state = arb.resolve();

        assert!(state.is_active(2));
        assert_eq!(state.get_axis(2), 1.0);
        assert_eq!(state.get_axis(0), 0.0);
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut poller = InputPoller::new();
        poller.handle_event(&press(KeyCode::ArrowRight));
        poller.handle_event(&press(KeyCode::ArrowLeft));

        let mut arb = Arbiter::default();
        poller.synchronize_with_arbiter(&mut arb, &map(), &[bindings()]);
        assert!(arb.move_signals.is_empty());
    }

    #[test]
    fn release_clears_the_key() {
        let mut poller = InputPoller::new();
        poller.handle_event(&press(KeyCode::Enter));
        poller.handle_event(&KeyEvent { key: KeyCode::Enter, state: KeyState::Released });
        assert!(!poller.is_key_active(KeyCode::Enter));
    }

    #[test]
    fn sticks_feed_their_axis_pair() {
        let mut poller = InputPoller::new();
        poller.set_stick(0, Vec2::new(-0.5, 0.0));
        poller.set_stick(99, Vec2::ONE);

        let mut arb = Arbiter::default();
        poller.synchronize_with_arbiter(&mut arb, &InputMap::default(), &[]);
        assert_eq!(arb.resolve().get_axis(0), -0.5);
    }
}
