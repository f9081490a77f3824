// crates/lumen_core/src/input/config.rs

use lumen_shared::{KeyCode, PlayerBindings, PlayerId};
use tracing::debug;

use crate::input::{ActionRegistry, InputMap};

/// Key layout for one player slot, in registration order.
struct Layout {
    player: PlayerId,
    left: KeyCode,
    right: KeyCode,
    up: KeyCode,
    down: KeyCode,
    jump: KeyCode,
    slide: KeyCode,
    light: KeyCode,
}

const LAYOUTS: [Layout; 2] = [
    Layout {
        player: PlayerId::ONE,
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
        up: KeyCode::KeyW,
        down: KeyCode::KeyS,
        jump: KeyCode::Space,
        slide: KeyCode::ShiftLeft,
        light: KeyCode::KeyE,
    },
    Layout {
        player: PlayerId::TWO,
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        up: KeyCode::ArrowUp,
        down: KeyCode::ArrowDown,
        jump: KeyCode::Enter,
        slide: KeyCode::ShiftRight,
        light: KeyCode::ControlRight,
    },
];

/// Centralized defaults for input configuration.
pub struct InputDefaults;

impl InputDefaults {
    /// Registers `P{n}_*` actions for both slots, binds the default keyboard
    /// layout and returns the bindings each slot samples from.
    ///
    /// Player `n` reads analog axis pair `n - 1`.
    pub fn setup(registry: &mut ActionRegistry, input_map: &mut InputMap) -> [PlayerBindings; 2] {
        LAYOUTS.map(|layout| {
            let p = layout.player;
            let mut reg = |suffix: &str, key: KeyCode| {
                let id = registry.register(&format!("{p}_{suffix}"));
                input_map.bind(key, id);
                id
            };

            let bindings = PlayerBindings {
                left: reg("Left", layout.left),
                right: reg("Right", layout.right),
                up: reg("Up", layout.up),
                down: reg("Down", layout.down),
                jump: reg("Jump", layout.jump),
                slide: reg("Slide", layout.slide),
                light: reg("Light", layout.light),
                axis_pair: p.index(),
            };
            debug!(player = %p, ?bindings, "default input bindings");
            bindings
        })
    }

    /// Bindings for `player` looked up by name, for callers that registered
    /// their own layout. Unknown names map to the never-active sentinel.
    pub fn bindings_for(registry: &ActionRegistry, player: PlayerId) -> PlayerBindings {
        let id = |suffix: &str| registry.resolve(&format!("{player}_{suffix}"));
        PlayerBindings {
            left: id("Left"),
            right: id("Right"),
            up: id("Up"),
            down: id("Down"),
            jump: id("Jump"),
            slide: id("Slide"),
            light: id("Light"),
            axis_pair: player.index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_shared::ACTION_NOT_FOUND;

    #[test]
    fn both_players_get_distinct_actions_and_axes() {
        let mut registry = ActionRegistry::default();
        let mut map = InputMap::default();
        let [p1, p2] = InputDefaults::setup(&mut registry, &mut map);

        assert_eq!(registry.len(), 14);
        assert_ne!(p1.jump, p2.jump);
        assert_eq!((p1.axis_pair, p2.axis_pair), (0, 1));
        assert_eq!(map.map_signal_to_intent(KeyCode::Space), Some(p1.jump));
        assert_eq!(map.map_signal_to_intent(KeyCode::ShiftRight), Some(p2.slide));
        assert_eq!(registry.get_id("P2_Light"), Some(p2.light));
    }

    #[test]
    fn lookup_by_name_matches_setup() {
        let mut registry = ActionRegistry::default();
        let mut map = InputMap::default();
        let [_, p2] = InputDefaults::setup(&mut registry, &mut map);
        assert_eq!(InputDefaults::bindings_for(&registry, PlayerId::TWO), p2);

        let empty = InputDefaults::bindings_for(&ActionRegistry::default(), PlayerId::ONE);
        assert_eq!(empty.jump, ACTION_NOT_FOUND);
    }
}
