// crates/lumen_core/src/input/map.rs
use std::collections::HashMap;

use lumen_shared::{ActionId, KeyCode};

/// Physical key -> action binding table. One key drives at most one action.
#[derive(Default, Clone)]
pub struct InputMap {
    key_bindings: HashMap<KeyCode, ActionId>,
}

impl InputMap {
    pub fn bind(&mut self, key: KeyCode, action: ActionId) {
        self.key_bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<ActionId> {
        self.key_bindings.remove(&key)
    }

    pub fn map_signal_to_intent(&self, key: KeyCode) -> Option<ActionId> {
        self.key_bindings.get(&key).copied()
    }

    /// Every key currently bound to `action`.
    pub fn keys_for(&self, action: ActionId) -> Vec<KeyCode> {
        self.key_bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_a_key_replaces_its_action() {
        let mut map = InputMap::default();
        map.bind(KeyCode::Space, 3);
        map.bind(KeyCode::Space, 5);
        assert_eq!(map.map_signal_to_intent(KeyCode::Space), Some(5));
        assert!(map.keys_for(3).is_empty());
        assert_eq!(map.unbind(KeyCode::Space), Some(5));
        assert_eq!(map.map_signal_to_intent(KeyCode::Space), None);
    }
}
