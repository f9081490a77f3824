// crates/lumen_core/src/input/registry.rs
use std::collections::HashMap;

use lumen_shared::{ActionId, ACTION_NOT_FOUND};

/// Name <-> id table for digital actions. Ids are dense and assigned in
/// registration order, so they index straight into `InputState::digital_mask`.
#[derive(Default, Clone)]
pub struct ActionRegistry {
    name_to_id: HashMap<String, ActionId>,
    names: Vec<String>,
}

impl ActionRegistry {
    pub fn register(&mut self, name: &str) -> ActionId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.names.len() as ActionId;
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn get_id(&self, name: &str) -> Option<ActionId> {
        self.name_to_id.get(name).copied()
    }

    /// Like `get_id`, but yields the never-active sentinel for unknown names.
    pub fn resolve(&self, name: &str) -> ActionId {
        self.get_id(name).unwrap_or(ACTION_NOT_FOUND)
    }

    pub fn name_of(&self, id: ActionId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
