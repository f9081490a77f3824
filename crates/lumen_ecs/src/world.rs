// crates/lumen_ecs/src/world.rs

use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::entity::Entity;
use crate::storage::{SparseSet, Storage};

pub struct World {
    // One column per component type
    components: HashMap<TypeId, Box<dyn Storage>>,
    free_indices: Vec<u32>,
    generations: Vec<u32>,
    alive: Vec<bool>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            free_indices: Vec::new(),
            generations: Vec::new(),
            alive: Vec::new(),
        }
    }

    /// Creates the column for `T` up front, so queries on an empty level
    /// still see it. Returns false if it already existed.
    pub fn register_component<T: 'static>(&mut self) -> bool {
        match self.components.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Box::new(SparseSet::<T>::new()));
                true
            }
        }
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<T>())
    }

    pub fn spawn(&mut self) -> Entity {
        let index = if let Some(idx) = self.free_indices.pop() {
            idx
        } else {
            self.generations.push(0);
            self.alive.push(false);
            (self.generations.len() - 1) as u32
        };

        self.alive[index as usize] = true;
        Entity::new(index, self.generations[index as usize])
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let index = entity.index();
        index < self.alive.len()
            && self.alive[index]
            && self.generations[index] == entity.generation()
    }

    /// Drops every component of `entity` and recycles its slot.
    /// Returns false for handles that are already dead.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        for storage in self.components.values_mut() {
            storage.remove_entity(entity);
        }

        let index = entity.index();
        self.alive[index] = false;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_indices.push(index as u32);
        true
    }

    /// Attaches `component`, replacing any previous `T`. Columns are created
    /// on first use. Returns false, and drops the value, for dead handles.
    pub fn add_component<T: 'static>(&mut self, entity: Entity, component: T) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.register_component::<T>();
        match self.query_mut::<T>() {
            Some(column) => {
                column.insert(entity, component);
                true
            }
            None => false,
        }
    }

    pub fn get_component<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.query::<T>()?.get(entity)
    }

    pub fn get_component_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.query_mut::<T>()?.get_mut(entity)
    }

    /// The whole column for `T`, if it was ever registered.
    pub fn query<T: 'static>(&self) -> Option<&SparseSet<T>> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<SparseSet<T>>())
    }

    pub fn query_mut<T: 'static>(&mut self) -> Option<&mut SparseSet<T>> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<SparseSet<T>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pos(f32);
    #[derive(Debug, PartialEq)]
    struct Tag;

    fn world() -> World {
        let mut w = World::new();
        w.register_component::<Pos>();
        w.register_component::<Tag>();
        w
    }

    #[test]
    fn despawn_removes_components_and_invalidates_handle() {
        let mut w = world();
        let a = w.spawn();
        let b = w.spawn();
        w.add_component(a, Pos(1.0));
        w.add_component(b, Pos(2.0));
        w.add_component(a, Tag);

        assert!(w.despawn(a));
        assert!(!w.is_alive(a));
        assert!(!w.despawn(a));
        assert_eq!(w.get_component::<Pos>(a), None);
        assert_eq!(w.get_component::<Pos>(b), Some(&Pos(2.0)));
        assert!(w.query::<Tag>().unwrap().is_empty());
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut w = world();
        let a = w.spawn();
        w.add_component(a, Pos(1.0));
        w.despawn(a);

        let c = w.spawn();
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(w.get_component::<Pos>(c), None);

        w.add_component(c, Pos(3.0));
        assert_eq!(w.get_component::<Pos>(a), None);
        assert_eq!(w.get_component::<Pos>(c), Some(&Pos(3.0)));
    }

    #[test]
    fn swap_remove_keeps_other_entities_reachable() {
        let mut w = world();
        let ids: Vec<Entity> = (0..4).map(|_| w.spawn()).collect();
        for (i, e) in ids.iter().enumerate() {
            w.add_component(*e, Pos(i as f32));
        }

        let set = w.query_mut::<Pos>().unwrap();
        assert_eq!(set.remove(ids[1]), Some(Pos(1.0)));
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(ids[3]), Some(&Pos(3.0)));
        assert_eq!(set.get(ids[0]), Some(&Pos(0.0)));

        if let Some(p) = w.get_component_mut::<Pos>(ids[2]) {
            p.0 = 20.0;
        }
        assert_eq!(w.get_component::<Pos>(ids[2]), Some(&Pos(20.0)));
    }

    #[test]
    fn columns_appear_on_first_use_and_dead_handles_are_refused() {
        let mut w = World::new();
        assert!(w.query::<Pos>().is_none());

        let e = w.spawn();
        assert!(w.add_component(e, Pos(0.0)));
        assert!(!w.register_component::<Pos>());
        assert_eq!(w.query::<Pos>().map(|c| c.len()), Some(1));

        w.despawn(e);
        assert!(!w.add_component(e, Pos(1.0)));
        assert!(w.query::<Pos>().unwrap().is_empty());
    }
}
