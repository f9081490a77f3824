// crates/lumen_ecs/src/storage.rs
use std::any::Any;

use crate::Entity;

/// Type-erased view over one component column, so the world can drop an
/// entity from every column without knowing the concrete types.
pub(crate) trait Storage {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove_entity(&mut self, entity: Entity);
}

/// Dense component column indexed through a sparse entity table.
pub struct SparseSet<T> {
    dense: Vec<T>,
    entities: Vec<Entity>,
    sparse: Vec<Option<usize>>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            sparse: Vec::new(),
        }
    }
}

impl<T: 'static> SparseSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn insert(&mut self, entity: Entity, value: T) {
        let index = entity.index();
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }

        match self.sparse[index] {
            Some(dense_index) => {
                // Same slot, possibly a newer generation: overwrite in place.
                self.dense[dense_index] = value;
                self.entities[dense_index] = entity;
            }
            None => {
                self.sparse[index] = Some(self.dense.len());
                self.dense.push(value);
                self.entities.push(entity);
            }
        }
    }

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense_index = (*self.sparse.get(entity.index())?)?;
        // Stale handles from a recycled slot must not resolve.
        (self.entities[dense_index] == entity).then_some(dense_index)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|i| &self.dense[i])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.dense_index(entity).map(|i| &mut self.dense[i])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    /// Swap-remove; the last element moves into the freed dense slot.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let dense_index = self.dense_index(entity)?;
        let last = self.dense.len() - 1;

        self.dense.swap(dense_index, last);
        self.entities.swap(dense_index, last);
        self.sparse[entity.index()] = None;
        if dense_index != last {
            let moved = self.entities[dense_index];
            self.sparse[moved.index()] = Some(dense_index);
        }

        self.entities.pop();
        self.dense.pop()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.dense
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }
}

impl<T: 'static> Storage for SparseSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }
}
