//! World module - authoritative entity/component store
//!
//! Components are grouped by kind, each kind keeping an ordered map from
//! entity to value. Operations on unknown entities or absent components are
//! silent no-ops so a stale id from an earlier frame can never take down the
//! loop.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::trace;

use crate::component::{Component, ComponentKind, ComponentType};
use crate::types::Entity;

/// Entity/component store.
#[derive(Debug, Clone, Default)]
pub struct World {
    alive: BTreeSet<Entity>,
    /// Freed ids, reused last-in first-out.
    free: Vec<Entity>,
    next_id: u32,
    stores: HashMap<ComponentKind, BTreeMap<Entity, Component>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity, reusing the most recently freed id if there is one.
    pub fn create_entity(&mut self) -> Entity {
        let entity = match self.free.pop() {
            Some(entity) => entity,
            None => {
                let entity = Entity::from_raw(self.next_id);
                self.next_id += 1;
                entity
            }
        };
        self.alive.insert(entity);
        entity
    }

    /// Create an entity and attach every given component.
    pub fn spawn<I>(&mut self, components: I) -> Entity
    where
        I: IntoIterator<Item = Component>,
    {
        let entity = self.create_entity();
        for component in components {
            self.add_component(entity, component);
        }
        entity
    }

    /// Destroy an entity and purge all of its components.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if !self.alive.remove(&entity) {
            trace!(%entity, "destroy_entity: unknown entity ignored");
            return;
        }
        for store in self.stores.values_mut() {
            store.remove(&entity);
        }
        self.free.push(entity);
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied()
    }

    /// Attach a component, replacing any existing one of the same kind.
    pub fn add_component(&mut self, entity: Entity, component: impl Into<Component>) {
        if !self.alive.contains(&entity) {
            trace!(%entity, "add_component: unknown entity ignored");
            return;
        }
        let component = component.into();
        self.stores
            .entry(component.kind())
            .or_default()
            .insert(entity, component);
    }

    pub fn remove_component(&mut self, entity: Entity, kind: &ComponentKind) {
        let removed = self
            .stores
            .get_mut(kind)
            .and_then(|store| store.remove(&entity));
        if removed.is_none() {
            trace!(%entity, kind = kind.name(), "remove_component: nothing to remove");
        }
    }

    pub fn get_component(&self, entity: Entity, kind: &ComponentKind) -> Option<&Component> {
        self.stores.get(kind)?.get(&entity)
    }

    pub fn get_component_mut(
        &mut self,
        entity: Entity,
        kind: &ComponentKind,
    ) -> Option<&mut Component> {
        self.stores.get_mut(kind)?.get_mut(&entity)
    }

    pub fn has_component(&self, entity: Entity, kind: &ComponentKind) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|store| store.contains_key(&entity))
    }

    /// Typed read access to a built-in component.
    pub fn get<T: ComponentType>(&self, entity: Entity) -> Option<&T> {
        self.get_component(entity, &T::KIND)
            .and_then(T::from_component)
    }

    /// Typed write access to a built-in component; mutations are visible to
    /// every later reader in the same tick.
    pub fn get_mut<T: ComponentType>(&mut self, entity: Entity) -> Option<&mut T> {
        self.get_component_mut(entity, &T::KIND)
            .and_then(T::from_component_mut)
    }

    /// Typed alias for [`World::add_component`].
    pub fn insert<T: ComponentType>(&mut self, entity: Entity, value: T) {
        self.add_component(entity, value);
    }

    /// All live entities holding every one of `kinds`.
    ///
    /// An empty `kinds` slice matches every live entity. Results come back in
    /// ascending id order.
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        if kinds.is_empty() {
            return self.alive.iter().copied().collect();
        }

        let mut stores = Vec::with_capacity(kinds.len());
        for kind in kinds {
            match self.stores.get(kind) {
                Some(store) => stores.push(store),
                None => return Vec::new(),
            }
        }

        // Drive the scan from the smallest store.
        stores.sort_by_key(|store| store.len());
        let Some((smallest, rest)) = stores.split_first() else {
            return Vec::new();
        };

        smallest
            .keys()
            .copied()
            .filter(|entity| rest.iter().all(|store| store.contains_key(entity)))
            .collect()
    }

    /// Destroy every entity and reset the id allocator.
    pub fn clear(&mut self) {
        self.alive.clear();
        self.free.clear();
        self.stores.clear();
        self.next_id = 0;
    }
}
