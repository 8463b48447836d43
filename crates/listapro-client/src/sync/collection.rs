//! Optimistic Collection
//!
//! Local cache of server entities plus the sync state of each one.
//! Absent ids are `Synced`.

use std::collections::HashMap;

use super::state::{SyncEvent, SyncState};
use crate::domain::Entity;

/// Items plus loading flag, handed to observers
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimisticCollection<T: Entity> {
    items: Vec<T>,
    states: HashMap<T::Id, SyncState>,
    loading: bool,
}

impl<T: Entity> OptimisticCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            states: HashMap::new(),
            loading: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn state(&self, id: T::Id) -> SyncState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// No entity has an unsettled mutation or pending revert
    pub fn is_settled(&self) -> bool {
        self.states.values().all(SyncState::is_synced)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Optimistically mutate an item. Returns `false` if it is not held locally.
    pub fn apply<F>(&mut self, id: T::Id, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        f(item);
        self.transition(id, SyncEvent::Mutate);
        true
    }

    /// Optimistically remove an item. The id is tracked even if it was absent,
    /// since the delete request goes out either way.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let removed = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .map(|index| self.items.remove(index));
        self.transition(id, SyncEvent::Mutate);
        removed
    }

    pub fn confirm(&mut self, id: T::Id) {
        self.transition(id, SyncEvent::Confirm);
    }

    pub fn reject(&mut self, id: T::Id) {
        self.transition(id, SyncEvent::Reject);
    }

    /// Append a record the server just created
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the cache with the authoritative collection
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.states.clear();
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        CollectionSnapshot {
            items: self.items.clone(),
            loading: self.loading,
        }
    }

    fn transition(&mut self, id: T::Id, event: SyncEvent) {
        let next = self.state(id).on(event);
        if next.is_synced() {
            self.states.remove(&id);
        } else {
            self.states.insert(id, next);
        }
    }
}

impl<T: Entity> Default for OptimisticCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
