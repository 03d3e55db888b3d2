//! Client-side mirror of the store.
//!
//! Every mutation here takes a record (or id) the server has already
//! confirmed. There is no way to flip `completed` or rewrite `text` locally,
//! so a failed round-trip simply leaves the previous value in place.

use crate::{filter::Filter, TodoId, TodoItem};

#[derive(Debug, Clone, Default)]
pub struct TodoCache {
    items: Vec<TodoItem>,
    ready: bool,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the initial load has resolved, successfully or not.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn visible(&self, filter: Filter) -> Vec<&TodoItem> {
        filter.apply(&self.items)
    }

    pub fn replace_all(&mut self, items: Vec<TodoItem>) {
        self.items = items;
        self.ready = true;
    }

    pub fn insert_confirmed(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    /// Overwrites the cached record with the same id. Returns `false` when
    /// the record is no longer cached, in which case nothing changes.
    pub fn replace_confirmed(&mut self, item: TodoItem) -> bool {
        match self.items.iter_mut().find(|cached| cached.id == item.id) {
            Some(cached) => {
                *cached = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_confirmed(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear_confirmed(&mut self) {
        self.items.clear();
    }
}
