use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_shared::{NewTodo, TodoId, TodoItem, TodoPatch};

use super::{StoreError, TodoStore};

/// Process-local store. Records live as long as the server does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<TodoItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn create(&self, todo: NewTodo) -> Result<TodoItem, StoreError> {
        let item = TodoItem::new(todo);
        self.todos.write().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<TodoItem>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos.iter_mut().find(|todo| todo.id == id).map(|todo| {
            todo.apply(&patch);
            todo.clone()
        }))
    }

    async fn delete(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|todo| todo.id == id)
            .map(|index| todos.remove(index)))
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut todos = self.todos.write().await;
        let deleted = todos.len();
        todos.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn new_todo(text: &str) -> NewTodo {
        NewTodo::new(text, false).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_keeps_order() {
        let store = MemoryStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let b = store.create(new_todo(" b ")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(b.text, "b");
        assert_eq!(store.list().await.unwrap(), [a, b]);
    }

    #[tokio::test]
    async fn update_completed_leaves_text() {
        let store = MemoryStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let updated = store
            .update(a.id, TodoPatch::completion(true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.text, "a");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn update_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let result = store
            .update(Uuid::new_v4(), TodoPatch::completion(true))
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.list().await.unwrap(), [a]);
    }

    #[tokio::test]
    async fn delete_twice_reports_missing() {
        let store = MemoryStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        assert_eq!(store.delete(a.id).await.unwrap(), Some(a.clone()));
        assert_eq!(store.delete(a.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_all_is_idempotent() {
        let store = MemoryStore::new();
        store.create(new_todo("a")).await.unwrap();
        store.create(new_todo("b")).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }
}
