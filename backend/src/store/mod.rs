//! Persistence for todo records.
//!
//! Inputs arrive as [`NewTodo`] / [`TodoPatch`], which are already validated,
//! so implementations only deal with identity and durability.

use async_trait::async_trait;
use thiserror::Error;
use todo_shared::{NewTodo, TodoId, TodoItem, TodoPatch};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("corrupt document: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError>;

    async fn create(&self, todo: NewTodo) -> Result<TodoItem, StoreError>;

    /// `Ok(None)` when no record has this id.
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<TodoItem>, StoreError>;

    /// Removes and returns the record, `Ok(None)` when it does not exist.
    async fn delete(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError>;

    /// Removes every record and returns how many there were.
    async fn delete_all(&self) -> Result<usize, StoreError>;
}
