//! Types and client-side logic shared by the todo backend and frontend.
//!
//! Nothing in this crate performs I/O. The backend uses the model, payloads
//! and validation; the frontend additionally drives [`TodoState`] and
//! executes the requests built by [`TodoClient`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod cache;
pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod payload;
pub mod state;
pub mod validate;

pub use cache::TodoCache;
pub use client::TodoClient;
pub use error::{ApiError, ValidationError};
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use payload::{BulkDeleteResponse, CreateTodoPayload, ErrorBody, Field, UpdateTodoPayload};
pub use state::{Confirmation, Intent, Notice, NoticeLevel, SyncCommand, SyncOutcome, TodoState};
pub use validate::{coerce_bool, normalize_text, NewTodo, TodoPatch};

pub type TodoId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    pub fn new(todo: NewTodo) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: todo.text().to_string(),
            completed: todo.completed(),
        }
    }

    /// Applies the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(text) = patch.text() {
            self.text = text.to_string();
        }
        if let Some(completed) = patch.completed() {
            self.completed = completed;
        }
    }
}
