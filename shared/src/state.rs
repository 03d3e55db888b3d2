//! The state container owned by the top-level view.
//!
//! User intents go in through [`TodoState::dispatch`] and come out as
//! [`SyncCommand`]s for the host to execute. The host feeds each result back
//! through [`TodoState::apply`], which is the only path that changes the
//! cached records. Deletions are two-phase: `dispatch` records a pending
//! [`Confirmation`] and nothing is sent until [`TodoState::confirm`].

use crate::{
    cache::TodoCache,
    error::{ApiError, ValidationError},
    filter::Filter,
    validate::{NewTodo, TodoPatch},
    TodoId, TodoItem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(TodoId),
    Edit { id: TodoId, text: String },
    Delete(TodoId),
    DeleteAll,
}

/// A request the host must send to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    Load,
    Create(NewTodo),
    Update(TodoId, TodoPatch),
    Delete(TodoId),
    DeleteAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteOne(TodoId),
    DeleteAll,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteOne(_) => "Delete this todo?",
            Confirmation::DeleteAll => "Delete every todo?",
        }
    }

    fn into_command(self) -> SyncCommand {
        match self {
            Confirmation::DeleteOne(id) => SyncCommand::Delete(id),
            Confirmation::DeleteAll => SyncCommand::DeleteAll,
        }
    }
}

/// What the server said about a [`SyncCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Loaded(Result<Vec<TodoItem>, ApiError>),
    Created(Result<TodoItem, ApiError>),
    Updated(Result<TodoItem, ApiError>),
    Deleted(Result<TodoItem, ApiError>),
    Cleared(Result<usize, ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    cache: TodoCache,
    filter: Filter,
    pending: Option<Confirmation>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &TodoCache {
        &self.cache
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&TodoItem> {
        self.cache.visible(self.filter)
    }

    pub fn pending(&self) -> Option<Confirmation> {
        self.pending
    }

    /// Turns a user intent into the command to send, if any.
    ///
    /// Toggles read the cached value and ask the server for its negation;
    /// the cache itself is left alone until the server answers.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<SyncCommand>, ValidationError> {
        let command = match intent {
            Intent::Add(text) => Some(SyncCommand::Create(NewTodo::new(&text, false)?)),
            Intent::Toggle(id) => self
                .cache
                .get(id)
                .map(|item| SyncCommand::Update(id, TodoPatch::completion(!item.completed))),
            Intent::Edit { id, text } => {
                let patch = TodoPatch::new(Some(&text), None)?;
                match self.cache.get(id) {
                    Some(item) if Some(item.text.as_str()) == patch.text() => None,
                    Some(_) => Some(SyncCommand::Update(id, patch)),
                    None => None,
                }
            }
            Intent::Delete(id) => {
                if self.cache.get(id).is_some() {
                    self.pending = Some(Confirmation::DeleteOne(id));
                }
                None
            }
            Intent::DeleteAll => {
                if !self.cache.is_empty() {
                    self.pending = Some(Confirmation::DeleteAll);
                }
                None
            }
        };
        Ok(command)
    }

    /// Releases the pending deletion, if there is one.
    pub fn confirm(&mut self) -> Option<SyncCommand> {
        self.pending.take().map(Confirmation::into_command)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Folds a server result into the cache and returns what to tell the user.
    pub fn apply(&mut self, outcome: SyncOutcome) -> Option<Notice> {
        match outcome {
            SyncOutcome::Loaded(Ok(items)) => {
                self.cache.replace_all(items);
                None
            }
            SyncOutcome::Loaded(Err(e)) => {
                self.cache.mark_ready();
                Some(Notice::error(format!("Failed to load todos: {e}")))
            }
            SyncOutcome::Created(Ok(item)) => {
                self.cache.insert_confirmed(item);
                Some(Notice::success("Todo added"))
            }
            SyncOutcome::Created(Err(e)) => Some(Notice::error(format!("Failed to add todo: {e}"))),
            SyncOutcome::Updated(Ok(item)) => {
                self.cache.replace_confirmed(item);
                None
            }
            SyncOutcome::Updated(Err(e)) => {
                Some(Notice::error(format!("Failed to update todo: {e}")))
            }
            SyncOutcome::Deleted(Ok(item)) => {
                self.cache.remove_confirmed(item.id);
                Some(Notice::success("Todo deleted"))
            }
            SyncOutcome::Deleted(Err(e)) => {
                Some(Notice::error(format!("Failed to delete todo: {e}")))
            }
            SyncOutcome::Cleared(Ok(_)) => {
                self.cache.clear_confirmed();
                Some(Notice::success("All todos cleared"))
            }
            SyncOutcome::Cleared(Err(e)) => {
                Some(Notice::error(format!("Failed to clear todos: {e}")))
            }
        }
    }
}
