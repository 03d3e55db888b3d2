//! Input normalization for todo records.
//!
//! `NewTodo` and `TodoPatch` can only be built through their validating
//! constructors, so anything that reaches a store already satisfies the
//! record invariants: `text` is trimmed and non-empty, `completed` is a
//! plain boolean.

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ValidationError,
    payload::{CreateTodoPayload, Field, UpdateTodoPayload},
};

/// Maps an arbitrary JSON value onto a boolean.
///
/// | value             | result                         |
/// |-------------------|--------------------------------|
/// | `null`            | `false`                        |
/// | `true` / `false`  | itself                         |
/// | number            | `false` for `0`, else `true`   |
/// | string            | `false` for `""`, else `true`  |
/// | array / object    | `true`, even when empty        |
///
/// A string is never parsed, so `"false"` coerces to `true`.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the trimmed text, or why it cannot be stored.
pub fn normalize_text(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => trimmed(s),
        _ => Err(ValidationError::TextNotString),
    }
}

fn trimmed(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::TextEmpty);
    }
    Ok(text.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    text: String,
    completed: bool,
}

impl NewTodo {
    pub fn new(text: &str, completed: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            text: trimmed(text)?,
            completed,
        })
    }

    pub fn from_payload(payload: &CreateTodoPayload) -> Result<Self, ValidationError> {
        let text = match &payload.text {
            Some(value) => normalize_text(value)?,
            None => return Err(ValidationError::TextNotString),
        };
        let completed = payload.completed.as_ref().is_some_and(coerce_bool);
        Ok(Self { text, completed })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

/// A partial update. `None` leaves the stored field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl TodoPatch {
    pub fn new(text: Option<&str>, completed: Option<bool>) -> Result<Self, ValidationError> {
        Ok(Self {
            text: text.map(trimmed).transpose()?,
            completed,
        })
    }

    /// A patch that only sets `completed`.
    pub fn completion(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// An explicit `"text": null` is rejected while an explicit
    /// `"completed": null` coerces to `false`.
    pub fn from_payload(payload: &UpdateTodoPayload) -> Result<Self, ValidationError> {
        let text = match &payload.text {
            Field::Present(value) => Some(normalize_text(value)?),
            Field::Absent => None,
        };
        let completed = match &payload.completed {
            Field::Present(value) => Some(coerce_bool(value)),
            Field::Absent => None,
        };
        Ok(Self { text, completed })
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}
