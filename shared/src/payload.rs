//! JSON bodies exchanged over the wire.
//!
//! Request payloads are deliberately loose (`serde_json::Value` fields) so
//! that a body with a wrongly typed field still deserializes and is then
//! rejected by validation with a readable message instead of a parser error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A JSON object key that is either missing or present with some value,
/// `null` included.
///
/// Use with `#[serde(default)]`: a missing key falls back to `Absent`, any
/// present value (even `null`) becomes `Present`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Present(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Field::Present)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoPayload {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoPayload {
    #[serde(default)]
    pub text: Field<Value>,
    #[serde(default)]
    pub completed: Field<Value>,
}

/// Body of a successful `DELETE /todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub ok: bool,
    #[serde(default)]
    pub deleted: usize,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
