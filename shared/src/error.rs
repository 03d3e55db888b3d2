use thiserror::Error;

/// Input that can never be persisted as a todo.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("text must be a string")]
    TextNotString,

    #[error("text must not be empty")]
    TextEmpty,
}

/// Failures seen by the client when talking to the todo API.
///
/// `message` fields carry the server's `{error}` body when there is one, so
/// they can be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    Encode(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
