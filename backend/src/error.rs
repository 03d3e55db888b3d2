use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_shared::{ErrorBody, ValidationError};
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("todo not found")]
    NotFound,

    #[error("failed to {op}")]
    Store {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Tags a store failure with the operation it interrupted, for use with
    /// `map_err`.
    pub fn store(op: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { op, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store { op, source } => {
                error!("Store failure during {op}: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
