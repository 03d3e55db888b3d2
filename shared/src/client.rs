//! Request builder and response parser for the todo API.
//!
//! `TodoClient` holds only the base URL. Each operation is split into a
//! `build_*` method producing an [`HttpRequest`] and a `parse_*` method
//! consuming the matching [`HttpResponse`].

use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    http::{HttpMethod, HttpRequest, HttpResponse},
    payload::{BulkDeleteResponse, ErrorBody},
    validate::{NewTodo, TodoPatch},
    TodoId, TodoItem,
};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos", None)
    }

    pub fn build_create(&self, todo: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(todo).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/todos", Some(body)))
    }

    pub fn build_update(&self, id: TodoId, patch: &TodoPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(patch).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(self.request(HttpMethod::Patch, &format!("/todos/{id}"), Some(body)))
    }

    pub fn build_delete(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todos/{id}"), None)
    }

    pub fn build_delete_all(&self) -> HttpRequest {
        self.request(HttpMethod::Delete, "/todos", None)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        decode(response, 200)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        decode(response, 201)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        decode(response, 200)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        decode(response, 200)
    }

    /// Returns how many records the server removed.
    pub fn parse_delete_all(&self, response: HttpResponse) -> Result<usize, ApiError> {
        let body: BulkDeleteResponse = decode(response, 200)?;
        if !body.ok {
            return Err(ApiError::Decode("bulk delete not acknowledged".to_string()));
        }
        Ok(body.deleted)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map an unexpected status onto an `ApiError`, preferring the server's
/// `{error}` message over a bare status line.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("HTTP {}", response.status));
    Err(match response.status {
        404 => ApiError::NotFound(message),
        status @ 400..=499 => ApiError::Rejected { status, message },
        status => ApiError::Server { status, message },
    })
}
