//! HTTP handlers for the todo collection.
//!
//! Handlers hold no state of their own: they validate, call the store, and
//! translate the result. Bodies are taken as `Result<Json<_>, JsonRejection>`
//! so unreadable JSON is answered with the same `{error}` shape as every
//! other failure.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use todo_shared::{
    BulkDeleteResponse, CreateTodoPayload, NewTodo, TodoId, TodoItem, TodoPatch, UpdateTodoPayload,
};
use tracing::{debug, info};

use crate::{error::AppError, state::AppState};

type ApiResult<T> = Result<T, AppError>;

/// An id that does not parse cannot name a record.
fn parse_id(raw: &str) -> ApiResult<TodoId> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))
}

pub async fn health() -> &'static str {
    "Todo server is running"
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoItem>>> {
    let todos = state.store.list().await.map_err(AppError::store("list todos"))?;
    debug!("Listing {} todos", todos.len());
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TodoItem>)> {
    let todo = NewTodo::from_payload(&payload(body)?)?;
    let created = state.store.create(todo).await.map_err(AppError::store("create todo"))?;

    info!("Created todo {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoPayload>, JsonRejection>,
) -> ApiResult<Json<TodoItem>> {
    let patch = TodoPatch::from_payload(&payload(body)?)?;
    let id = parse_id(&id)?;

    let updated = state
        .store
        .update(id, patch)
        .await
        .map_err(AppError::store("update todo"))?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TodoItem>> {
    let id = parse_id(&id)?;

    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(AppError::store("delete todo"))?
        .ok_or(AppError::NotFound)?;

    info!("Deleted todo {}", deleted.id);
    Ok(Json(deleted))
}

pub async fn delete_all_todos(State(state): State<AppState>) -> ApiResult<Json<BulkDeleteResponse>> {
    let deleted = state
        .store
        .delete_all()
        .await
        .map_err(AppError::store("clear todos"))?;

    info!("Cleared {deleted} todos");
    Ok(Json(BulkDeleteResponse { ok: true, deleted }))
}
