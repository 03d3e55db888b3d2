use async_trait::async_trait;
use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use backend::{
    router,
    state::AppState,
    store::{MemoryStore, StoreError, TodoStore},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_shared::{NewTodo, TodoId, TodoItem, TodoPatch};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(MemoryStore::new()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, body: &str) -> TodoItem {
    let resp = send(app, json_request("POST", "/todos", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

async fn list(app: &Router) -> Vec<TodoItem> {
    let resp = send(app, empty_request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    assert!(list(&app()).await.is_empty());
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let app = app();
    let a = create(&app, r#"{"text":"a"}"#).await;
    let b = create(&app, r#"{"text":"b"}"#).await;
    let c = create(&app, r#"{"text":"c"}"#).await;
    assert_eq!(list(&app).await, [a, b, c]);
}

// --- create ---

#[tokio::test]
async fn create_trims_and_defaults_completed() {
    let app = app();
    let todo = create(&app, r#"{"text":"  buy milk  "}"#).await;
    assert_eq!(todo.text, "buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_coerces_completed() {
    let app = app();
    assert!(create(&app, r#"{"text":"a","completed":"yes"}"#).await.completed);
    assert!(create(&app, r#"{"text":"b","completed":1}"#).await.completed);
    assert!(!create(&app, r#"{"text":"c","completed":null}"#).await.completed);
    assert!(!create(&app, r#"{"text":"d","completed":""}"#).await.completed);
}

#[tokio::test]
async fn create_blank_text_is_rejected_and_not_persisted() {
    let app = app();
    for body in [r#"{"text":""}"#, r#"{"text":"   "}"#] {
        let resp = send(&app, json_request("POST", "/todos", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(resp).await;
        assert_eq!(body, json!({"error": "text must not be empty"}));
    }
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn create_non_string_text_is_rejected() {
    let app = app();
    for body in [r#"{"text":42}"#, r#"{"completed":true}"#, r#"{"text":null}"#] {
        let resp = send(&app, json_request("POST", "/todos", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(resp).await;
        assert_eq!(body["error"], "text must be a string");
    }
}

#[tokio::test]
async fn create_malformed_json_returns_400_with_error_body() {
    let resp = send(&app(), json_request("POST", "/todos", "{not json")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Malformed payload"));
}

// --- update ---

#[tokio::test]
async fn patch_completed_leaves_text() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog"}"#).await;

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{}", todo.id), r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: TodoItem = body_json(resp).await;
    assert_eq!(updated.id, todo.id);
    assert_eq!(updated.text, "walk dog");
    assert!(updated.completed);
}

#[tokio::test]
async fn patch_text_is_trimmed_and_keeps_completed() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog","completed":true}"#).await;

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{}", todo.id), r#"{"text":" walk cat "}"#),
    )
    .await;
    let updated: TodoItem = body_json(resp).await;
    assert_eq!(updated.text, "walk cat");
    assert!(updated.completed);
}

#[tokio::test]
async fn patch_blank_or_null_text_is_rejected() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog"}"#).await;

    for body in [r#"{"text":"  "}"#, r#"{"text":null}"#] {
        let resp = send(
            &app,
            json_request("PATCH", &format!("/todos/{}", todo.id), body),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(list(&app).await, [todo]);
}

#[tokio::test]
async fn patch_unknown_id_returns_404_and_changes_nothing() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog"}"#).await;

    let resp = send(
        &app,
        json_request(
            "PATCH",
            "/todos/00000000-0000-0000-0000-000000000000",
            r#"{"completed":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "todo not found"}));
    assert_eq!(list(&app).await, [todo]);
}

#[tokio::test]
async fn patch_malformed_id_returns_404() {
    let resp = send(
        &app(),
        json_request("PATCH", "/todos/not-a-uuid", r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_malformed_id_returns_404_and_changes_nothing() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog"}"#).await;

    let resp = send(&app, empty_request("DELETE", "/todos/not-a-uuid")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "todo not found"}));
    assert_eq!(list(&app).await, [todo]);
}

#[tokio::test]
async fn delete_returns_record_then_404() {
    let app = app();
    let todo = create(&app, r#"{"text":"walk dog"}"#).await;
    let uri = format!("/todos/{}", todo.id);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: TodoItem = body_json(resp).await;
    assert_eq!(deleted, todo);
    assert!(list(&app).await.is_empty());

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_all_reports_count_and_is_idempotent() {
    let app = app();
    create(&app, r#"{"text":"a"}"#).await;
    create(&app, r#"{"text":"b"}"#).await;

    let resp = send(&app, empty_request("DELETE", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"ok": true, "deleted": 2}));
    assert!(list(&app).await.is_empty());

    let resp = send(&app, empty_request("DELETE", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"ok": true, "deleted": 0}));
}

// --- misc ---

#[tokio::test]
async fn health_answers_plain_text() {
    let resp = send(&app(), empty_request("GET", "/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- store failures ---

struct UnavailableStore;

#[async_trait]
impl TodoStore for UnavailableStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create(&self, _todo: NewTodo) -> Result<TodoItem, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _id: TodoId, _patch: TodoPatch) -> Result<Option<TodoItem>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn store_failures_return_500_with_short_message() {
    let app = router(AppState::new(UnavailableStore));
    let id = "00000000-0000-0000-0000-000000000000";

    let cases = [
        (empty_request("GET", "/todos"), "failed to list todos"),
        (
            json_request("POST", "/todos", r#"{"text":"a"}"#),
            "failed to create todo",
        ),
        (
            json_request("PATCH", &format!("/todos/{id}"), r#"{"completed":true}"#),
            "failed to update todo",
        ),
        (
            empty_request("DELETE", &format!("/todos/{id}")),
            "failed to delete todo",
        ),
        (empty_request("DELETE", "/todos"), "failed to clear todos"),
    ];

    for (request, message) in cases {
        let resp = send(&app, request).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = body_json(resp).await;
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn validation_happens_before_the_store() {
    let app = router(AppState::new(UnavailableStore));
    let resp = send(&app, json_request("POST", "/todos", r#"{"text":" "}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn buy_milk_lifecycle() {
    let app = app();

    let resp = send(&app, json_request("POST", "/todos", r#"{"text":"buy milk"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created["text"], "buy milk");
    assert_eq!(created["completed"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{id}"), r#"{"completed":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["completed"], true);

    let resp = send(&app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Value = body_json(resp).await;
    assert_eq!(deleted, updated);

    let remaining = list(&app).await;
    assert!(remaining.iter().all(|todo| todo.id.to_string() != id));
}
