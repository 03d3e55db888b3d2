//! Todo API server.
//!
//! Exposes the todo collection over HTTP and keeps it in a document store
//! (Redis in production, memory for tests and local runs).
//!
//! | Method | Path         | Success                      |
//! |--------|--------------|------------------------------|
//! | GET    | /todos       | 200, every todo              |
//! | POST   | /todos       | 201, created todo            |
//! | DELETE | /todos       | 200, `{ok: true, deleted}`   |
//! | PATCH  | /todos/:id   | 200, updated todo            |
//! | DELETE | /todos/:id   | 200, deleted todo            |
//! | GET    | /health      | 200, plain text              |
//!
//! Failures answer with `{error}`: 400 for bad input, 404 for unknown ids,
//! 500 when the store fails.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use routes::{create_todo, delete_all_todos, delete_todo, health, list_todos, update_todo};
use state::AppState;

/// The API routes alone, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route("/todos/:id", patch(update_todo).delete(delete_todo))
        .with_state(state)
}

pub fn app(state: AppState, config: &Config) -> Router {
    let mut app = router(state);

    if let Some(dir) = &config.static_dir {
        info!("Serving frontend from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).layer(cors_layer(config))
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.frontend_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60)),
        None => CorsLayer::permissive(),
    }
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Initializing state...");
    let state = AppState::from_config(&config).await?;

    let app = app(state, &config);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
