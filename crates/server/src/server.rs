//! HTTP layer for the task API.
//!
//! Four routes under `/api/tasks` mapping 1:1 onto [`TaskStore`] operations,
//! plus a health endpoint. CORS is deliberately wide open: this is a demo
//! service with no authentication surface.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{StoreError, TaskStore};
use tasklite_model::{Task, TaskDraft};

/// Shared application state.
///
/// The store is guarded by a single `RwLock` so concurrent requests take
/// turns mutating it; each handler holds the lock for exactly one store
/// operation.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<TaskStore>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the HTTP router for the task service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        // Health check
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "tasklite-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /api/tasks`: every task, insertion order.
async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.store.read().await;
    let tasks = store.list();
    debug!(count = tasks.len(), "listing tasks");
    Json(tasks)
}

/// `POST /api/tasks`: create a task, answering 201 with the created record
/// and a `Location` header naming it.
async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> impl IntoResponse {
    let task = state.store.write().await.create(draft);
    info!(task_id = %task.id, "task created");

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/tasks/{}", task.id))],
        Json(task),
    )
}

/// `PUT /api/tasks/{id}`: overwrite description and completion flag.
///
/// A malformed id never reaches this handler; the `Path<Uuid>` extractor
/// rejects it first.
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TaskDraft>,
) -> Result<StatusCode, StatusCode> {
    match state.store.write().await.update(id, draft) {
        Ok(()) => {
            info!(task_id = %id, "task updated");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}

/// `DELETE /api/tasks/{id}`: remove a task.
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    match state.store.write().await.remove(id) {
        Ok(()) => {
            info!(task_id = %id, "task deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}
