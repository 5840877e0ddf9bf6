//! HTTP surface for the todo service.
//!
//! # Design
//! Handlers are thin: extract, call the shared repository, wrap the outcome
//! in the envelope. The store sits behind `CachedRepository`, so list reads
//! come from the tag cache and every successful write invalidates it in the
//! process that owns the data. Error kinds map to statuses in one place;
//! the body always carries the envelope, so clients read what happened from
//! `isSuccess` rather than from a status-code switch.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use todo_data::{
    ApiResult, CachedRepository, CreateTodo, ListQuery, MemoryRepository, TodoError,
    TodoRepository, UpdateTodo,
};
use tokio::net::TcpListener;

/// Shared handle to the store behind every handler.
#[derive(Clone)]
pub struct AppState {
    todos: Arc<CachedRepository<MemoryRepository>>,
}

pub fn app() -> Router {
    let state = AppState {
        todos: Arc::new(CachedRepository::new(MemoryRepository::new())),
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).patch(update_todo))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match state.todos.list(&query).await {
        Ok(todos) => (StatusCode::OK, Json(ApiResult::success(todos))).into_response(),
        Err(err) => {
            let (status, body) = failure_parts(&err);
            (status, body).into_response()
        }
    }
}

async fn create_todo(State(state): State<AppState>, Json(input): Json<CreateTodo>) -> Response {
    match state.todos.create(&input.title).await {
        Ok(todo) => {
            (StatusCode::CREATED, no_store(), Json(ApiResult::success(todo))).into_response()
        }
        Err(err) => {
            let (status, body) = failure_parts(&err);
            (status, no_store(), body).into_response()
        }
    }
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Response {
    match state.todos.update(&id, &input.title, input.is_done).await {
        Ok(todo) => (StatusCode::OK, no_store(), Json(ApiResult::success(todo))).into_response(),
        Err(err) => {
            let (status, body) = failure_parts(&err);
            (status, no_store(), body).into_response()
        }
    }
}

/// Write responses must not be replayed by any cache along the way.
fn no_store() -> [(header::HeaderName, &'static str); 1] {
    [(header::CACHE_CONTROL, "no-store")]
}

/// Map an error kind to its status. The envelope in the body carries the
/// message clients actually read.
fn failure_parts(err: &TodoError) -> (StatusCode, Json<ApiResult<()>>) {
    let status = match err {
        TodoError::EmptyTitle => StatusCode::BAD_REQUEST,
        TodoError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(%err, "request failed");
    }
    (status, Json(ApiResult::failure(err.to_string())))
}
