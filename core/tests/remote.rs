//! Tests for the `_id`-dialect repository against a stub backend.
//!
//! # Design
//! The stub reproduces the generic CRUD service's quirks faithfully: bare
//! record arrays with an `_id` identity field, insertion-ordered listing,
//! a created record echoed back on POST, and a deliberately bodyless 200
//! acknowledging a PUT. The repository has to cope with all of them.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use todo_data::{
    ListQuery, RemoteRepository, TodoError, TodoFilter, TodoRepository, TodoSortKey,
    TodoSortOrder,
};

#[derive(Clone, Default)]
struct StubState {
    records: Arc<RwLock<Vec<Value>>>,
}

fn stub_app() -> Router {
    Router::new()
        .route("/todos", get(stub_list).post(stub_create))
        .route("/todos/{id}", put(stub_update))
        .with_state(StubState::default())
}

async fn stub_list(State(state): State<StubState>) -> Json<Vec<Value>> {
    Json(state.records.read().await.clone())
}

async fn stub_create(
    State(state): State<StubState>,
    Json(input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut records = state.records.write().await;
    let record = json!({
        "_id": format!("r{}", records.len() + 1),
        "title": input["title"],
        "isDone": input["isDone"],
    });
    records.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

// The real backend acknowledges a successful PUT with an empty 200.
async fn stub_update(
    State(state): State<StubState>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> StatusCode {
    let mut records = state.records.write().await;
    for record in records.iter_mut() {
        if record["_id"] == id.as_str() {
            record["title"] = input["title"].clone();
            record["isDone"] = input["isDone"].clone();
            return StatusCode::OK;
        }
    }
    StatusCode::NOT_FOUND
}

async fn start_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_app()).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn create_receives_the_backend_identity() {
    let base = start_stub().await;
    let repo = RemoteRepository::new(&base);

    let created = repo.create("  First  ").await.unwrap();
    assert_eq!(created.id, "r1");
    assert_eq!(created.title, "First");
    assert!(!created.is_done);

    let listed = repo.list(&ListQuery::default()).await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn update_reconstructs_the_result_from_an_empty_ack() {
    let base = start_stub().await;
    let repo = RemoteRepository::new(&base);
    let created = repo.create("task").await.unwrap();

    // The backend answers the PUT with a bodyless 200; the repository
    // echoes the payload it just sent as the record's new state.
    let updated = repo.update(&created.id, "  renamed  ", true).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "renamed");
    assert!(updated.is_done);

    // The echo matches what the backend actually stored.
    let listed = repo.list(&ListQuery::default()).await.unwrap();
    assert_eq!(listed, vec![updated]);
}

#[tokio::test]
async fn update_of_an_unknown_id_maps_404_to_not_found() {
    let base = start_stub().await;
    let repo = RemoteRepository::new(&base);

    let err = repo.update("ghost", "title", false).await.unwrap_err();
    assert_eq!(
        err,
        TodoError::NotFound {
            id: "ghost".to_string(),
        }
    );
}

#[tokio::test]
async fn listing_shapes_locally() {
    let base = start_stub().await;
    let repo = RemoteRepository::new(&base);

    for title in ["banana", "apple", "cherry"] {
        repo.create(title).await.unwrap();
    }
    let apple_id = "r2";
    repo.update(apple_id, "apple", true).await.unwrap();

    // newest first by default, from the backend's insertion order
    let ids: Vec<String> = repo
        .list(&ListQuery::default())
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["r3", "r2", "r1"]);

    // the done filter and title sort apply in-process
    let query = ListQuery {
        filter: TodoFilter::Active,
        sort_key: TodoSortKey::Title,
        sort_order: TodoSortOrder::Asc,
    };
    let titles: Vec<String> = repo
        .list(&query)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["banana", "cherry"]);
}

#[tokio::test]
async fn an_empty_list_acknowledgment_reads_as_no_records() {
    // A backend that answers the collection read with a bodyless 200.
    let app = Router::new().route("/todos", get(|| async { StatusCode::OK }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let repo = RemoteRepository::new(&format!("http://{addr}"));
    assert!(repo.list(&ListQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn a_bodyless_create_acknowledgment_is_a_decode_error() {
    // A backend that answers the POST with an empty 201 has kept the
    // record's identity to itself; unlike an update, there is no payload
    // to echo, so the repository reports the missing record instead of
    // inventing one.
    let app = Router::new().route("/todos", post(|| async { StatusCode::CREATED }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let repo = RemoteRepository::new(&format!("http://{addr}"));
    let err = repo.create("task").await.unwrap_err();
    assert!(matches!(err, TodoError::Decode(_)));
    assert!(err.to_string().contains("empty body"));
}

#[tokio::test]
async fn an_unreachable_backend_reports_a_network_fault() {
    // Nothing listens on this port.
    let repo = RemoteRepository::new("http://127.0.0.1:9");
    let err = repo.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, TodoError::Network(_)));
}
