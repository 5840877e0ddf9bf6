//! End-to-end tests against the live todo server.
//!
//! # Design
//! Each test boots the real server on an ephemeral port inside the test
//! runtime and talks to it over actual HTTP, so the envelope, the query
//! parameters, and the transport's normalization rules are exercised
//! against the surface clients really see.

use todo_data::{
    ApiResult, CachedRepository, ListQuery, RequestConfig, Todo, TodoApi, TodoError, TodoFilter,
    TodoListView, TodoRepository, TodoSortKey, TodoSortOrder, Transport,
};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        todo_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn envelope_lifecycle() {
    let base = start_server().await;
    let api = TodoApi::new(&base);

    // list starts empty
    let todos = api.list(&ListQuery::default()).await.unwrap();
    assert!(todos.is_empty());

    // create, with trimming applied server-side
    let created = api.create("  Integration test  ").await.unwrap();
    assert_eq!(created.title, "Integration test");
    assert!(!created.is_done);

    // the write is visible to the read that follows it
    let todos = api.list(&ListQuery::default()).await.unwrap();
    assert_eq!(todos, vec![created.clone()]);

    // full replace
    let updated = api.update(&created.id, "Renamed", true).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert!(updated.is_done);

    // shaping runs server-side from the query parameters
    let completed = ListQuery {
        filter: TodoFilter::Completed,
        ..ListQuery::default()
    };
    assert_eq!(api.list(&completed).await.unwrap(), vec![updated]);
    let active = ListQuery {
        filter: TodoFilter::Active,
        ..ListQuery::default()
    };
    assert!(api.list(&active).await.unwrap().is_empty());

    // a 404 comes back as the typed not-found kind, message naming the id
    let err = api.update("missing-id", "Nope", false).await.unwrap_err();
    assert_eq!(
        err,
        TodoError::NotFound {
            id: "missing-id".to_string(),
        }
    );
    assert!(err.to_string().contains("missing-id"));
}

#[tokio::test]
async fn server_side_sorting_follows_the_query() {
    let base = start_server().await;
    let api = TodoApi::new(&base);

    for title in ["banana", "apple", "cherry"] {
        api.create(title).await.unwrap();
    }

    let by_title = ListQuery {
        sort_key: TodoSortKey::Title,
        sort_order: TodoSortOrder::Asc,
        ..ListQuery::default()
    };
    let titles: Vec<String> = api
        .list(&by_title)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["apple", "banana", "cherry"]);

    // default: newest first
    let titles: Vec<String> = api
        .list(&ListQuery::default())
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["cherry", "apple", "banana"]);
}

#[tokio::test]
async fn a_blank_title_sent_raw_is_rejected_with_400() {
    let base = start_server().await;

    // Bypass the repository's local validation by driving the transport
    // directly; the server still refuses the write.
    let transport = Transport::new();
    let err = transport
        .send::<ApiResult<Todo>>(
            &format!("{base}/todos"),
            RequestConfig::post(r#"{"title":"   "}"#.to_string()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Http { status: 400, .. }));
}

#[tokio::test]
async fn write_responses_carry_no_store() {
    let base = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/todos"))
        .header("content-type", "application/json")
        .body(r#"{"title":"check headers"}"#)
        .send()
        .await
        .unwrap();
    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|value| value.to_str().ok());
    assert_eq!(cache_control, Some("no-store"));
}

#[tokio::test]
async fn client_side_cache_follows_writes_through_the_wire() {
    let base = start_server().await;
    let repo = CachedRepository::new(TodoApi::new(&base));
    let query = ListQuery::default();

    assert!(repo.list(&query).await.unwrap().is_empty());

    let created = repo.create("cached").await.unwrap();
    // the successful write invalidated the local reading as well
    assert_eq!(repo.list(&query).await.unwrap(), vec![created]);
}

#[tokio::test]
async fn view_toggle_round_trips_over_http() {
    let base = start_server().await;
    let mut view = TodoListView::new(TodoApi::new(&base));

    let added = view.add("toggle me").await.unwrap();
    let toggled = view.toggle(&added.id).await.unwrap();
    assert!(toggled.is_done);

    let todos = view.todos().await.unwrap();
    assert_eq!(todos, vec![toggled]);
}
