//! Repository over a generic key-value CRUD backend.
//!
//! # Design
//! The backend speaks bare records with an `_id` identity field and no
//! envelope, knows nothing about filtering or sorting, and acknowledges a
//! PUT with an empty 200. List shaping therefore happens in-process, and an
//! empty update acknowledgment is answered with the echo of the payload we
//! just sent: the write succeeded, so the record now holds exactly those
//! fields. `createdAt` order falls back to the backend's insertion order
//! since the wire shape carries no timestamp.

use async_trait::async_trait;

use crate::error::TodoError;
use crate::http::{Payload, RequestConfig};
use crate::query::{ListQuery, TodoSortKey, TodoSortOrder};
use crate::repo::{normalize_title, TodoRepository};
use crate::transport::Transport;
use crate::types::{RemoteTodo, RemoteWrite, Todo};

/// Client of the `_id`-dialect CRUD backend.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    transport: Transport,
    base_url: String,
}

impl RemoteRepository {
    pub fn new(base_url: &str) -> Self {
        RemoteRepository {
            transport: Transport::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

#[async_trait]
impl TodoRepository for RemoteRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let payload = self
            .transport
            .send::<Vec<RemoteTodo>>(&self.collection_url(), RequestConfig::default())
            .await?;
        let todos = match payload {
            Payload::Data(records) => records.into_iter().map(Todo::from).collect(),
            Payload::Empty => Vec::new(),
        };
        Ok(shape_list(todos, query))
    }

    async fn create(&self, title: &str) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let write = RemoteWrite {
            title,
            is_done: false,
        };
        let body =
            serde_json::to_string(&write).map_err(|e| TodoError::Encode(e.to_string()))?;
        let payload = self
            .transport
            .send::<RemoteTodo>(&self.collection_url(), RequestConfig::post(body))
            .await?;
        match payload {
            Payload::Data(record) => Ok(record.into()),
            // Without the backend's id there is nothing to echo.
            Payload::Empty => Err(TodoError::Decode(
                "expected a created record, got an empty body".to_string(),
            )),
        }
    }

    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let write = RemoteWrite {
            title: title.clone(),
            is_done,
        };
        let body =
            serde_json::to_string(&write).map_err(|e| TodoError::Encode(e.to_string()))?;
        let sent = self
            .transport
            .send::<RemoteTodo>(&self.record_url(id), RequestConfig::put(body))
            .await;
        match sent {
            Ok(Payload::Data(record)) => Ok(record.into()),
            Ok(Payload::Empty) => Ok(Todo {
                id: id.to_string(),
                title,
                is_done,
            }),
            Err(TodoError::Http { status: 404, .. }) => Err(TodoError::NotFound {
                id: id.to_string(),
            }),
            Err(err) => Err(err),
        }
    }
}

/// Filter and sort a fetched list. Input order is the backend's insertion
/// order, which stands in for `createdAt`.
fn shape_list(todos: Vec<Todo>, query: &ListQuery) -> Vec<Todo> {
    let mut todos: Vec<Todo> = todos
        .into_iter()
        .filter(|todo| query.filter.matches(todo.is_done))
        .collect();
    match query.sort_key {
        TodoSortKey::Title => {
            todos.sort_by(|a, b| query.sort_order.apply(a.title.cmp(&b.title)));
        }
        TodoSortKey::CreatedAt => {
            if query.sort_order == TodoSortOrder::Desc {
                todos.reverse();
            }
        }
    }
    todos
}
