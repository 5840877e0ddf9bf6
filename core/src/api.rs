//! Repository over the envelope-speaking todo service.
//!
//! # Design
//! The service shapes lists itself, so the query travels as URL parameters
//! and the response arrives wrapped in `ApiResult`. Validation runs locally
//! before any request: a blank title never reaches the wire. A 404 on
//! update is translated back into `NotFound { id }` here, because the
//! transport reports bare statuses without reading their bodies.

use async_trait::async_trait;

use crate::envelope::ApiResult;
use crate::error::TodoError;
use crate::http::{Payload, RequestConfig};
use crate::query::ListQuery;
use crate::repo::{normalize_title, TodoRepository};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Client of the todo service's HTTP surface.
#[derive(Debug, Clone)]
pub struct TodoApi {
    transport: Transport,
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        TodoApi {
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
impl TodoRepository for TodoApi {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let url = format!("{}?{}", self.collection_url(), query.query_string());
        let payload = self
            .transport
            .send::<ApiResult<Vec<Todo>>>(&url, RequestConfig::default())
            .await?;
        match payload {
            Payload::Data(envelope) => envelope.into_result(),
            Payload::Empty => Ok(Vec::new()),
        }
    }

    async fn create(&self, title: &str) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let body = serde_json::to_string(&CreateTodo { title })
            .map_err(|e| TodoError::Encode(e.to_string()))?;
        let payload = self
            .transport
            .send::<ApiResult<Todo>>(&self.collection_url(), RequestConfig::post(body))
            .await?;
        match payload {
            Payload::Data(envelope) => envelope.into_result(),
            Payload::Empty => Err(TodoError::Decode(
                "expected a created record, got an empty body".to_string(),
            )),
        }
    }

    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let update = UpdateTodo {
            title: title.clone(),
            is_done,
        };
        let body =
            serde_json::to_string(&update).map_err(|e| TodoError::Encode(e.to_string()))?;
        let sent = self
            .transport
            .send::<ApiResult<Todo>>(&self.record_url(id), RequestConfig::put(body))
            .await;
        match sent {
            Ok(Payload::Data(envelope)) => envelope.into_result(),
            // An empty acknowledgment still means the write landed; echo
            // the payload we sent as the record's new state.
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
