//! The repository seam: one trait over swappable backing stores.
//!
//! # Design
//! Every store implements the same three operations, so the cache decorator
//! and the view layer work against `dyn`-friendly trait objects and never
//! know which backend they are talking to. None of the operations retries;
//! all of them are safe for the caller to retry.

use async_trait::async_trait;

use crate::error::TodoError;
use crate::query::ListQuery;
use crate::types::Todo;

/// Data access for the todo collection.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Shaped read: filter by done-flag, then sort. Returns the whole
    /// matching set or an error, never a partial list.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError>;

    /// Store a new record with a fresh id and an unset done-flag, returning
    /// it as stored.
    async fn create(&self, title: &str) -> Result<Todo, TodoError>;

    /// Replace title and done-flag of an existing record wholesale,
    /// returning it exactly as written.
    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError>;
}

/// Shared handles delegate, so one store can sit behind several consumers.
#[async_trait]
impl<R: TodoRepository + ?Sized> TodoRepository for std::sync::Arc<R> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        (**self).list(query).await
    }

    async fn create(&self, title: &str) -> Result<Todo, TodoError> {
        (**self).create(title).await
    }

    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError> {
        (**self).update(id, title, is_done).await
    }
}

/// Trim a title for storage. A title that trims to nothing is rejected
/// before any write happens; no store ever holds an empty title.
pub(crate) fn normalize_title(title: &str) -> Result<String, TodoError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
