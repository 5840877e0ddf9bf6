//! List view-model: one shaped reading of the collection plus the
//! optimistic layer.
//!
//! # Design
//! `TodoListView` composes a cached repository, the current query, and the
//! overlay. `toggle` is the full optimistic round-trip: look the record up
//! in the view as currently shaped, echo the flip locally, send the full
//! replace, settle the echo. Lookup happens in the shaped view on purpose:
//! a record hidden by the active filter is not something the caller can
//! see, so toggling it reports `NotFound`.

use crate::cache::CachedRepository;
use crate::error::TodoError;
use crate::overlay::{LocalChange, OptimisticOverlay};
use crate::query::{ListQuery, TodoFilter, TodoSortKey, TodoSortOrder};
use crate::repo::TodoRepository;
use crate::types::Todo;

pub struct TodoListView<R> {
    repo: CachedRepository<R>,
    query: ListQuery,
    overlay: OptimisticOverlay,
}

impl<R: TodoRepository> TodoListView<R> {
    pub fn new(store: R) -> Self {
        TodoListView {
            repo: CachedRepository::new(store),
            query: ListQuery::default(),
            overlay: OptimisticOverlay::new(),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.query.filter = filter;
    }

    pub fn set_sort(&mut self, key: TodoSortKey, order: TodoSortOrder) {
        self.query.sort_key = key;
        self.query.sort_order = order;
    }

    /// The current shaped list with pending local changes projected on top.
    pub async fn todos(&self) -> Result<Vec<Todo>, TodoError> {
        let base = self.repo.list(&self.query).await?;
        Ok(self.overlay.apply(base))
    }

    pub async fn add(&self, title: &str) -> Result<Todo, TodoError> {
        self.repo.create(title).await
    }

    /// Flip a record's done-flag with a local echo while the write is in
    /// flight.
    ///
    /// The echo begins and settles inside this call, which holds the view
    /// exclusively; `todos()` can only run between toggles. The projection
    /// is visible to a renderer that reads the overlay state directly
    /// while the write is pending, not through this method's borrow.
    pub async fn toggle(&mut self, id: &str) -> Result<Todo, TodoError> {
        let target = self
            .todos()
            .await?
            .into_iter()
            .find(|todo| todo.id == id)
            .ok_or_else(|| TodoError::NotFound { id: id.to_string() })?;

        let op = self.overlay.begin(LocalChange::Toggle {
            id: id.to_string(),
        });
        let result = self
            .repo
            .update(id, &target.title, !target.is_done)
            .await;
        self.overlay.settle(op);
        result
    }

    /// Drop every cached reading and fetch the current state.
    pub async fn refresh(&self) -> Result<Vec<Todo>, TodoError> {
        self.repo.invalidate().await;
        self.todos().await
    }
}
