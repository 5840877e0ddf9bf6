//! In-memory backing store.
//!
//! # Design
//! A `tokio::sync::RwLock` over a map, the store every test and demo runs
//! against. Each record carries a private creation stamp that backs the
//! `createdAt` sort key; the stamp never leaves this module. Seeded records
//! are stamped slightly in the past, in vector order, so anything created
//! afterwards sorts as newer.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TodoError;
use crate::query::{ListQuery, TodoSortKey};
use crate::repo::{normalize_title, TodoRepository};
use crate::types::Todo;

struct StoredTodo {
    todo: Todo,
    created_at: DateTime<Utc>,
}

/// Map-backed store assigning UUID ids.
#[derive(Default)]
pub struct MemoryRepository {
    records: RwLock<HashMap<String, StoredTodo>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    /// Start from fixed records, stamped oldest-first in vector order.
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let now = Utc::now();
        let count = todos.len() as i64;
        let records = todos
            .into_iter()
            .enumerate()
            .map(|(index, todo)| {
                let created_at = now - Duration::seconds(count - index as i64);
                (todo.id.clone(), StoredTodo { todo, created_at })
            })
            .collect();
        MemoryRepository {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl TodoRepository for MemoryRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let records = self.records.read().await;
        let mut matches: Vec<&StoredTodo> = records
            .values()
            .filter(|stored| query.filter.matches(stored.todo.is_done))
            .collect();
        matches.sort_by(|a, b| {
            let ordering = match query.sort_key {
                TodoSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                // Title ties break by age so equal titles keep a fixed order.
                TodoSortKey::Title => a
                    .todo
                    .title
                    .cmp(&b.todo.title)
                    .then(a.created_at.cmp(&b.created_at)),
            };
            query.sort_order.apply(ordering)
        });
        Ok(matches.into_iter().map(|stored| stored.todo.clone()).collect())
    }

    async fn create(&self, title: &str) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title,
            is_done: false,
        };
        let mut records = self.records.write().await;
        records.insert(
            todo.id.clone(),
            StoredTodo {
                todo: todo.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(todo)
    }

    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError> {
        let title = normalize_title(title)?;
        let mut records = self.records.write().await;
        let stored = records.get_mut(id).ok_or_else(|| TodoError::NotFound {
            id: id.to_string(),
        })?;
        stored.todo.title = title;
        stored.todo.is_done = is_done;
        Ok(stored.todo.clone())
    }
}
