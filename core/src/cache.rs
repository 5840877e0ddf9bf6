//! Tag-scoped list cache and the invalidate-on-write decorator.
//!
//! # Design
//! Mutation protocol: a write that fails never touches the cache; a write
//! that succeeds invalidates the `todos` tag before returning, so every
//! read issued after the write returns sees the new state. Reads serve
//! cached list variants keyed by their query string and refetch on miss.
//!
//! Invalidation is mark-stale-and-refetch. Each tag carries a generation
//! counter; a miss hands the caller the generation it observed, and a fill
//! stamped with an older generation is discarded. That fences the race
//! where a slow read computes a value, an invalidation lands, and the stale
//! value would otherwise overwrite fresh state. Bumping the counter and
//! dropping the tag's entries happen under one write lock, so no reader
//! observes a half-applied invalidation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::TodoError;
use crate::query::ListQuery;
use crate::repo::TodoRepository;
use crate::types::Todo;

/// Tag every cached list variant lives under.
pub const TODOS_TAG: &str = "todos";

/// Outcome of a cache probe. A miss carries the generation the caller must
/// stamp its fill with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    Hit(V),
    Miss(u64),
}

#[derive(Default)]
struct Inner<V> {
    generations: HashMap<String, u64>,
    entries: HashMap<(String, String), V>,
}

/// Generation-fenced cache keyed by (tag, variant key).
pub struct TagCache<V> {
    inner: RwLock<Inner<V>>,
}

impl<V: Clone> TagCache<V> {
    pub fn new() -> Self {
        TagCache {
            inner: RwLock::new(Inner {
                generations: HashMap::new(),
                entries: HashMap::new(),
            }),
        }
    }

    pub async fn lookup(&self, tag: &str, key: &str) -> Lookup<V> {
        let inner = self.inner.read().await;
        let generation = inner.generations.get(tag).copied().unwrap_or(0);
        match inner.entries.get(&(tag.to_string(), key.to_string())) {
            Some(value) => Lookup::Hit(value.clone()),
            None => Lookup::Miss(generation),
        }
    }

    /// Store a value computed for `generation`. Discarded if the tag has
    /// been invalidated since the caller observed that generation.
    pub async fn fill(&self, tag: &str, key: &str, generation: u64, value: V) {
        let mut inner = self.inner.write().await;
        let current = inner.generations.get(tag).copied().unwrap_or(0);
        if generation == current {
            inner
                .entries
                .insert((tag.to_string(), key.to_string()), value);
        }
    }

    /// Mark the tag stale: bump its generation and drop its entries in one
    /// critical section.
    pub async fn invalidate(&self, tag: &str) {
        let mut inner = self.inner.write().await;
        *inner.generations.entry(tag.to_string()).or_insert(0) += 1;
        inner.entries.retain(|(entry_tag, _), _| entry_tag != tag);
        tracing::debug!(tag, "cache invalidated");
    }
}

impl<V: Clone> Default for TagCache<V> {
    fn default() -> Self {
        TagCache::new()
    }
}

/// Repository decorator caching list reads and invalidating on successful
/// writes. Wraps any store; the view layer and the server both run on it.
pub struct CachedRepository<R> {
    inner: R,
    cache: TagCache<Vec<Todo>>,
}

impl<R: TodoRepository> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        CachedRepository {
            inner,
            cache: TagCache::new(),
        }
    }

    /// Drop every cached list variant; the next read refetches.
    pub async fn invalidate(&self) {
        self.cache.invalidate(TODOS_TAG).await;
    }
}

#[async_trait]
impl<R: TodoRepository> TodoRepository for CachedRepository<R> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let key = query.query_string();
        match self.cache.lookup(TODOS_TAG, &key).await {
            Lookup::Hit(todos) => Ok(todos),
            Lookup::Miss(generation) => {
                tracing::debug!(%key, "list cache miss");
                let todos = self.inner.list(query).await?;
                self.cache
                    .fill(TODOS_TAG, &key, generation, todos.clone())
                    .await;
                Ok(todos)
            }
        }
    }

    async fn create(&self, title: &str) -> Result<Todo, TodoError> {
        let todo = self.inner.create(title).await?;
        self.invalidate().await;
        Ok(todo)
    }

    async fn update(&self, id: &str, title: &str, is_done: bool) -> Result<Todo, TodoError> {
        let todo = self.inner.update(id, title, is_done).await?;
        self.invalidate().await;
        Ok(todo)
    }
}
