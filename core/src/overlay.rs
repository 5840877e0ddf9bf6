//! Optimistic overlay: local echoes of in-flight writes.
//!
//! # Design
//! While a write travels to the store, its effect is shown locally by
//! projecting a pending change over whatever list the store last returned.
//! The overlay is plain state owned by the view; it is never persisted and
//! never consulted by the repository layer. Once the write settles, the
//! pending entry is dropped either way: on success the invalidated cache
//! refetches the real state, on failure the projection simply disappears.

use crate::types::Todo;

/// Handle for one pending change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpId(u64);

/// A change echoed locally while its write is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalChange {
    /// Flip the done-flag of the given record.
    Toggle { id: String },
}

/// Set of pending changes, applied in the order they began.
#[derive(Debug, Default)]
pub struct OptimisticOverlay {
    pending: Vec<(OpId, LocalChange)>,
    next_op: u64,
}

impl OptimisticOverlay {
    pub fn new() -> Self {
        OptimisticOverlay::default()
    }

    /// Record a change; it shows in `apply` until settled.
    pub fn begin(&mut self, change: LocalChange) -> OpId {
        let op = OpId(self.next_op);
        self.next_op += 1;
        self.pending.push((op, change));
        op
    }

    /// Drop a pending change once its write has settled, successfully or
    /// not. The store's answer is authoritative from here on.
    pub fn settle(&mut self, op: OpId) {
        self.pending.retain(|(pending_op, _)| *pending_op != op);
    }

    /// Project the pending changes over a fetched list.
    pub fn apply(&self, base: Vec<Todo>) -> Vec<Todo> {
        if self.pending.is_empty() {
            return base;
        }
        base.into_iter()
            .map(|mut todo| {
                for (_, change) in &self.pending {
                    match change {
                        LocalChange::Toggle { id } => {
                            if *id == todo.id {
                                todo.is_done = !todo.is_done;
                            }
                        }
                    }
                }
                todo
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
