//! Domain DTOs for the todo data layer.
//!
//! # Design
//! `Todo` is the canonical record every layer above the transport speaks.
//! The generic CRUD backend names its identity field `_id` and must never
//! receive one on writes, so it gets its own pair of wire shapes
//! (`RemoteTodo` in, `RemoteWrite` out) with `From` conversions that touch
//! only the identity field. Ids are opaque strings: the server hands out
//! UUID text, but nothing is allowed to rely on the format.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub is_done: bool,
}

/// Request payload for creating a todo. The id and done-flag are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating a todo. Both fields are required: an update
/// replaces title and done-flag wholesale, never partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: String,
    pub is_done: bool,
}

/// A todo as the generic CRUD backend returns it, identity field named `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTodo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub is_done: bool,
}

/// Outbound write shape for the generic CRUD backend. The identity field is
/// dropped; the backend owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWrite {
    pub title: String,
    pub is_done: bool,
}

impl From<RemoteTodo> for Todo {
    fn from(remote: RemoteTodo) -> Self {
        Todo {
            id: remote.id,
            title: remote.title,
            is_done: remote.is_done,
        }
    }
}

impl From<Todo> for RemoteTodo {
    fn from(todo: Todo) -> Self {
        RemoteTodo {
            id: todo.id,
            title: todo.title,
            is_done: todo.is_done,
        }
    }
}

impl From<&Todo> for RemoteWrite {
    fn from(todo: &Todo) -> Self {
        RemoteWrite {
            title: todo.title.clone(),
            is_done: todo.is_done,
        }
    }
}
