//! Result-typed data access for the todo service.
//!
//! # Overview
//! Every operation returns its outcome as a value: `Result<T, TodoError>`
//! inside the process, the `ApiResult` envelope on the wire. The transport
//! adapter normalizes raw HTTP outcomes (error statuses, empty bodies,
//! malformed JSON, network faults) before anything above it looks at them,
//! and `TodoRepository` hides which backing store a consumer talks to.
//!
//! # Design
//! - `Transport` owns the only network code; its interpretation rules live
//!   in a pure function with plain-data inputs.
//! - Three stores implement `TodoRepository`: in-memory, the `_id`-dialect
//!   CRUD backend, and this service's own envelope-speaking surface.
//! - `CachedRepository` wraps any store with the invalidate-on-write
//!   protocol; `TodoListView` adds query shaping and optimistic toggles on
//!   top.

pub mod api;
pub mod cache;
pub mod envelope;
pub mod error;
pub mod http;
pub mod memory;
pub mod overlay;
pub mod query;
pub mod remote;
pub mod repo;
pub mod transport;
pub mod types;
pub mod view;

pub use api::TodoApi;
pub use cache::{CachedRepository, TagCache, TODOS_TAG};
pub use envelope::ApiResult;
pub use error::TodoError;
pub use http::{CacheMode, HttpMethod, Payload, RawResponse, RequestConfig};
pub use memory::MemoryRepository;
pub use overlay::{LocalChange, OpId, OptimisticOverlay};
pub use query::{ListQuery, TodoFilter, TodoSortKey, TodoSortOrder};
pub use remote::RemoteRepository;
pub use repo::TodoRepository;
pub use transport::Transport;
pub use types::{CreateTodo, RemoteTodo, RemoteWrite, Todo, UpdateTodo};
pub use view::TodoListView;
