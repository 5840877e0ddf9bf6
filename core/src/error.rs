//! Error types for the todo data layer.
//!
//! # Design
//! One enum covers every fault the repository and transport layers can
//! produce, so callers match on a kind instead of inspecting message text.
//! `NotFound` carries the id because its message must name the record the
//! caller asked for. `Service` holds a failure message reported by an
//! envelope-speaking backend; it renders verbatim since the backend already
//! phrased it for display.

use std::fmt;

/// Message used when a transport fault carries no text of its own.
const GENERIC_ERROR: &str = "an unexpected error occurred";

/// Errors produced by repositories and the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// A write was attempted with a title that trims to the empty string.
    EmptyTitle,

    /// The requested todo does not exist.
    NotFound { id: String },

    /// The server answered with a non-2xx status. The body is not consulted.
    Http { status: u16, status_text: String },

    /// The request never produced a response (connect failure, timeout).
    Network(String),

    /// The response body could not be deserialized into the expected type.
    Decode(String),

    /// The request payload could not be serialized to JSON.
    Encode(String),

    /// The backend reported a failure envelope; the message is its
    /// `errorMessage` field, passed through untouched.
    Service(String),
}

impl fmt::Display for TodoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoError::EmptyTitle => write!(f, "title is required"),
            TodoError::NotFound { id } => write!(f, "todo with id \"{id}\" not found"),
            TodoError::Http {
                status,
                status_text,
            } => {
                if status_text.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status} {status_text}")
                }
            }
            TodoError::Network(msg) => {
                if msg.is_empty() {
                    write!(f, "{GENERIC_ERROR}")
                } else {
                    write!(f, "{msg}")
                }
            }
            TodoError::Decode(msg) => write!(f, "deserialization failed: {msg}"),
            TodoError::Encode(msg) => write!(f, "serialization failed: {msg}"),
            TodoError::Service(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TodoError {}
