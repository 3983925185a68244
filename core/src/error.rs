//! Error types for the todo client.
//!
//! # Design
//! Each variant is created at the layer that detects it: `Validation` before
//! any request, `Network` by the host's transport, `Protocol` by the
//! content-type and decode checks, `Server` by the status check. The
//! `Display` output of a `ClientError` is the message shown to the user.

use thiserror::Error;

use crate::types::TodoId;

/// The four classes a user-facing error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Network,
    Protocol,
    Server,
}

/// Every failure a `TodoClient` operation can record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never produced a response.
    #[error("could not reach the todo server: {0}")]
    Network(#[from] TransportError),

    /// A response arrived but was not the JSON the endpoint promises.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server answered with a failure status and a readable message.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ClientError::Validation(_) => ErrorClass::Validation,
            ClientError::Network(_) => ErrorClass::Network,
            ClientError::Protocol(_) => ErrorClass::Protocol,
            ClientError::Server { .. } => ErrorClass::Server,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("no todo with id {0} is loaded")]
    UnknownItem(TodoId),

    #[error("todo {0} is not being edited")]
    NotEditing(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error(
        "server returned an HTML page (status {status}) instead of JSON; \
         check that the API base URL points at the todo routes (e.g. /api/todos)"
    )]
    HtmlPage { status: u16 },

    #[error(
        "server did not return JSON (content type: {}); make sure the todo API server is running",
        .content_type.as_deref().unwrap_or("none")
    )]
    NotJson {
        status: u16,
        content_type: Option<String>,
    },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("could not encode request body: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportErrorKind {
    #[error("connection failed")]
    Connect,
    #[error("host not found")]
    Dns,
    #[error("timed out")]
    Timeout,
    #[error("transport error")]
    Other,
}

/// Raised by a `Transport` when no HTTP response could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidBaseUrl { var: &'static str, value: String },
}
