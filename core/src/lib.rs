//! View-model and API client core for the todo service.
//!
//! # Overview
//! `TodoApi` builds `HttpRequest` values and classifies `HttpResponse`
//! values without touching the network (host-does-IO pattern). `TodoClient`
//! wraps it with the list state a UI renders: the loaded items, a busy flag,
//! the last error and the inline edit form.
//!
//! # Design
//! - The host supplies I/O through the `Transport` and `Confirm` traits, so
//!   the whole view-model runs deterministically in tests.
//! - `ClientState` changes only through its transition methods.
//! - Every failure is a typed `ClientError` produced where it is detected
//!   (transport, content type, status, decode) and never re-derived from text.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod state;
pub mod types;

pub use api::{Operation, TodoApi};
pub use client::{Removal, TodoClient};
pub use config::ClientConfig;
pub use error::{
    ClientError, ConfigError, ErrorClass, ProtocolError, TransportError, TransportErrorKind,
    ValidationError,
};
pub use host::{Confirm, Transport};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{ClientState, EditState};
pub use types::{CreateTodo, EditDraft, TodoId, TodoItem, UpdateTodo};
