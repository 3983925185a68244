//! Terminal host for `todo-core`.
//!
//! Supplies the capabilities the view-model asks for: an HTTP transport
//! backed by ureq, a yes/no prompt on stdin, and a text rendering of the
//! client state.

pub mod commands;
pub mod prompt;
pub mod render;
pub mod transport;

pub use commands::{Cli, Command};
pub use prompt::Prompt;
pub use render::render;
pub use transport::UreqTransport;
