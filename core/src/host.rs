//! Capabilities the host environment lends to `TodoClient`.
//!
//! The client never performs I/O or blocks on the user itself. A terminal
//! host passes a real HTTP transport and a stdin prompt; tests pass closures.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must return 4xx/5xx responses as `Ok` data; `Err` is
/// reserved for failures where no response exists at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: FnMut(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Answers a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
