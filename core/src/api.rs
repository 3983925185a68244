//! Stateless HTTP request builder and response classifier for the todo API.
//!
//! # Design
//! `TodoApi` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Every `parse_*` runs the same classification: content type first, then
//! status, then the payload decode.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ProtocolError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, TodoId, TodoItem, UpdateTodo};

/// The four endpoints, used to pick fallback error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when a failure body is JSON but carries no message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "failed to load todos",
            Operation::Create => "failed to create todo",
            Operation::Update => "failed to update todo",
            Operation::Delete => "failed to delete todo",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/", self.base_url),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_todo(&self, id: &TodoId, input: &UpdateTodo) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{id}", self.base_url),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A JSON value that is not an array yields an empty list.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ClientError> {
        classify(&response, Operation::List)?;
        let value: serde_json::Value = decode(&response.body)?;
        if !value.is_array() {
            debug!("list response is not an array; treating it as empty");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ProtocolError::Malformed(e.to_string()).into())
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoItem, ClientError> {
        classify(&response, Operation::Create)?;
        decode(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoItem, ClientError> {
        classify(&response, Operation::Update)?;
        decode(&response.body)
    }

    /// No body is required on success.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ClientError> {
        if response.is_success() && response.body.trim().is_empty() {
            return Ok(());
        }
        classify(&response, Operation::Delete)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: Serialize>(input: &T) -> Result<String, ClientError> {
    serde_json::to_string(input).map_err(|e| ProtocolError::Encode(e.to_string()).into())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ProtocolError::Malformed(e.to_string()).into())
}

/// Map a response to the error it represents, if any.
///
/// Order matters: a non-JSON content type is a protocol error even when the
/// status is a failure, since such bodies are usually a proxy or router page
/// rather than the API.
pub fn classify(response: &HttpResponse, op: Operation) -> Result<(), ClientError> {
    if !response.is_json() {
        if response.looks_like_html() {
            return Err(ProtocolError::HtmlPage {
                status: response.status,
            }
            .into());
        }
        return Err(ProtocolError::NotJson {
            status: response.status,
            content_type: response.content_type().map(str::to_string),
        }
        .into());
    }

    if response.is_success() {
        return Ok(());
    }

    let message = match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(body) => server_message(&body).unwrap_or(op.failure_message()).to_string(),
        Err(_) => format!("server error ({})", response.status),
    };
    Err(ClientError::Server {
        status: response.status,
        message,
    })
}

fn server_message(body: &serde_json::Value) -> Option<&str> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .find(|msg| !msg.trim().is_empty())
}
