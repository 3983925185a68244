//! The todo list view-model.
//!
//! # Design
//! `TodoClient` owns a `ClientState` and turns user intents into API calls.
//! Every operation runs to completion before returning: it marks the state
//! busy, hands one request to the host's `Transport`, classifies the answer
//! with `TodoApi`, applies the matching state transition and clears the busy
//! flag. Failures are recorded in `last_error` and also returned, so callers
//! may ignore the `Result` and simply redraw.
//!
//! Operations take `&mut self`, which serializes requests: two operations can
//! never interleave on one client.

use tracing::{debug, warn};

use crate::api::{Operation, TodoApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, ValidationError};
use crate::host::{Confirm, Transport};
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{ClientState, EditState};
use crate::types::{CreateTodo, TodoId, TodoItem, UpdateTodo};

/// Outcome of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The user answered no; nothing was sent and nothing changed.
    Declined,
}

type Listener = Box<dyn FnMut(&ClientState)>;

pub struct TodoClient<T, C> {
    api: TodoApi,
    transport: T,
    confirm: C,
    state: ClientState,
    listeners: Vec<Listener>,
}

impl<T: Transport, C: Confirm> TodoClient<T, C> {
    pub fn new(api: TodoApi, transport: T, confirm: C) -> Self {
        Self {
            api,
            transport,
            confirm,
            state: ClientState::default(),
            listeners: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T, confirm: C) -> Self {
        Self::new(TodoApi::new(&config.base_url), transport, confirm)
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Register a callback run after every state change, including the
    /// busy transition at the start of a request.
    pub fn on_change(&mut self, listener: impl FnMut(&ClientState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn fetch_all(&mut self) -> Result<Vec<TodoItem>, ClientError> {
        let request = self.api.build_list_todos();
        let result = self
            .send(request)
            .and_then(|response| self.api.parse_list_todos(response));

        match &result {
            Ok(items) => {
                debug!(count = items.len(), "loaded todos");
                self.state.apply_fetched(items.clone());
            }
            Err(error) => {
                warn!(%error, "{}", Operation::List.failure_message());
                self.state.fetch_failed(error.clone());
            }
        }
        self.notify();
        result
    }

    /// Create a todo. The title is trimmed; a blank title fails locally.
    pub fn create(&mut self, title: &str, description: &str) -> Result<TodoItem, ClientError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self.reject(ValidationError::EmptyTitle));
        }
        let input = CreateTodo {
            title: title.to_string(),
            description: description.to_string(),
        };

        let result = self
            .api
            .build_create_todo(&input)
            .and_then(|request| self.send(request))
            .and_then(|response| self.api.parse_create_todo(response));
        self.settle(Operation::Create, result, |state, item| {
            state.apply_created(item.clone())
        })
    }

    /// Submit the create form held in the state.
    pub fn submit_new(&mut self) -> Result<TodoItem, ClientError> {
        let draft = self.state.new_draft().clone();
        self.create(&draft.title, &draft.description)
    }

    pub fn update(&mut self, id: &TodoId, patch: UpdateTodo) -> Result<TodoItem, ClientError> {
        if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(self.reject(ValidationError::EmptyTitle));
        }

        let result = self
            .api
            .build_update_todo(id, &patch)
            .and_then(|request| self.send(request))
            .and_then(|response| self.api.parse_update_todo(response));
        self.settle(Operation::Update, result, |state, item| {
            state.apply_updated(item.clone())
        })
    }

    /// Delete a todo after the user confirms.
    pub fn remove(&mut self, id: &TodoId) -> Result<Removal, ClientError> {
        let prompt = match self.state.item(id) {
            Some(item) => format!("Delete \"{}\"?", item.title),
            None => "Delete this todo?".to_string(),
        };
        if !self.confirm.confirm(&prompt) {
            debug!(%id, "delete declined");
            return Ok(Removal::Declined);
        }

        let request = self.api.build_delete_todo(id);
        let result = self
            .send(request)
            .and_then(|response| self.api.parse_delete_todo(response));
        self.settle(Operation::Delete, result, |state, _| state.apply_removed(id))
            .map(|()| Removal::Removed)
    }

    pub fn toggle_complete(&mut self, id: &TodoId, current: bool) -> Result<TodoItem, ClientError> {
        self.update(id, UpdateTodo::completed(!current))
    }

    pub fn begin_edit(&mut self, id: &TodoId) -> Result<(), ClientError> {
        if !self.state.begin_edit(id) {
            return Err(self.reject(ValidationError::UnknownItem(id.clone())));
        }
        self.notify();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
        self.notify();
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        self.state.set_edit_title(title);
        self.notify();
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        self.state.set_edit_description(description);
        self.notify();
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.state.set_new_title(title);
        self.notify();
    }

    pub fn set_new_description(&mut self, description: impl Into<String>) {
        self.state.set_new_description(description);
        self.notify();
    }

    /// Save the edit draft for `id`. On any failure the client stays in
    /// edit mode with the draft untouched.
    pub fn commit_edit(&mut self, id: &TodoId) -> Result<TodoItem, ClientError> {
        let draft = match self.state.edit() {
            EditState::Editing { id: editing, draft } if editing == id => Some(draft.clone()),
            _ => None,
        };
        let Some(draft) = draft else {
            return Err(self.reject(ValidationError::NotEditing(id.clone())));
        };
        if !draft.has_title() {
            return Err(self.reject(ValidationError::EmptyTitle));
        }

        let patch = UpdateTodo {
            title: Some(draft.title.trim().to_string()),
            description: Some(draft.description),
            completed: None,
        };
        self.update(id, patch)
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
        self.notify();
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        self.state.begin_request();
        self.notify();
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    fn settle<R>(
        &mut self,
        op: Operation,
        result: Result<R, ClientError>,
        apply: impl FnOnce(&mut ClientState, &R),
    ) -> Result<R, ClientError> {
        match &result {
            Ok(value) => apply(&mut self.state, value),
            Err(error) => {
                warn!(%error, "{}", op.failure_message());
                self.state.fail(error.clone());
            }
        }
        self.notify();
        result
    }

    fn reject(&mut self, error: ValidationError) -> ClientError {
        let error = ClientError::from(error);
        debug!(%error, "rejected before sending");
        self.state.fail(error.clone());
        self.notify();
        error
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}
