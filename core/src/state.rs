//! Renderable client state and its transitions.
//!
//! # Design
//! `ClientState` is a plain value owned by `TodoClient`. Fields are read
//! through accessors and changed only through the transition methods below,
//! one per operation outcome, so every intermediate state is one a renderer
//! can draw. The methods never perform I/O.

use tracing::warn;

use crate::error::ClientError;
use crate::types::{EditDraft, TodoId, TodoItem};

/// Inline edit form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { id: TodoId, draft: EditDraft },
}

impl EditState {
    pub fn editing_id(&self) -> Option<&TodoId> {
        match self {
            EditState::Viewing => None,
            EditState::Editing { id, .. } => Some(id),
        }
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            EditState::Viewing => None,
            EditState::Editing { draft, .. } => Some(draft),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    items: Vec<TodoItem>,
    busy: bool,
    last_error: Option<ClientError>,
    edit: EditState,
    new_draft: EditDraft,
}

impl ClientState {
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// The text of the dismissible error banner.
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn new_draft(&self) -> &EditDraft {
        &self.new_draft
    }

    /// A request was handed to the transport.
    pub fn begin_request(&mut self) {
        self.busy = true;
        self.last_error = None;
    }

    /// Replace the list wholesale with a fresh server listing.
    pub fn apply_fetched(&mut self, items: Vec<TodoItem>) {
        let mut unique: Vec<TodoItem> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().any(|seen| seen.id == item.id) {
                warn!(id = %item.id, "server listed a todo twice; keeping the first");
                continue;
            }
            unique.push(item);
        }
        self.items = unique;
        self.busy = false;
        if let Some(id) = self.edit.editing_id() {
            if self.item(id).is_none() {
                self.edit = EditState::Viewing;
            }
        }
    }

    /// A failed listing never leaves stale rows next to the error.
    pub fn fetch_failed(&mut self, error: ClientError) {
        self.items.clear();
        self.edit = EditState::Viewing;
        self.fail(error);
    }

    pub fn apply_created(&mut self, item: TodoItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
        self.new_draft = EditDraft::default();
        self.busy = false;
    }

    /// Replace the entry in place; leaves edit mode if it was editing it.
    pub fn apply_updated(&mut self, item: TodoItem) {
        if self.edit.editing_id() == Some(&item.id) {
            self.edit = EditState::Viewing;
        }
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => *slot = item,
            None => warn!(id = %item.id, "updated todo is not in the loaded list"),
        }
        self.busy = false;
    }

    pub fn apply_removed(&mut self, id: &TodoId) {
        self.items.retain(|item| &item.id != id);
        if self.edit.editing_id() == Some(id) {
            self.edit = EditState::Viewing;
        }
        self.busy = false;
    }

    /// Record a failure and end any request; items are left as they are.
    pub fn fail(&mut self, error: ClientError) {
        self.last_error = Some(error);
        self.busy = false;
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Enter edit mode for an item, seeding the draft from its values.
    /// Returns false when the id is not loaded.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        let Some(draft) = self.item(id).map(EditDraft::from_item) else {
            return false;
        };
        self.edit = EditState::Editing {
            id: id.clone(),
            draft,
        };
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Viewing;
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.edit {
            draft.title = title.into();
        }
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.edit {
            draft.description = description.into();
        }
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_draft.title = title.into();
    }

    pub fn set_new_description(&mut self, description: impl Into<String>) {
        self.new_draft.description = description.into();
    }
}
