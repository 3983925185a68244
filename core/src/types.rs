//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The server is document-store backed and names the key `_id`; `id` is
//! accepted on input so either spelling deserializes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, server-assigned identifier of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

/// Title and description as typed into a form, before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Seed a draft from the item's current values.
    pub fn from_item(item: &TodoItem) -> Self {
        Self::new(item.title.clone(), item.description.clone())
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_reads_underscore_id_and_defaults() {
        let item: TodoItem = serde_json::from_str(
            r#"{"_id":"65a1","title":"Buy milk","createdAt":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(item.id.as_str(), "65a1");
        assert_eq!(item.description, "");
        assert!(!item.completed);
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn item_accepts_plain_id_alias() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id":"7","title":"t","completed":true,"createdAt":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(item.id, TodoId::from("7"));
        assert!(item.completed);
    }

    #[test]
    fn item_serializes_wire_names() {
        let item: TodoItem = serde_json::from_str(
            r#"{"_id":"1","title":"t","description":"d","completed":false,"createdAt":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], "1");
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn update_todo_omits_absent_fields() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn draft_title_must_have_non_whitespace() {
        assert!(!EditDraft::new("   ", "desc").has_title());
        assert!(EditDraft::new(" a ", "").has_title());
    }
}
