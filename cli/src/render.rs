//! Plain-text view of a `ClientState`.

use std::fmt;

use chrono::Local;
use todo_core::{ClientState, TodoItem};

pub const EMPTY_MESSAGE: &str = "No todos yet. Add one with `todo add <title>`.";

pub fn render(state: &ClientState) -> String {
    View(state).to_string()
}

struct View<'a>(&'a ClientState);

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        if let Some(message) = state.error_message() {
            writeln!(f, "error: {message}")?;
        }

        if state.items().is_empty() {
            let line = if state.is_busy() { "Loading..." } else { EMPTY_MESSAGE };
            return writeln!(f, "{line}");
        }

        let editing = state.edit().editing_id();
        for item in state.items() {
            if editing == Some(&item.id) {
                write_draft(f, item, state)?;
            } else {
                write_item(f, item)?;
            }
        }
        Ok(())
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, item: &TodoItem) -> fmt::Result {
    let mark = if item.completed { "x" } else { " " };
    writeln!(f, "[{mark}] {}  ({})", item.title, item.id)?;
    if !item.description.is_empty() {
        writeln!(f, "    {}", item.description)?;
    }
    let created = item.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    writeln!(f, "    created {created}")
}

fn write_draft(f: &mut fmt::Formatter<'_>, item: &TodoItem, state: &ClientState) -> fmt::Result {
    let Some(draft) = state.edit().draft() else {
        return write_item(f, item);
    };
    writeln!(f, "[~] {}  ({}, editing)", draft.title, item.id)?;
    if !draft.description.is_empty() {
        writeln!(f, "    {}", draft.description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use todo_core::{ClientError, TodoId};

    fn item(id: &str, title: &str, description: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::from(id),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_state_has_a_hint() {
        assert_eq!(render(&ClientState::default()), format!("{EMPTY_MESSAGE}\n"));
    }

    #[test]
    fn items_show_completion_and_description() {
        let mut state = ClientState::default();
        state.apply_fetched(vec![
            item("a", "Buy milk", "", false),
            item("b", "Walk dog", "before dinner", true),
        ]);
        let out = render(&state);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[ ] Buy milk  (a)");
        assert!(lines[1].starts_with("    created "));
        assert_eq!(lines[2], "[x] Walk dog  (b)");
        assert_eq!(lines[3], "    before dinner");
    }

    #[test]
    fn error_banner_comes_first() {
        let mut state = ClientState::default();
        state.fail(ClientError::Server {
            status: 404,
            message: "todo not found".into(),
        });
        let out = render(&state);
        assert!(out.starts_with("error: todo not found\n"));
    }

    #[test]
    fn edited_item_shows_the_draft() {
        let mut state = ClientState::default();
        state.apply_fetched(vec![item("a", "Buy milk", "", false)]);
        state.begin_edit(&TodoId::from("a"));
        state.set_edit_title("Buy oat milk");
        assert!(render(&state).starts_with("[~] Buy oat milk  (a, editing)\n"));
    }

    #[test]
    fn empty_list_output_is_exact() {
        let mut state = ClientState::default();
        state.begin_request();
        assert_eq!(render(&state), "Loading...\n");

        state.fail(ClientError::Server {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(render(&state), format!("error: boom\n{EMPTY_MESSAGE}\n"));
    }
}
