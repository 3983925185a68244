//! Command-line surface and the mapping from commands to client intents.

use clap::{Parser, Subcommand};
use todo_core::{ClientError, Confirm, TodoClient, TodoId, Transport, ValidationError};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage a todo list over its REST API")]
pub struct Cli {
    /// Collection URL of the API, e.g. http://localhost:5000/api/todos
    /// [env: TODO_API_BASE_URL]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout [env: TODO_API_TIMEOUT_SECS]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show all todos
    List,
    /// Create a todo
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change the title and/or description of a todo
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Flip the completed flag of a todo
    Toggle { id: String },
    /// Delete a todo
    Rm {
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Command {
    pub fn skips_confirmation(&self) -> bool {
        matches!(self, Command::Rm { yes: true, .. })
    }
}

/// Load the list, then apply `command` to it.
pub fn run<T: Transport, C: Confirm>(
    client: &mut TodoClient<T, C>,
    command: Command,
) -> Result<(), ClientError> {
    client.fetch_all()?;

    match command {
        Command::List => {}
        Command::Add { title, description } => {
            client.set_new_title(title);
            client.set_new_description(description);
            client.submit_new()?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let id = TodoId::from(id);
            client.begin_edit(&id)?;
            if let Some(title) = title {
                client.set_edit_title(title);
            }
            if let Some(description) = description {
                client.set_edit_description(description);
            }
            client.commit_edit(&id)?;
        }
        Command::Toggle { id } => {
            let id = TodoId::from(id);
            let current = client
                .state()
                .item(&id)
                .map(|item| item.completed)
                .ok_or_else(|| ValidationError::UnknownItem(id.clone()))?;
            client.toggle_complete(&id, current)?;
        }
        Command::Rm { id, .. } => {
            client.remove(&TodoId::from(id))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todo",
            "add",
            "Buy milk",
            "-d",
            "2 litres",
            "--base-url",
            "http://127.0.0.1:9/api/todos",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9/api/todos"));
        assert!(matches!(
            cli.command,
            Command::Add { ref title, ref description } if title == "Buy milk" && description == "2 litres"
        ));
    }

    #[test]
    fn rm_yes_skips_confirmation() {
        let cli = Cli::try_parse_from(["todo", "rm", "abc", "--yes"]).unwrap();
        assert!(cli.command.skips_confirmation());
        let cli = Cli::try_parse_from(["todo", "rm", "abc"]).unwrap();
        assert!(!cli.command.skips_confirmation());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["todo", "--timeout-secs", "0", "list"]).is_err());
    }
}
