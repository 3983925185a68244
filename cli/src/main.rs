use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use todo_core::config::{self, ClientConfig};
use todo_core::{Confirm, TodoClient};
use todo_cli::{commands, render, Cli, Prompt, UreqTransport};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env().context("invalid environment configuration")?;
    if let Some(url) = &cli.base_url {
        config.base_url = config::parse_base_url("--base-url", url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    tracing::debug!(base_url = %config.base_url, "using todo API");

    let assume_yes = cli.command.skips_confirmation();
    let mut prompt = Prompt::stdio();
    let confirm = move |question: &str| assume_yes || prompt.confirm(question);
    let mut client = TodoClient::from_config(&config, UreqTransport::new(config.timeout), confirm);

    let result = commands::run(&mut client, cli.command);
    print!("{}", render(client.state()));

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            if client.state().last_error() != Some(&err) {
                eprintln!("error: {err}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
