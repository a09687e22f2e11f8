//! Terminal front-end for the task list.
//!
//! # Responsibility
//! - Drive `TaskListView` against a running gateway, one action per run.
//! - Keep a `ping` probe for checking core linkage without a gateway.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use taskboard_client::{HttpTaskGateway, TaskListView};
use taskboard_core::TaskId;

#[derive(Debug, Parser)]
#[command(name = "taskboard-cli", version, about = "Manage tasks on a taskboard gateway")]
struct Cli {
    /// Gateway base URL.
    #[arg(long, env = "TASKBOARD_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[arg(long, env = "TASKBOARD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core ping/version without contacting the gateway.
    Ping,
    /// Show all tasks.
    List,
    /// Create a task from the given words.
    Add { title: Vec<String> },
    /// Flip a task between open and completed.
    Toggle { id: TaskId },
    /// Delete a task.
    Delete { id: TaskId },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    taskboard_core::init_stderr_logging(&cli.log_level).map_err(|err| anyhow!(err))?;

    if let Command::Ping = cli.command {
        println!("taskboard_core ping={}", taskboard_core::ping());
        println!("taskboard_core version={}", taskboard_core::core_version());
        return Ok(());
    }

    let mut view = TaskListView::new(HttpTaskGateway::new(&cli.url)?);
    view.mount().await?;

    match cli.command {
        Command::Ping | Command::List => {}
        Command::Add { title } => {
            view.set_input(title.join(" "));
            if view.add().await?.is_none() {
                eprintln!("nothing to add: title is blank");
            }
        }
        Command::Toggle { id } => view.toggle(id).await?,
        Command::Delete { id } => view.delete(id).await?,
    }

    let rendered = view.render_text();
    if rendered.is_empty() {
        println!("(no tasks)");
    } else {
        println!("{rendered}");
    }
    Ok(())
}
