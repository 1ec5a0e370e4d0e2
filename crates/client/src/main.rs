//! Tasklite terminal client.
//!
//! One-shot subcommands for scripting, or an interactive mode (the default)
//! that paints the cached snapshot immediately, refreshes from the server,
//! and then loops on a menu. Filter switches re-render without touching the
//! network.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::warn;
use uuid::Uuid;

use tasklite_client::{Filter, Session, TaskCache, TasksApi};
use tasklite_model::Task;

#[derive(Parser)]
#[command(name = "tasklite", about = "Terminal client for the tasklite task tracker")]
struct Cli {
    /// Base URL of the task server.
    #[arg(
        long,
        env = "TASKLITE_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the task list.
    List {
        /// Which tasks to show.
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Add a task.
    Add {
        /// Task description.
        description: Vec<String>,
    },
    /// Flip a task's completion flag.
    Toggle {
        /// Task id.
        id: Uuid,
    },
    /// Delete a task.
    Rm {
        /// Task id.
        id: Uuid,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Active => Self::Active,
            FilterArg::Completed => Self::Completed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let api = TasksApi::new(cli.server.clone());
    let cache = TaskCache::from_env();
    let mut session = Session::new(api, cache);

    match cli.command {
        Some(Command::List { filter }) => {
            session.refresh().await?;
            session.set_filter(filter.into());
            render(&session);
        }
        Some(Command::Add { description }) => {
            let task = session.add(&description.join(" ")).await?;
            println!("Added {}", summary(&task));
        }
        Some(Command::Toggle { id }) => {
            session.refresh().await?;
            session.toggle(id).await?;
            render(&session);
        }
        Some(Command::Rm { id }) => {
            session.remove(id).await?;
            println!("Deleted {id}");
        }
        None => interactive(session).await,
    }

    Ok(())
}

/// Interactive mode: cached first paint, then live.
async fn interactive(mut session: Session) {
    if session.load_cached() {
        println!("{}", "showing cached tasks while fetching...".dimmed());
        render(&session);
    }

    // The fetch result always wins over the cache; on failure the cached
    // paint simply stays up.
    if let Err(err) = session.refresh().await {
        warn!(%err, "initial fetch failed");
    }
    render(&session);

    let actions = ["Add", "Toggle", "Delete", "Filter", "Refresh", "Quit"];
    loop {
        let Ok(choice) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("tasklite")
            .items(&actions)
            .default(0)
            .interact()
        else {
            break;
        };

        let result = match actions[choice] {
            "Add" => add_flow(&mut session).await,
            "Toggle" => match pick_task(&session, "Toggle which task?") {
                Some(id) => session.toggle(id).await,
                None => Ok(()),
            },
            "Delete" => match pick_task(&session, "Delete which task?") {
                Some(id) => session.remove(id).await,
                None => Ok(()),
            },
            "Filter" => {
                filter_flow(&mut session);
                Ok(())
            }
            "Refresh" => session.refresh().await,
            _ => break,
        };

        // A failed flow leaves the list exactly as it was; nothing to undo.
        if let Err(err) = result {
            warn!(%err, "action failed, state unchanged");
            println!("{}", format!("error: {err}").red());
        }

        render(&session);
    }
}

/// Prompt for a description and add the task.
async fn add_flow(session: &mut Session) -> Result<(), tasklite_client::ClientError> {
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you need to do?")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    match session.add(&description).await {
        Err(tasklite_client::ClientError::EmptyDescription) => {
            // Rejected locally; no request was made.
            println!("{}", "nothing to add".dimmed());
            Ok(())
        }
        other => other.map(|_| ()),
    }
}

/// Let the user pick one of the currently visible tasks.
fn pick_task(session: &Session, prompt: &str) -> Option<Uuid> {
    let visible = session.visible();
    if visible.is_empty() {
        println!("{}", "no tasks to show".dimmed());
        return None;
    }

    let labels: Vec<String> = visible.iter().map(|t| summary(t)).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .ok()?;

    Some(visible[choice].id)
}

/// Switch the visible slice; pure re-render, no I/O.
fn filter_flow(session: &mut Session) {
    let filters = [Filter::All, Filter::Active, Filter::Completed];
    let labels: Vec<&str> = filters.iter().map(|f| f.label()).collect();

    if let Ok(choice) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Show")
        .items(&labels)
        .default(0)
        .interact()
    {
        session.set_filter(filters[choice]);
    }
}

fn render(session: &Session) {
    let visible = session.visible();

    println!();
    println!(
        "{} ({})",
        "Tasks".bold(),
        session.filter().label().dimmed()
    );

    if visible.is_empty() {
        println!("  {}", "no tasks to show".italic().dimmed());
        return;
    }

    for task in visible {
        println!("  {}", summary(task));
    }
    println!();
}

/// One-line rendering of a task: short id, checkbox, description.
fn summary(task: &Task) -> String {
    let short_id = task.id.to_string()[..8].to_string();
    if task.is_completed {
        format!(
            "{} {} {}",
            short_id.dimmed(),
            "[x]".green(),
            task.description.strikethrough().dimmed()
        )
    } else {
        format!("{} [ ] {}", short_id.dimmed(), task.description)
    }
}
