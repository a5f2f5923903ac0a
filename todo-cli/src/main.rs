//! todo CLI - run the to-do API server or work with its lists from a terminal
//!
//! - `serve` runs the HTTP API over SQLite
//! - every other command is a client of that API, rendering lists grouped by
//!   item state with collapsed groups remembered between runs

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use todo_core::{TodoConfig, TodoItemState};
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod ui;

use commands::items::{AddArgs, ItemRefArgs};
use commands::lists::{ListRefArgs, ListsArgs, NewListArgs};
use commands::serve::ServeArgs;
use commands::view::{GroupArgs, ShowArgs};
use commands::Session;

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    author,
    version,
    about = "Multi-list to-do service: HTTP API server and terminal client"
)]
struct Cli {
    /// Suppress progress spinners (for scripts)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Base URL of the todo API (default from config: http://127.0.0.1:3100)
    #[arg(long, env = "TODO_API_URL", global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    #[command(flatten)]
    Client(ClientCommands),
}

/// Commands that talk to a running server
#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// Show all lists
    Lists(ListsArgs),
    /// Show a list with its items grouped by state
    Show(ShowArgs),
    /// Create a list
    NewList(NewListArgs),
    /// Add an item to a list
    Add(AddArgs),
    /// Mark an item done
    Complete(ItemRefArgs),
    /// Mark an item in progress
    Start(ItemRefArgs),
    /// Delete an item
    DeleteItem(ItemRefArgs),
    /// Delete a list and all of its items
    DeleteList(ListRefArgs),
    /// Collapse one state group in the list view
    Collapse(GroupArgs),
    /// Expand one state group in the list view
    Expand(GroupArgs),
    /// Collapse every state group
    CollapseAll,
    /// Expand every state group
    ExpandAll,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug).ok();

    ui::init_quiet_mode(cli.quiet);

    let config = TodoConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await,
        Commands::Client(command) => {
            let api_url = cli.api.unwrap_or_else(|| config.client.api_url.clone());
            let mut session = Session::open(&api_url, &config)?;
            run_client(&mut session, command).await
        }
    }
}

async fn run_client(session: &mut Session, command: ClientCommands) -> Result<()> {
    match command {
        ClientCommands::Lists(args) => commands::run_lists(session, args).await?,
        ClientCommands::Show(args) => commands::run_show(session, args).await?,
        ClientCommands::NewList(args) => commands::run_new_list(session, args).await?,
        ClientCommands::Add(args) => commands::run_add(session, args).await?,
        ClientCommands::Complete(args) => {
            commands::run_set_state(session, args, TodoItemState::Done).await?
        }
        ClientCommands::Start(args) => {
            commands::run_set_state(session, args, TodoItemState::InProgress).await?
        }
        ClientCommands::DeleteItem(args) => commands::run_delete_item(session, args).await?,
        ClientCommands::DeleteList(args) => commands::run_delete_list(session, args).await?,
        ClientCommands::Collapse(args) => commands::run_set_group(session, args, true)?,
        ClientCommands::Expand(args) => commands::run_set_group(session, args, false)?,
        ClientCommands::CollapseAll => commands::run_set_all_groups(session, true)?,
        ClientCommands::ExpandAll => commands::run_set_all_groups(session, false)?,
    }
    Ok(())
}
