//! HTTP server command
//!
//! Runs the todo API with settings from flags, environment and config file,
//! in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use todo_core::TodoConfig;
use todo_server::{connect_with_retry, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3100)
    #[arg(long, short = 'b', env = "TODO_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL, e.g. sqlite://todo.db
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &TodoConfig) -> Result<()> {
    let database_url = args.database_url.unwrap_or_else(|| config.database.url.clone());
    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        request_timeout: Duration::from_secs(
            args.timeout.unwrap_or(config.server.request_timeout_secs),
        ),
    };

    tracing::info!(
        database = %database_url,
        "Starting todo server on {}",
        server_config.bind_addr
    );

    let pool = connect_with_retry(
        &database_url,
        config.database.max_connections,
        config.database.connect_attempts,
    )
    .await
    .with_context(|| format!("Failed to open database {}", database_url))?;

    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
