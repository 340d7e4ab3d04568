//! HTTP server command
//!
//! Owns the pool lifecycle: connect (fatal on failure), bootstrap the table,
//! serve until a shutdown signal, then drain and close the pool.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use chatlog_server::db::{ensure_schema, Database};
use chatlog_server::http::{run_server, ServerConfig};
use chatlog_server::DatabaseConfig;

/// Arguments for the serve command
///
/// Database settings come from `CHATLOG_DB_*` variables (process environment
/// or dotenv file).
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CHATLOG_BIND", default_value = "0.0.0.0:8847")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "CHATLOG_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Fill a missing session_id with the shared placeholder conversation
    #[arg(long, env = "CHATLOG_LEGACY_DEFAULT_SESSION")]
    pub legacy_default_session: bool,

    /// Do not create the chat_history table at startup
    #[arg(long)]
    pub skip_schema: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, env = "CHATLOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = DatabaseConfig::from_env().context(
        "database configuration incomplete. Set CHATLOG_DB_* via environment or env_config/.env.local",
    )?;

    tracing::info!("Starting chatlog server on {}", args.bind);

    let db = Database::connect(&db_config)
        .await
        .context("Failed to create database pool")?;

    if args.skip_schema {
        tracing::info!("Skipping schema bootstrap");
    } else if let Err(e) = ensure_schema(&db).await {
        db.close().await;
        return Err(e).context("Failed to bootstrap chat_history schema");
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        legacy_default_session: args.legacy_default_session,
    };

    // Run server (blocks until shutdown), then drain the pool either way
    let served = run_server(db.clone(), config).await;
    db.close().await;

    served.context("Server error")?;
    Ok(())
}
