mod commands;
mod env;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chatlog", version, about = "Chat history persistence service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server (store_content, get_chat_history)
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so dotenv values feed clap's `env` fallbacks
    env::load_dotenv();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let _log_guard = logging::init_tracing(args.log_dir.as_deref())?;
            commands::run_serve(args).await?
        }
    }

    Ok(())
}
