//! Codexbridge — code assistance tools over stdio JSON-RPC

use clap::{Parser, Subcommand};
use codexbridge_core::Config;
use codexbridge_llm::{select_backend, Dispatcher};
use codexbridge_server::{logging, serve_stdio, ServerState};
use codexbridge_tools::create_default_registry;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "codexbridge",
    about = "Code assistance tool server bridging to the Codex CLI or OpenAI API"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the stdio JSON-RPC server
    Serve,
    /// List the registered tools
    Tools,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tools) => {
            let config = Config::from_env();
            let registry = create_default_registry(config.default_model.clone());
            for def in registry.definitions() {
                println!(
                    "{:<28} {}",
                    def["name"].as_str().unwrap_or(""),
                    def["description"].as_str().unwrap_or("")
                );
            }
        }

        Some(Commands::Version) => {
            println!("codexbridge v{}", env!("CARGO_PKG_VERSION"));
        }

        // No subcommand = serve
        Some(Commands::Serve) | None => serve().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env();
    let _guard = logging::init_logging(&config)?;
    info!(
        "codexbridge v{} starting, pid={}",
        env!("CARGO_PKG_VERSION"),
        std::process::id()
    );

    let backend = select_backend(&config)?;
    let dispatcher = Dispatcher::from_config(backend, &config);
    let registry = create_default_registry(config.default_model.clone());
    info!(
        "backend={} model={} tools={:?}",
        dispatcher.backend_name(),
        config.default_model,
        registry.list()
    );

    let state = Arc::new(ServerState {
        registry,
        dispatcher,
    });
    serve_stdio(state).await
}
