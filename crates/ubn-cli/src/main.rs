//! UBN CLI - Command-line interface
//!
//! Usage:
//!   ubn lookup <ubn> [--json]
//!   ubn sources

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ubn_resolver::ResolutionChain;

#[derive(Parser)]
#[command(name = "ubn")]
#[command(about = "Resolve Taiwanese unified business numbers to entity names")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the registered name for a business number
    Lookup {
        /// Unified business number
        ubn: String,
        /// Print `{"name": ...}` instead of the bare name
        #[arg(long)]
        json: bool,
    },
    /// List the sources in the order they are tried
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ubn_core::load_config(cli.config.as_deref())?;
    let chain = ResolutionChain::from_config(&config.sources)?;

    match cli.command {
        Commands::Lookup { ubn, json } => {
            let resolution = chain.resolve_detailed(&ubn).await;
            if let Some(r) = &resolution {
                tracing::info!(source = %r.source, "Resolved {}", ubn);
            }
            let name = resolution.map(|r| r.name).unwrap_or_default();

            if json {
                println!("{}", serde_json::json!({ "name": name }));
            } else {
                println!("{name}");
            }
        }
        Commands::Sources => {
            for (priority, source) in chain.sources().iter().enumerate() {
                println!("{}. {:<14} {}", priority + 1, source.name(), source.endpoint());
            }
        }
    }

    Ok(())
}
