//! Gehna Jewels CLI - catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the document store with a starter catalog
//! gehna-cli seed
//!
//! # Recompute category product counts from a full product scan
//! gehna-cli counts reconcile
//! ```
//!
//! Both commands read `DOCSTORE_BASE_URL` and `DOCSTORE_API_KEY` from the
//! environment (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gehna-cli")]
#[command(author, version, about = "Gehna Jewels CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the document store with a starter catalog
    Seed,
    /// Category product-count maintenance
    Counts {
        #[command(subcommand)]
        action: CountsAction,
    },
}

#[derive(Subcommand)]
enum CountsAction {
    /// Recompute every category's product count from a full scan
    Reconcile,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run().await?,
        Commands::Counts { action } => match action {
            CountsAction::Reconcile => commands::counts::reconcile().await?,
        },
    }
    Ok(())
}
