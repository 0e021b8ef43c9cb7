//! Voltbay CLI - seeding and store inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Write a demo database file for the store server
//! vb-cli seed --path db.json
//!
//! # Overwrite an existing database file
//! vb-cli seed --path db.json --force
//!
//! # Print store statistics from a running server
//! vb-cli stats
//! ```
//!
//! # Commands
//!
//! - `seed` - Write a demo catalog database file
//! - `stats` - Fetch `/stats` from a running store server

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vb-cli")]
#[command(author, version, about = "Voltbay CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a demo catalog database file
    Seed {
        /// Where to write the database file
        #[arg(short, long, default_value = "db.json")]
        path: String,

        /// Overwrite the file if it already exists
        #[arg(short, long)]
        force: bool,
    },
    /// Fetch statistics from a running store server
    Stats,
}

#[tokio::main]
async fn main() {
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
        Commands::Seed { path, force } => commands::seed::run(&path, force).await?,
        Commands::Stats => commands::stats::run().await?,
    }
    Ok(())
}
