//! HEXCAT CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API server
//! - simulate: Play batches of games with a random blocker

mod server;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexcat")]
#[command(about = "Trap the cat on a hexagonal board")]
#[command(version)]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Play games with a random blocker and report the results
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
    }
}
