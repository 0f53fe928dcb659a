//! DRAFTBALL CLI - Command-line interface
//!
//! Commands:
//! - run: evolve drafting agents over repeated simulated seasons
//! - rankings: rank players by win contribution across random seasons

mod rankings;
mod report;
mod roster;
mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "draftball")]
#[command(about = "Evolutionary baseball draft simulator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the evolution loop
    Run(run::RunArgs),
    /// Rank players by win contribution over many random seasons
    Rankings(rankings::RankingsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::run(args, cli.seed),
        Commands::Rankings(args) => rankings::run(args, cli.seed),
    }
}
