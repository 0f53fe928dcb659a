//! Run command - evolve drafting agents over repeated seasons
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), export_history()
//! - Level 4: argument parsing

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use draftball_tournament::{EvolutionConfig, EvolutionEngine, GenerationResult};

use crate::report;
use crate::roster::FileRoster;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RunArgs {
    /// Roster JSON file
    #[arg(long, default_value = "data/roster.json")]
    pub roster: PathBuf,

    /// Agents per generation
    #[arg(long, default_value = "8")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub generations: usize,

    /// Weight perturbation range for reproduction
    #[arg(long, default_value = "0.1")]
    pub mutation_rate: f64,

    /// Play round-robin games on the rayon pool
    #[arg(long)]
    pub parallel: bool,

    /// Print the generation history as JSON when done
    #[arg(long)]
    pub json: bool,

    /// Write the generation history to a file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the evolution command:
/// 1. Build the configuration
/// 2. Run the evolution loop with a progress handler
/// 3. Print the summary and export history
pub fn run(args: RunArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed);

    tracing::info!(
        "starting run: pop={}, gen={}, roster={}",
        args.population,
        args.generations,
        args.roster.display(),
    );

    let mut engine = EvolutionEngine::new(FileRoster::new(&args.roster), config);
    engine.on_generation_complete(|result| {
        if let Some(leader) = result.rankings.first() {
            tracing::info!(
                "generation {}: {} leads with {} wins ({} runs)",
                result.generation,
                leader.team_name,
                leader.wins,
                leader.score,
            );
        }
    });

    engine.run();

    report::print_summary(engine.history(), engine.tournament());
    export_history(&args, engine.history())?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &RunArgs, seed: Option<u64>) -> EvolutionConfig {
    let mut config = EvolutionConfig {
        population_size: args.population,
        generations: args.generations,
        mutation_rate: args.mutation_rate,
        ..EvolutionConfig::default()
    }
    .with_parallel(args.parallel);
    config.seed = seed;
    config
}

fn export_history(args: &RunArgs, history: &[GenerationResult]) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(history)?);
    }

    if let Some(path) = &args.output {
        let content = serde_json::to_string_pretty(history)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("saved generation history to {}", path.display());
    }

    Ok(())
}
