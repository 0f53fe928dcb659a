//! DRAFTBALL Tournament - Seasons, selection and the evolution loop
//!
//! This crate provides the orchestration layer:
//! - The nine-round draft over a shared player pool
//! - Round-robin play with per-agent records and merged statistics
//! - Generation replacement (retention, reproduction, fresh blood)
//! - The evolution driver with its append-only generation history
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: EvolutionEngine::run (orchestration)
//! - Level 2: run_draft, run_tournament, advance_generation (phases)
//! - Level 3: game execution, next_generation (steps)
//! - Level 4: configuration, roster interface

mod config;
mod evolution;
mod generation;
mod roster;
mod tournament;

pub use config::{EvolutionConfig, TournamentConfig};
pub use evolution::{AgentRanking, EvolutionEngine, GenerationResult};
pub use generation::{PARENTS, RETAINED};
pub use roster::RosterProvider;
pub use tournament::Tournament;
