//! DRAFTBALL Evolve - Drafting agents and their evolution
//!
//! This crate provides the evolvable strategy layer:
//! - A fixed-topology preference scorer over player features
//! - The drafting agent that owns a team and accumulates statistics
//! - Reproduction with independent per-parameter mutation

pub mod agent;
pub mod scorer;

pub use agent::{features, DraftAgent, DEFAULT_MUTATION_RATE};
pub use scorer::{Scorer, NUM_INPUTS};
