//! DRAFTBALL Core - Players, teams and game simulation
//!
//! This crate provides the core model for DRAFTBALL:
//! - Immutable player records with four skill ratings
//! - Nine-slot teams with a captain invariant
//! - Per-player statistics books with field-wise merging
//! - The at-bat/inning/game state machine

pub mod player;
pub mod stats;
pub mod game;

// Re-exports for convenient access
pub use player::{Player, PlayerId, Team, TeamStats, MAX_SKILL, TEAM_SIZE};
pub use stats::{PlayerStatistics, StatBook};
pub use game::{simulate_game, GameError, GameOutcome, Side, MAX_EXTRA_INNINGS, REGULATION_INNINGS};
