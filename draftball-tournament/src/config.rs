//! Configuration types for tournament and evolution runs
//!
//! Level 4 - Utilities and configuration

use draftball_evolve::DEFAULT_MUTATION_RATE;

/// Tournament execution configuration
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Run round-robin games on the rayon pool. Each game gets its own
    /// random stream seeded from the shared source; merges stay sequential,
    /// so results match the seeds regardless of scheduling.
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self { parallel: false }
    }
}

/// Evolution run configuration
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    /// Agents per generation
    pub population_size: usize,
    /// Generations to run
    pub generations: usize,
    /// Weight perturbation range for reproduction
    pub mutation_rate: f64,
    /// Random seed (None = entropy)
    pub seed: Option<u64>,
    pub tournament: TournamentConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            generations: 1000,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: None,
            tournament: TournamentConfig::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.tournament.parallel = parallel;
        self
    }
}
