//! Evolution driver - repeated generations with an append-only history
//!
//! Level 1 - Orchestration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use draftball_core::TeamStats;
use draftball_evolve::DraftAgent;

use crate::config::EvolutionConfig;
use crate::roster::RosterProvider;
use crate::tournament::Tournament;

/// One agent's line in a generation snapshot
#[derive(Clone, Debug, Serialize)]
pub struct AgentRanking {
    pub agent_id: u32,
    pub team_name: String,
    pub wins: u32,
    pub score: u32,
    pub team_stats: TeamStats,
}

/// Immutable record of one completed generation
#[derive(Clone, Debug, Serialize)]
pub struct GenerationResult {
    /// 1-based generation number
    pub generation: usize,
    /// Agents in tournament ranking order
    pub rankings: Vec<AgentRanking>,
}

type GenerationHandler = Box<dyn FnMut(&GenerationResult)>;

/// Runs the tournament for a fixed number of generations, replacing the
/// population between rounds and recording a snapshot of each.
pub struct EvolutionEngine<P> {
    tournament: Tournament<P>,
    config: EvolutionConfig,
    rng: ChaCha8Rng,
    history: Vec<GenerationResult>,
    on_generation: Option<GenerationHandler>,
}

impl<P: RosterProvider> EvolutionEngine<P> {
    pub fn new(roster: P, config: EvolutionConfig) -> Self {
        let mut rng = create_rng(config.seed);
        let agents: Vec<DraftAgent> = (0..config.population_size)
            .map(|id| DraftAgent::new(id as u32, &mut rng))
            .collect();
        let tournament = Tournament::new(agents, roster, config.tournament.clone());

        Self {
            tournament,
            config,
            rng,
            history: Vec::new(),
            on_generation: None,
        }
    }

    /// Register the zero-or-one generation-complete handler. It runs
    /// synchronously, at most once per generation, before the next
    /// generation starts.
    pub fn on_generation_complete(&mut self, handler: impl FnMut(&GenerationResult) + 'static) {
        self.on_generation = Some(Box::new(handler));
    }

    /// Run every generation to completion.
    ///
    /// The population is replaced after each generation except the last,
    /// so the final agents are inspectable afterwards.
    pub fn run(&mut self) {
        tracing::info!(
            "starting evolution: population={}, generations={}",
            self.config.population_size,
            self.config.generations,
        );

        for gen in 0..self.config.generations {
            let ranked = self.tournament.run_generation(&mut self.rng);
            let result = self.snapshot(gen + 1, &ranked);

            if let Some(handler) = self.on_generation.as_mut() {
                handler(&result);
            }
            self.history.push(result);

            if gen + 1 < self.config.generations {
                self.tournament
                    .advance_generation(&ranked, self.config.mutation_rate, &mut self.rng);
            }
        }
    }

    /// Completed generations, oldest first. Records never change once here.
    pub fn history(&self) -> &[GenerationResult] {
        &self.history
    }

    pub fn tournament(&self) -> &Tournament<P> {
        &self.tournament
    }

    fn snapshot(&self, generation: usize, ranked: &[usize]) -> GenerationResult {
        let agents = self.tournament.agents();
        GenerationResult {
            generation,
            rankings: ranked
                .iter()
                .map(|&idx| {
                    let agent = &agents[idx];
                    AgentRanking {
                        agent_id: agent.id,
                        team_name: agent.team.name.clone(),
                        wins: agent.tournament_wins,
                        score: agent.tournament_score,
                        team_stats: agent.team.stats(),
                    }
                })
                .collect(),
        }
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
