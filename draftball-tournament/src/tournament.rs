//! Draft orchestration and round-robin play
//!
//! Level 2 - Phases

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::cmp::Reverse;

use draftball_core::{simulate_game, GameOutcome, Player, Side, StatBook, TEAM_SIZE};
use draftball_evolve::DraftAgent;

use crate::config::TournamentConfig;
use crate::generation::next_generation;
use crate::roster::RosterProvider;

/// One season's worth of agents, pool and records
pub struct Tournament<P> {
    agents: Vec<DraftAgent>,
    roster: P,
    pool: Vec<Player>,
    global_stats: StatBook,
    config: TournamentConfig,
}

impl<P: RosterProvider> Tournament<P> {
    /// The global book starts with a zeroed entry for every player the
    /// roster knows about.
    pub fn new(agents: Vec<DraftAgent>, roster: P, config: TournamentConfig) -> Self {
        let global_stats = StatBook::seeded(&roster.load());
        Self {
            agents,
            roster,
            pool: Vec::new(),
            global_stats,
            config,
        }
    }

    pub fn agents(&self) -> &[DraftAgent] {
        &self.agents
    }

    pub fn global_stats(&self) -> &StatBook {
        &self.global_stats
    }

    /// Remaining undrafted players
    pub fn available_players(&self) -> &[Player] {
        &self.pool
    }

    /// Reset every team and run the nine-round draft.
    ///
    /// Agents pick in list order, and the same order repeats every round
    /// (not a snake draft), so earlier agents always see a fuller pool. A
    /// successful pick leaves the pool before the next agent's turn.
    pub fn run_draft(&mut self) {
        for agent in &mut self.agents {
            agent.reset_team();
        }

        self.pool = self.roster.load();
        if self.pool.is_empty() {
            tracing::warn!("roster came back empty; every team will be invalid this generation");
        }

        for _round in 0..TEAM_SIZE {
            for idx in 0..self.agents.len() {
                if let Some(picked) = self.agents[idx].draft_player(&self.pool) {
                    self.pool.retain(|p| p.id != picked);
                }
            }
        }
    }

    /// Play one game per unordered pair of agents with valid teams and
    /// rank everyone.
    ///
    /// Returns agent indices ranked by win count descending. The sort is
    /// stable and wins are the only key, so equal records keep their
    /// current list order. Win and score totals land on the agents'
    /// transient fields before the ranking is returned.
    pub fn run_tournament<R: Rng>(&mut self, rng: &mut R) -> Vec<usize> {
        let n = self.agents.len();
        let mut wins = vec![0u32; n];
        let mut scores = vec![0u32; n];

        let pairings = self.playable_pairings();
        let outcomes = if self.config.parallel {
            self.execute_games_parallel(&pairings, rng)
        } else {
            self.execute_games(&pairings, rng)
        };

        for ((i, j), outcome) in outcomes {
            let winner = match outcome.winner {
                Side::Away => i,
                Side::Home => j,
            };
            let loser = if winner == i { j } else { i };

            wins[winner] += 1;
            scores[winner] += outcome.winning_score();
            scores[loser] += outcome.losing_score();

            self.global_stats.merge(&outcome.stats);
            self.agents[i].absorb_stats(&outcome.stats);
            self.agents[j].absorb_stats(&outcome.stats);
        }

        for (idx, agent) in self.agents.iter_mut().enumerate() {
            agent.tournament_wins = wins[idx];
            agent.tournament_score = scores[idx];
        }

        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by_key(|&idx| Reverse(wins[idx]));
        ranked
    }

    /// Draft, then play the season
    pub fn run_generation<R: Rng>(&mut self, rng: &mut R) -> Vec<usize> {
        self.run_draft();
        self.run_tournament(rng)
    }

    /// Replace the population according to the ranking
    pub fn advance_generation<R: Rng>(
        &mut self,
        ranked: &[usize],
        mutation_rate: f64,
        rng: &mut R,
    ) {
        let agents = std::mem::take(&mut self.agents);
        self.agents = next_generation(agents, ranked, mutation_rate, rng);
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// Unordered pairs whose teams are both ready to play
    fn playable_pairings(&self) -> Vec<(usize, usize)> {
        let n = self.agents.len();
        let mut pairings = Vec::new();
        let mut skipped = 0usize;

        for i in 0..n {
            for j in (i + 1)..n {
                if self.agents[i].team.is_valid() && self.agents[j].team.is_valid() {
                    pairings.push((i, j));
                } else {
                    skipped += 1;
                    tracing::debug!(
                        "skipping pairing {} vs {}: invalid team",
                        self.agents[i].team.name,
                        self.agents[j].team.name,
                    );
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("{} pairings skipped for invalid teams", skipped);
        }
        pairings
    }

    /// Play pairings one after another off the shared stream
    fn execute_games<R: Rng>(
        &self,
        pairings: &[(usize, usize)],
        rng: &mut R,
    ) -> Vec<((usize, usize), GameOutcome)> {
        pairings
            .iter()
            .filter_map(|&(i, j)| {
                match simulate_game(&self.agents[i].team, &self.agents[j].team, rng) {
                    Ok(outcome) => Some(((i, j), outcome)),
                    Err(err) => {
                        tracing::warn!("game {} vs {} skipped: {}", i, j, err);
                        None
                    }
                }
            })
            .collect()
    }

    /// Play pairings on the rayon pool. Seeds are drawn from the shared
    /// stream before fan-out so each game owns an independent stream, and
    /// the merge back into records happens sequentially in the caller.
    fn execute_games_parallel<R: Rng>(
        &self,
        pairings: &[(usize, usize)],
        rng: &mut R,
    ) -> Vec<((usize, usize), GameOutcome)> {
        let seeds: Vec<u64> = pairings.iter().map(|_| rng.gen()).collect();
        let agents = &self.agents;

        pairings
            .par_iter()
            .zip(seeds.par_iter())
            .filter_map(|(&(i, j), &seed)| {
                let mut game_rng = ChaCha8Rng::seed_from_u64(seed);
                match simulate_game(&agents[i].team, &agents[j].team, &mut game_rng) {
                    Ok(outcome) => Some(((i, j), outcome)),
                    Err(err) => {
                        tracing::warn!("game {} vs {} skipped: {}", i, j, err);
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftball_core::PlayerId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_player(id: PlayerId, captain: bool) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            pitching: (id % 10) as u8,
            batting: ((id * 3) % 10) as u8,
            fielding: ((id * 7) % 10) as u8,
            running: 5,
            image: String::new(),
            is_captain: captain,
        }
    }

    /// Pool where everyone is captain-eligible, so full teams are valid
    fn make_pool(count: u32) -> Vec<Player> {
        (0..count).map(|id| make_player(id, true)).collect()
    }

    fn make_agents(count: u32, seed: u64) -> Vec<DraftAgent> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count).map(|id| DraftAgent::new(id, &mut rng)).collect()
    }

    fn full_pool() -> Vec<Player> {
        make_pool(40)
    }

    #[test]
    fn test_draft_fills_every_team() {
        let mut tournament = Tournament::new(
            make_agents(4, 1),
            full_pool,
            TournamentConfig::default(),
        );
        tournament.run_draft();

        for agent in tournament.agents() {
            assert_eq!(agent.team.players().len(), TEAM_SIZE);
        }
        // 40 players, 36 drafted
        assert_eq!(tournament.available_players().len(), 4);

        // No player appears on two rosters
        let mut seen = std::collections::HashSet::new();
        for agent in tournament.agents() {
            for player in agent.team.players() {
                assert!(seen.insert(player.id));
            }
        }
    }

    #[test]
    fn test_draft_on_empty_roster_yields_invalid_teams() {
        let mut tournament = Tournament::new(
            make_agents(4, 2),
            || Vec::new(),
            TournamentConfig::default(),
        );
        tournament.run_draft();

        for agent in tournament.agents() {
            assert!(agent.team.players().is_empty());
            assert!(!agent.team.is_valid());
        }
    }

    #[test]
    fn test_round_robin_game_count_and_win_bound() {
        let mut tournament = Tournament::new(
            make_agents(4, 3),
            full_pool,
            TournamentConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let ranked = tournament.run_generation(&mut rng);

        assert_eq!(ranked.len(), 4);

        // 4 agents -> C(4,2) = 6 games, one win each
        let total_wins: u32 = tournament.agents().iter().map(|a| a.tournament_wins).sum();
        assert_eq!(total_wins, 6);
        for agent in tournament.agents() {
            assert!(agent.tournament_wins <= 3);
        }

        // Ranking is sorted by wins descending
        let wins: Vec<u32> = ranked
            .iter()
            .map(|&idx| tournament.agents()[idx].tournament_wins)
            .collect();
        assert!(wins.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_invalid_pairs_are_skipped() {
        // 18 players can never fill four teams of nine
        let mut tournament = Tournament::new(
            make_agents(4, 4),
            || make_pool(18),
            TournamentConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        tournament.run_generation(&mut rng);

        for agent in tournament.agents() {
            assert_eq!(agent.tournament_wins, 0);
            assert_eq!(agent.tournament_score, 0);
        }
    }

    #[test]
    fn test_empty_roster_season_runs_without_games() {
        let mut tournament = Tournament::new(
            make_agents(8, 5),
            || Vec::new(),
            TournamentConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ranked = tournament.run_generation(&mut rng);

        assert_eq!(ranked, (0..8).collect::<Vec<_>>());
        assert!(tournament.agents().iter().all(|a| a.tournament_wins == 0));
        assert!(tournament.global_stats().is_empty());
    }

    #[test]
    fn test_equal_wins_keep_list_order() {
        let mut tournament = Tournament::new(
            make_agents(3, 6),
            || Vec::new(),
            TournamentConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        // No games at all, so every win count ties at zero
        let ranked = tournament.run_tournament(&mut rng);
        assert_eq!(ranked, vec![0, 1, 2]);
    }

    #[test]
    fn test_stats_merge_into_global_and_agents() {
        let mut tournament = Tournament::new(
            make_agents(2, 7),
            full_pool,
            TournamentConfig::default(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        tournament.run_generation(&mut rng);

        let global_at_bats: u32 = tournament.global_stats().iter().map(|s| s.at_bats).sum();
        assert!(global_at_bats > 0);

        // Both participants hold the same game's numbers
        for agent in tournament.agents() {
            let agent_at_bats: u32 = agent.player_stats().iter().map(|s| s.at_bats).sum();
            assert_eq!(agent_at_bats, global_at_bats);
        }
    }

    #[test]
    fn test_global_stats_preseeded_for_known_players() {
        let tournament = Tournament::new(
            make_agents(2, 8),
            || make_pool(12),
            TournamentConfig::default(),
        );
        assert_eq!(tournament.global_stats().len(), 12);
        assert!(tournament.global_stats().iter().all(|s| s.at_bats == 0));
    }

    #[test]
    fn test_parallel_season_matches_structure() {
        let mut config = TournamentConfig::default();
        config.parallel = true;

        let mut tournament = Tournament::new(make_agents(4, 14), full_pool, config);
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        tournament.run_generation(&mut rng);

        let total_wins: u32 = tournament.agents().iter().map(|a| a.tournament_wins).sum();
        assert_eq!(total_wins, 6);
    }
}
