//! Drafting agent - one evolvable strategy
//!
//! An agent owns a team, a preference scorer and two statistics scopes:
//! the transient tournament record and the lifetime book that follows it
//! (and its descendants) across generations.

use rand::Rng;

use draftball_core::{Player, PlayerId, StatBook, Team, TeamStats};

use crate::scorer::{Scorer, NUM_INPUTS};

/// Default weight perturbation range for reproduction
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// Skills and averages normalize onto [0, 1] before scoring
const SKILL_SCALE: f64 = 10.0;

pub struct DraftAgent {
    pub id: u32,
    pub team: Team,
    scorer: Scorer,
    /// Reset every generation
    pub tournament_wins: u32,
    pub tournament_score: u32,
    /// Updated only when the agent survives a generation unchanged
    pub lifetime_wins: u32,
    pub lifetime_score: u32,
    pub generations: u32,
    player_stats: StatBook,
}

impl DraftAgent {
    pub fn new<R: Rng>(id: u32, rng: &mut R) -> Self {
        Self::with_scorer(id, Scorer::random(rng))
    }

    pub fn with_scorer(id: u32, scorer: Scorer) -> Self {
        Self {
            id,
            team: Team::new(team_name(id)),
            scorer,
            tournament_wins: 0,
            tournament_score: 0,
            lifetime_wins: 0,
            lifetime_score: 0,
            generations: 1,
            player_stats: StatBook::new(),
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn player_stats(&self) -> &StatBook {
        &self.player_stats
    }

    /// Score one candidate against the given team averages
    pub fn evaluate(&self, player: &Player, team_stats: &TeamStats) -> f64 {
        self.scorer.evaluate(&features(player, team_stats))
    }

    /// Pick the strictly best-scoring player from the pool and add them to
    /// the team.
    ///
    /// Team averages are taken once, before the pick. Ties keep the earliest
    /// candidate in pool order. An empty pool is no pick and no change. A
    /// zeroed statistics entry is created for a player the agent has never
    /// rostered before.
    pub fn draft_player(&mut self, available: &[Player]) -> Option<PlayerId> {
        let team_stats = self.team.stats();

        let mut best: Option<&Player> = None;
        let mut best_score = f64::NEG_INFINITY;
        for player in available {
            let score = self.evaluate(player, &team_stats);
            if score > best_score {
                best_score = score;
                best = Some(player);
            }
        }

        let player = best?;
        self.team.add_player(player.clone());
        self.player_stats.entry(player);
        Some(player.id)
    }

    /// Child agent with a perturbed deep copy of the scorer.
    ///
    /// The child takes `new_id` when given, otherwise the parent's id. It
    /// starts with an empty team named after its id, clean tournament and
    /// lifetime counters, and a snapshot of the parent's player book; later
    /// changes to either book leave the other untouched.
    pub fn reproduce<R: Rng>(
        &self,
        mutation_rate: f64,
        new_id: Option<u32>,
        rng: &mut R,
    ) -> DraftAgent {
        let id = new_id.unwrap_or(self.id);
        let mut child = Self::with_scorer(id, self.scorer.mutated(mutation_rate, rng));
        child.player_stats = self.player_stats.clone();
        child
    }

    /// Fresh, empty team for the next draft
    pub fn reset_team(&mut self) {
        self.team = Team::new(team_name(self.id));
    }

    /// Fold a game's statistics into this agent's book
    pub fn absorb_stats(&mut self, delta: &StatBook) {
        self.player_stats.merge(delta);
    }

    /// Roll the tournament record into the lifetime totals.
    ///
    /// Call exactly once per survived generation; a second call
    /// double-counts.
    pub fn update_lifetime_stats(&mut self) {
        self.lifetime_wins += self.tournament_wins;
        self.lifetime_score += self.tournament_score;
        self.generations += 1;
    }
}

fn team_name(id: u32) -> String {
    format!("Team {}", id)
}

/// Candidate skills and team averages, each divided by 10
pub fn features(player: &Player, team: &TeamStats) -> [f64; NUM_INPUTS] {
    [
        player.pitching as f64 / SKILL_SCALE,
        player.batting as f64 / SKILL_SCALE,
        player.fielding as f64 / SKILL_SCALE,
        player.running as f64 / SKILL_SCALE,
        team.pitching / SKILL_SCALE,
        team.batting / SKILL_SCALE,
        team.fielding / SKILL_SCALE,
        team.running / SKILL_SCALE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_player(id: PlayerId, batting: u8, captain: bool) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            pitching: 5,
            batting,
            fielding: 5,
            running: 5,
            image: String::new(),
            is_captain: captain,
        }
    }

    #[test]
    fn test_features_normalize_by_ten() {
        let player = make_player(1, 8, false);
        let team = TeamStats {
            pitching: 5.0,
            batting: 6.0,
            fielding: 7.0,
            running: 2.0,
        };

        let f = features(&player, &team);
        assert_eq!(f, [0.5, 0.8, 0.5, 0.5, 0.5, 0.6, 0.7, 0.2]);
    }

    #[test]
    fn test_draft_from_empty_pool_is_no_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agent = DraftAgent::new(0, &mut rng);

        assert_eq!(agent.draft_player(&[]), None);
        assert!(agent.team.players().is_empty());
        assert!(agent.player_stats().is_empty());
    }

    #[test]
    fn test_draft_appends_and_seeds_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut agent = DraftAgent::new(0, &mut rng);
        let pool = vec![
            make_player(1, 3, true),
            make_player(2, 9, false),
            make_player(3, 6, false),
        ];

        let picked = agent.draft_player(&pool).unwrap();
        assert!(pool.iter().any(|p| p.id == picked));
        assert_eq!(agent.team.players().len(), 1);
        assert_eq!(agent.team.players()[0].id, picked);

        let entry = agent.player_stats().get(picked).unwrap();
        assert_eq!(entry.at_bats, 0);
        assert_eq!(entry.runs, 0);
    }

    #[test]
    fn test_identical_candidates_resolve_to_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut agent = DraftAgent::new(0, &mut rng);
        // Same skills everywhere, so every score ties; strict comparison
        // keeps the first
        let pool = vec![
            make_player(10, 5, false),
            make_player(11, 5, false),
            make_player(12, 5, false),
        ];

        assert_eq!(agent.draft_player(&pool), Some(10));
    }

    #[test]
    fn test_reproduce_defaults_to_parent_id() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let parent = DraftAgent::new(6, &mut rng);

        let child = parent.reproduce(DEFAULT_MUTATION_RATE, None, &mut rng);
        assert_eq!(child.id, 6);

        let named = parent.reproduce(DEFAULT_MUTATION_RATE, Some(42), &mut rng);
        assert_eq!(named.id, 42);
        assert_eq!(named.team.name, "Team 42");
    }

    #[test]
    fn test_reproduce_yields_clean_mutated_child() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut parent = DraftAgent::new(0, &mut rng);
        parent.tournament_wins = 4;
        parent.tournament_score = 31;
        parent.absorb_stats(&{
            let mut book = StatBook::new();
            book.entry(&make_player(1, 5, false)).hits = 7;
            book
        });

        let child = parent.reproduce(DEFAULT_MUTATION_RATE, Some(8), &mut rng);

        assert!(child.team.players().is_empty());
        assert_eq!(child.tournament_wins, 0);
        assert_eq!(child.tournament_score, 0);
        assert_eq!(child.generations, 1);
        assert_ne!(child.scorer().params(), parent.scorer().params());

        // The book is a snapshot, not a shared reference
        assert_eq!(child.player_stats().get(1).unwrap().hits, 7);
        parent.absorb_stats(&{
            let mut book = StatBook::new();
            book.entry(&make_player(1, 5, false)).hits = 1;
            book
        });
        assert_eq!(parent.player_stats().get(1).unwrap().hits, 8);
        assert_eq!(child.player_stats().get(1).unwrap().hits, 7);
    }

    #[test]
    fn test_update_lifetime_stats_accumulates() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut agent = DraftAgent::new(0, &mut rng);
        agent.tournament_wins = 5;
        agent.tournament_score = 40;

        agent.update_lifetime_stats();
        assert_eq!(agent.lifetime_wins, 5);
        assert_eq!(agent.lifetime_score, 40);
        assert_eq!(agent.generations, 2);

        // The contract is one call per generation; there is no re-entry
        // guard, so a second call double-counts
        agent.update_lifetime_stats();
        assert_eq!(agent.lifetime_wins, 10);
    }

    #[test]
    fn test_absorb_stats_creates_unseen_entries() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut agent = DraftAgent::new(0, &mut rng);

        let mut delta = StatBook::new();
        delta.entry(&make_player(9, 5, false)).at_bats = 4;
        agent.absorb_stats(&delta);

        assert_eq!(agent.player_stats().get(9).unwrap().at_bats, 4);
    }
}
