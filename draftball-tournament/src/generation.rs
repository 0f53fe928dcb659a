//! Generation replacement - retention, reproduction, fresh blood
//!
//! Level 3 - Steps

use rand::Rng;

use draftball_evolve::DraftAgent;

/// Top finishers carried into the next generation unchanged
pub const RETAINED: usize = 4;

/// Retained finishers that each produce one mutated child
pub const PARENTS: usize = 3;

/// Build the next population from the current one and its ranking.
///
/// The top `min(4, n)` agents survive as-is, each rolling their tournament
/// record into lifetime totals exactly once. The top `min(3, survivors)`
/// then each contribute one child; new ids run contiguously from the
/// current maximum plus one, and every child's team name follows its id.
/// One entirely fresh agent joins after the children, and fresh agents fill
/// any remaining slots. The returned population has the same size as the
/// one passed in.
pub(crate) fn next_generation<R: Rng>(
    agents: Vec<DraftAgent>,
    ranked: &[usize],
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<DraftAgent> {
    let target = agents.len();
    let mut next_id = agents.iter().map(|a| a.id).max().map_or(0, |m| m + 1);

    let keep = RETAINED.min(ranked.len());
    let breed = PARENTS.min(keep);

    let mut slots: Vec<Option<DraftAgent>> = agents.into_iter().map(Some).collect();
    let mut next = Vec::with_capacity(target);

    for &idx in ranked.iter().take(keep) {
        if let Some(mut agent) = slots.get_mut(idx).and_then(Option::take) {
            agent.update_lifetime_stats();
            next.push(agent);
        }
    }

    for parent_pos in 0..breed.min(next.len()) {
        let child = next[parent_pos].reproduce(mutation_rate, Some(next_id), rng);
        next.push(child);
        next_id += 1;
    }

    // One newcomer regardless, then newcomers to fill out the roster of
    // agents (only reachable below the canonical population of eight)
    next.push(DraftAgent::new(next_id, rng));
    next_id += 1;
    while next.len() < target {
        next.push(DraftAgent::new(next_id, rng));
        next_id += 1;
    }

    next.truncate(target);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_population(count: u32, seed: u64) -> Vec<DraftAgent> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|id| {
                let mut agent = DraftAgent::new(id, &mut rng);
                // Seed distinct records so the ranking is meaningful
                agent.tournament_wins = count - id;
                agent.tournament_score = (count - id) * 10;
                agent
            })
            .collect()
    }

    #[test]
    fn test_population_of_eight_replaces_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let agents = make_population(8, 2);
        let ranked: Vec<usize> = (0..8).collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);

        assert_eq!(next.len(), 8);
        // Survivors keep their ids
        let ids: Vec<u32> = next.iter().map(|a| a.id).collect();
        assert_eq!(&ids[..4], &[0, 1, 2, 3]);
        // Children and newcomers take contiguous ids past the old maximum
        assert_eq!(&ids[4..], &[8, 9, 10, 11]);
    }

    #[test]
    fn test_survivors_roll_lifetime_stats_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let agents = make_population(8, 4);
        let ranked: Vec<usize> = (0..8).collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);

        // Top survivor had 8 wins this generation
        assert_eq!(next[0].lifetime_wins, 8);
        assert_eq!(next[0].lifetime_score, 80);
        assert_eq!(next[0].generations, 2);

        // Children start clean
        assert_eq!(next[4].lifetime_wins, 0);
        assert_eq!(next[4].generations, 1);
        assert_eq!(next[4].tournament_wins, 0);
    }

    #[test]
    fn test_ranking_order_drives_retention() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let agents = make_population(8, 6);
        // Reverse ranking: the worst four survive
        let ranked: Vec<usize> = (0..8).rev().collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);
        let ids: Vec<u32> = next.iter().take(4).map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4]);
    }

    #[test]
    fn test_children_names_follow_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let agents = make_population(8, 8);
        let ranked: Vec<usize> = (0..8).collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);
        assert_eq!(next[4].team.name, "Team 8");
        assert_eq!(next[5].team.name, "Team 9");
        assert_eq!(next[7].team.name, "Team 11");
    }

    #[test]
    fn test_children_carry_mutated_scorers() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let agents = make_population(8, 10);
        let parent_params = agents[0].scorer().params().to_vec();
        let ranked: Vec<usize> = (0..8).collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);

        // next[4] is next[0]'s child: close to the parent but not equal
        assert_ne!(next[4].scorer().params(), &parent_params[..]);
        for (a, b) in parent_params.iter().zip(next[4].scorer().params()) {
            assert!((a - b).abs() <= 0.1);
        }
    }

    #[test]
    fn test_large_population_fills_with_newcomers() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let agents = make_population(12, 12);
        let ranked: Vec<usize> = (0..12).collect();

        let next = next_generation(agents, &ranked, 0.1, &mut rng);
        assert_eq!(next.len(), 12);
        // 4 survivors + 3 children + 1 newcomer + 4 fills
        assert_eq!(next.iter().filter(|a| a.id >= 12).count(), 8);
        let new_ids: Vec<u32> = next.iter().skip(4).map(|a| a.id).collect();
        assert_eq!(new_ids, (12..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_tiny_population_stays_tiny() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let agents = make_population(2, 14);
        let ranked: Vec<usize> = vec![0, 1];

        let next = next_generation(agents, &ranked, 0.1, &mut rng);
        assert_eq!(next.len(), 2);
        // Retention outranks reproduction when slots run out
        assert_eq!(next[0].id, 0);
        assert_eq!(next[1].id, 1);
    }

    #[test]
    fn test_empty_population_stays_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let next = next_generation(Vec::new(), &[], 0.1, &mut rng);
        assert!(next.is_empty());
    }
}
