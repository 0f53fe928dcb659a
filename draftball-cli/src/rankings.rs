//! Rankings command - rank players by win contribution
//!
//! Runs many independent single-season tournaments with fresh random
//! agents and accumulates how many wins each player's rosters collected.
//! A player who keeps landing on winning teams rises regardless of which
//! agent drafted them.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use draftball_core::{Player, PlayerId};
use draftball_evolve::DraftAgent;
use draftball_tournament::{Tournament, TournamentConfig};

use crate::roster;

#[derive(Args)]
pub struct RankingsArgs {
    /// Roster JSON file
    #[arg(long, default_value = "data/roster.json")]
    pub roster: PathBuf,

    /// Independent seasons to simulate
    #[arg(long, default_value = "1000")]
    pub iterations: usize,

    /// Agents per season
    #[arg(long, default_value = "8")]
    pub population: usize,
}

struct PlayerRanking {
    id: PlayerId,
    name: String,
    wins: u32,
    appearances: u32,
    win_rate: f64,
}

pub fn run(args: RankingsArgs, seed: Option<u64>) -> Result<()> {
    // Rankings are meaningless without players, so this command loads
    // strictly instead of degrading
    let players = roster::load_players(&args.roster)?;
    anyhow::ensure!(
        !players.is_empty(),
        "roster {} has no players",
        args.roster.display()
    );

    tracing::info!(
        "ranking {} players over {} seasons",
        players.len(),
        args.iterations,
    );

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut wins: HashMap<PlayerId, u32> = players.iter().map(|p| (p.id, 0)).collect();
    let mut appearances: HashMap<PlayerId, u32> = players.iter().map(|p| (p.id, 0)).collect();

    let bar = ProgressBar::new(args.iterations as u64);
    for _ in 0..args.iterations {
        let agents: Vec<DraftAgent> = (0..args.population)
            .map(|id| DraftAgent::new(id as u32, &mut rng))
            .collect();
        let pool = players.clone();
        let mut tournament =
            Tournament::new(agents, move || pool.clone(), TournamentConfig::default());

        tournament.run_generation(&mut rng);

        for agent in tournament.agents() {
            for player in agent.team.players() {
                *wins.entry(player.id).or_default() += agent.tournament_wins;
                *appearances.entry(player.id).or_default() += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let rankings = build_rankings(&players, &wins, &appearances, args.population);
    print_rankings(&players, &rankings);

    Ok(())
}

fn build_rankings(
    players: &[Player],
    wins: &HashMap<PlayerId, u32>,
    appearances: &HashMap<PlayerId, u32>,
    population: usize,
) -> Vec<PlayerRanking> {
    // A team plays at most population - 1 games per season, which bounds
    // the wins one appearance can contribute
    let max_wins_per_season = population.saturating_sub(1).max(1) as f64;

    let mut rankings: Vec<PlayerRanking> = players
        .iter()
        .map(|player| {
            let wins = wins.get(&player.id).copied().unwrap_or(0);
            let appearances = appearances.get(&player.id).copied().unwrap_or(0);
            let win_rate = if appearances > 0 {
                (wins as f64 / appearances as f64) / max_wins_per_season
            } else {
                0.0
            };
            PlayerRanking {
                id: player.id,
                name: player.name.clone(),
                wins,
                appearances,
                win_rate,
            }
        })
        .collect();

    // Wins first, win rate as the tiebreak
    rankings.sort_by(|a, b| {
        b.wins.cmp(&a.wins).then_with(|| {
            b.win_rate
                .partial_cmp(&a.win_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    rankings
}

fn print_rankings(players: &[Player], rankings: &[PlayerRanking]) {
    println!("Rank | Player               |  Wins | Seasons | Win Rate");
    println!("-----|----------------------|------:|--------:|---------:");
    for (pos, ranking) in rankings.iter().enumerate() {
        println!(
            "{:>4} | {:<20} | {:>5} | {:>7} | {:>7.2}%",
            pos + 1,
            ranking.name,
            ranking.wins,
            ranking.appearances,
            ranking.win_rate * 100.0,
        );
    }

    println!("\nTop 10 players:");
    for (pos, ranking) in rankings.iter().take(10).enumerate() {
        if let Some(player) = players.iter().find(|p| p.id == ranking.id) {
            let captain = if player.is_captain { " (captain)" } else { "" };
            println!(
                "{}. {}{} - pitching {}, batting {}, fielding {}, running {}",
                pos + 1,
                player.name,
                captain,
                player.pitching,
                player.batting,
                player.fielding,
                player.running,
            );
        }
    }
}
