//! Console reporting - season summaries and player statistics
//!
//! Level 4 - Formatting utilities

use std::collections::HashMap;

use draftball_core::PlayerStatistics;
use draftball_tournament::{GenerationResult, RosterProvider, Tournament};

/// Totals for one agent id across every generation it appeared in
#[derive(Default)]
struct AgentTotals {
    wins: u32,
    score: u32,
    seasons: u32,
}

pub fn print_summary<P: RosterProvider>(
    history: &[GenerationResult],
    tournament: &Tournament<P>,
) {
    println!("\n=== Simulation Summary ===");
    println!("Generations completed: {}", history.len());

    print_agent_performance(history);
    print_final_generation(history, tournament);
    print_player_stats(tournament);
}

fn print_agent_performance(history: &[GenerationResult]) {
    let mut totals: HashMap<u32, AgentTotals> = HashMap::new();
    for result in history {
        for ranking in &result.rankings {
            let entry = totals.entry(ranking.agent_id).or_default();
            entry.wins += ranking.wins;
            entry.score += ranking.score;
            entry.seasons += 1;
        }
    }

    let mut rows: Vec<(u32, AgentTotals)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.wins.cmp(&a.1.wins));

    println!("\nTop agents by total wins:");
    for (pos, (id, totals)) in rows.iter().take(5).enumerate() {
        println!(
            "  {}. Agent {} - wins: {}, runs: {}, seasons: {}",
            pos + 1,
            id,
            totals.wins,
            totals.score,
            totals.seasons,
        );
    }
}

fn print_final_generation<P: RosterProvider>(
    history: &[GenerationResult],
    tournament: &Tournament<P>,
) {
    let Some(last) = history.last() else {
        return;
    };

    println!("\nFinal generation standings:");
    for (pos, ranking) in last.rankings.iter().enumerate() {
        println!(
            "  {}. {} - wins: {}, runs: {}",
            pos + 1,
            ranking.team_name,
            ranking.wins,
            ranking.score,
        );
    }

    let Some(winner) = last.rankings.first() else {
        return;
    };
    let Some(agent) = tournament.agents().iter().find(|a| a.id == winner.agent_id) else {
        return;
    };

    println!("\nWinning roster: {}", agent.team.name);
    let captain_id = agent.team.captain().map(|c| c.id);
    for (slot, player) in agent.team.players().iter().enumerate() {
        let marker = if captain_id == Some(player.id) { " *" } else { "" };
        println!(
            "  {}. {}{} - pitching {}, batting {}, fielding {}, running {}",
            slot + 1,
            player.name,
            marker,
            player.pitching,
            player.batting,
            player.fielding,
            player.running,
        );
    }
}

fn print_player_stats<P: RosterProvider>(tournament: &Tournament<P>) {
    let mut batters: Vec<&PlayerStatistics> = tournament
        .global_stats()
        .iter()
        .filter(|s| s.at_bats > 0)
        .collect();
    batters.sort_by(|a, b| b.runs.cmp(&a.runs));

    println!("\nTop batters by runs:");
    for (pos, stats) in batters.iter().take(10).enumerate() {
        println!(
            "  {}. {} - runs: {}, at-bats: {}, avg: {:.3}",
            pos + 1,
            stats.player_name,
            stats.runs,
            stats.at_bats,
            stats.runs_per_at_bat(),
        );
    }

    let mut pitchers: Vec<&PlayerStatistics> = tournament
        .global_stats()
        .iter()
        .filter(|s| s.innings_pitched > 0)
        .collect();
    pitchers.sort_by(|a, b| b.strikeouts.cmp(&a.strikeouts));

    println!("\nTop pitchers by strikeouts:");
    for (pos, stats) in pitchers.iter().take(10).enumerate() {
        println!(
            "  {}. {} - strikeouts: {}, innings: {}, K/IP: {:.2}",
            pos + 1,
            stats.player_name,
            stats.strikeouts,
            stats.innings_pitched,
            stats.strikeouts_per_inning(),
        );
    }
}
