//! Game simulation - the at-bat/inning/game state machine
//!
//! A game is nine innings of two half-innings each; a half-inning is a run
//! of at-bats against the defending side's designated pitcher until three
//! outs. Lineup cursors persist across innings within a game and wrap
//! around the batting order. Ties after nine innings get up to three extra
//! innings, then a coin flip worth exactly one run.

use rand::Rng;
use thiserror::Error;

use crate::player::{Player, Team};
use crate::stats::StatBook;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Regulation innings per game
pub const REGULATION_INNINGS: u32 = 9;

/// Extra innings played before a stuck tie goes to the coin
pub const MAX_EXTRA_INNINGS: u32 = 3;

/// Outs that end a half-inning
const OUTS_PER_HALF: u32 = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side of the matchup; the away side bats first in every inning
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    /// A team arrived without a full nine or a captain
    #[error("invalid team: {0} must have 9 players and a captain")]
    InvalidTeam(String),
}

/// What the batter did with a hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HitType {
    Single,
    Double,
    Triple,
    HomeRun,
}

/// Occupancy of the three bases
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Bases {
    first: bool,
    second: bool,
    third: bool,
}

impl Bases {
    fn occupied(self) -> u32 {
        self.first as u32 + self.second as u32 + self.third as u32
    }

    /// Advance runners for a hit, returning the runs that score
    fn apply_hit(&mut self, hit: HitType) -> u32 {
        match hit {
            HitType::HomeRun => {
                // Everyone on base scores, and so does the batter
                let runs = self.occupied() + 1;
                *self = Bases::default();
                runs
            }
            HitType::Triple => {
                let runs = self.occupied();
                *self = Bases {
                    first: false,
                    second: false,
                    third: true,
                };
                runs
            }
            HitType::Double => {
                let runs = self.second as u32 + self.third as u32;
                *self = Bases {
                    first: false,
                    second: true,
                    third: self.first,
                };
                runs
            }
            HitType::Single => {
                let runs = self.third as u32;
                *self = Bases {
                    first: true,
                    second: self.first,
                    third: self.second,
                };
                runs
            }
        }
    }
}

/// Final state of a simulated game
#[derive(Clone, Debug, PartialEq)]
pub struct GameOutcome {
    pub winner: Side,
    pub away_score: u32,
    pub home_score: u32,
    /// Innings played, including extras
    pub innings: u32,
    /// Per-game statistics, owned by the caller from here on
    pub stats: StatBook,
}

impl GameOutcome {
    pub fn winning_score(&self) -> u32 {
        self.away_score.max(self.home_score)
    }

    pub fn losing_score(&self) -> u32 {
        self.away_score.min(self.home_score)
    }
}

// ============================================================================
// GAME SIMULATION
// ============================================================================

/// Simulate one full game between two valid teams.
///
/// # Errors
/// `GameError::InvalidTeam` if either team fails `is_valid()`. This is a
/// precondition failure, not a retryable outcome.
pub fn simulate_game<R: Rng>(
    away: &Team,
    home: &Team,
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    if !away.is_valid() {
        return Err(GameError::InvalidTeam(away.name.clone()));
    }
    if !home.is_valid() {
        return Err(GameError::InvalidTeam(home.name.clone()));
    }

    let mut stats = StatBook::new();
    // Lineup positions persist across innings, reset only per game
    let mut away_cursor = 0usize;
    let mut home_cursor = 0usize;

    let mut away_score = 0u32;
    let mut home_score = 0u32;
    let mut innings = 0u32;

    for _ in 0..REGULATION_INNINGS {
        innings += 1;
        away_score += play_half_inning(away, home, &mut away_cursor, &mut stats, rng);
        home_score += play_half_inning(home, away, &mut home_cursor, &mut stats, rng);
    }

    let mut extra = 0u32;
    while away_score == home_score && extra < MAX_EXTRA_INNINGS {
        innings += 1;
        extra += 1;
        away_score += play_half_inning(away, home, &mut away_cursor, &mut stats, rng);
        home_score += play_half_inning(home, away, &mut home_cursor, &mut stats, rng);
    }

    // Still level after twelve: a fair coin awards one run over the tie
    let winner = if away_score > home_score {
        Side::Away
    } else if home_score > away_score {
        Side::Home
    } else if rng.gen_bool(0.5) {
        away_score += 1;
        Side::Away
    } else {
        home_score += 1;
        Side::Home
    };

    Ok(GameOutcome {
        winner,
        away_score,
        home_score,
        innings,
        stats,
    })
}

// ============================================================================
// HALF-INNING
// ============================================================================

/// Run one half-inning, returning the runs scored by the batting side
fn play_half_inning<R: Rng>(
    batting: &Team,
    defending: &Team,
    cursor: &mut usize,
    stats: &mut StatBook,
    rng: &mut R,
) -> u32 {
    let pitcher = designated_pitcher(defending);
    let fielding_strength = defending.stats().fielding;
    let lineup = batting.players();

    let mut bases = Bases::default();
    let mut outs = 0u32;
    let mut runs = 0u32;

    while outs < OUTS_PER_HALF {
        let batter = &lineup[*cursor % lineup.len()];
        *cursor += 1;
        stats.entry(batter).at_bats += 1;

        if rng.gen::<f64>() < hit_probability(batter.batting, pitcher.pitching) {
            let hit = draw_hit_type(batter.batting, fielding_strength, rng);
            let scored = bases.apply_hit(hit);
            runs += scored;

            // Bases hold no identity, so the batter is credited with
            // everything the hit drove in
            let entry = stats.entry(batter);
            entry.hits += 1;
            entry.runs += scored;
        } else {
            outs += 1;
            stats.entry(pitcher).strikeouts += 1;
        }
    }

    stats.entry(pitcher).innings_pitched += 1;
    runs
}

/// The defending player with the highest pitching skill; ties keep the
/// earliest in the batting order
fn designated_pitcher(team: &Team) -> &Player {
    let players = team.players();
    let mut best = &players[0];
    for player in &players[1..] {
        if player.pitching > best.pitching {
            best = player;
        }
    }
    best
}

/// Chance the batter reaches base, clamped to [0.1, 0.5]
fn hit_probability(batting: u8, pitching: u8) -> f64 {
    let raw = 0.3 + (batting as f64 - 0.8 * pitching as f64) / 100.0;
    raw.clamp(0.1, 0.5)
}

/// Draw the hit type. Strong batting against weak fielding raises the power
/// factor, shrinking the single band and pushing mass toward extra bases.
/// The bands do not renormalize to 1.
fn draw_hit_type<R: Rng>(batting: u8, fielding_strength: f64, rng: &mut R) -> HitType {
    let power = batting as f64 / (0.5 * fielding_strength);
    let draw = rng.gen::<f64>();

    if draw < 0.6 / power {
        HitType::Single
    } else if draw < 0.85 - 0.05 * power {
        HitType::Double
    } else if draw < 0.95 - 0.02 * power {
        HitType::Triple
    } else {
        HitType::HomeRun
    }
}
