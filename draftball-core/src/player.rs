//! Players and teams
//!
//! A `Player` is an immutable record supplied by the roster collaborator.
//! A `Team` is the mutable nine-slot container an agent drafts into;
//! insertion order is the batting order.

use serde::{Deserialize, Serialize};

/// Players per complete team; also the number of draft rounds
pub const TEAM_SIZE: usize = 9;

/// Skill ratings run 0..=10
pub const MAX_SKILL: u8 = 10;

/// Unique, stable player identifier
pub type PlayerId = u32;

/// An immutable player record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub pitching: u8,
    pub batting: u8,
    pub fielding: u8,
    pub running: u8,
    /// Display image reference, carried through from the roster file
    #[serde(default)]
    pub image: String,
    pub is_captain: bool,
}

/// Per-skill averages across a team
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub pitching: f64,
    pub batting: f64,
    pub fielding: f64,
    pub running: f64,
}

/// A drafted team
#[derive(Clone, Debug)]
pub struct Team {
    pub name: String,
    players: Vec<Player>,
    captain: Option<PlayerId>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::with_capacity(TEAM_SIZE),
            captain: None,
        }
    }

    /// Add a player to the batting order. Rejects once the roster holds nine.
    ///
    /// The first captain-eligible player added becomes the captain and stays
    /// captain for the life of the team.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.players.len() >= TEAM_SIZE {
            return false;
        }

        if player.is_captain && self.captain.is_none() {
            self.captain = Some(player.id);
        }

        self.players.push(player);
        true
    }

    /// Batting order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn captain(&self) -> Option<&Player> {
        self.captain
            .and_then(|id| self.players.iter().find(|p| p.id == id))
    }

    /// Ready to play: a full nine and a captain
    pub fn is_valid(&self) -> bool {
        self.players.len() == TEAM_SIZE && self.captain.is_some()
    }

    /// Average skills across the roster. All zeros for an empty team.
    pub fn stats(&self) -> TeamStats {
        if self.players.is_empty() {
            return TeamStats::default();
        }

        let mut stats = TeamStats::default();
        for player in &self.players {
            stats.pitching += player.pitching as f64;
            stats.batting += player.batting as f64;
            stats.fielding += player.fielding as f64;
            stats.running += player.running as f64;
        }

        let count = self.players.len() as f64;
        TeamStats {
            pitching: stats.pitching / count,
            batting: stats.batting / count,
            fielding: stats.fielding / count,
            running: stats.running / count,
        }
    }
}
