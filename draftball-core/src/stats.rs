//! Per-player statistics aggregation
//!
//! One shape serves three scopes: per-game, per-agent lifetime and
//! tournament-global. Scopes never share a map; each owns a `StatBook`
//! and books combine by field-wise addition.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::player::{Player, PlayerId};

/// Accumulated statistics for one player within one scope
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerStatistics {
    pub player_id: PlayerId,
    pub player_name: String,
    pub at_bats: u32,
    pub hits: u32,
    pub runs: u32,
    pub innings_pitched: u32,
    pub strikeouts: u32,
}

impl PlayerStatistics {
    pub fn zeroed(id: PlayerId, name: &str) -> Self {
        Self {
            player_id: id,
            player_name: name.to_string(),
            ..Default::default()
        }
    }

    /// Batting average proxy: runs per at-bat
    pub fn runs_per_at_bat(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            self.runs as f64 / self.at_bats as f64
        }
    }

    /// Strikeouts per inning pitched
    pub fn strikeouts_per_inning(&self) -> f64 {
        if self.innings_pitched == 0 {
            0.0
        } else {
            self.strikeouts as f64 / self.innings_pitched as f64
        }
    }

    fn absorb(&mut self, other: &PlayerStatistics) {
        self.at_bats += other.at_bats;
        self.hits += other.hits;
        self.runs += other.runs;
        self.innings_pitched += other.innings_pitched;
        self.strikeouts += other.strikeouts;
    }
}

/// An owned map of per-player statistics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatBook {
    entries: FxHashMap<PlayerId, PlayerStatistics>,
}

impl StatBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book with a zeroed entry for every given player
    pub fn seeded<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let entries = players
            .into_iter()
            .map(|p| (p.id, PlayerStatistics::zeroed(p.id, &p.name)))
            .collect();
        Self { entries }
    }

    /// Entry for a player, created zeroed on first sight
    pub fn entry(&mut self, player: &Player) -> &mut PlayerStatistics {
        self.entries
            .entry(player.id)
            .or_insert_with(|| PlayerStatistics::zeroed(player.id, &player.name))
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerStatistics> {
        self.entries.get(&id)
    }

    /// Field-wise addition of another book; unseen players are copied in
    pub fn merge(&mut self, other: &StatBook) {
        for (id, stats) in &other.entries {
            match self.entries.get_mut(id) {
                Some(existing) => existing.absorb(stats),
                None => {
                    self.entries.insert(*id, stats.clone());
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerStatistics> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
