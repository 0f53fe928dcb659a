//! Roster loading - the file-backed roster collaborator
//!
//! Level 4 - File I/O

use std::path::{Path, PathBuf};

use anyhow::Context;

use draftball_core::Player;
use draftball_tournament::RosterProvider;

/// Loads players from a JSON file on every draft.
///
/// Any read or parse failure degrades to an empty roster, logged at warn;
/// the season then runs with all-invalid teams instead of crashing.
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterProvider for FileRoster {
    fn load(&self) -> Vec<Player> {
        match load_players(&self.path) {
            Ok(players) => players,
            Err(err) => {
                tracing::warn!("failed to load roster {}: {:#}", self.path.display(), err);
                Vec::new()
            }
        }
    }
}

/// Strict loader for commands that cannot run without players
pub fn load_players(path: &Path) -> anyhow::Result<Vec<Player>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    let players: Vec<Player> = serde_json::from_str(&content)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    Ok(players)
}
