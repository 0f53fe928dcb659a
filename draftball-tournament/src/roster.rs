//! Roster collaborator interface
//!
//! Level 4 - External interface

use draftball_core::Player;

/// Supplies the full player pool on demand.
///
/// A provider that fails should come back with an empty list; the engine
/// runs on whatever it gets, down to nothing at all.
pub trait RosterProvider {
    fn load(&self) -> Vec<Player>;
}

impl<F> RosterProvider for F
where
    F: Fn() -> Vec<Player>,
{
    fn load(&self) -> Vec<Player> {
        self()
    }
}
