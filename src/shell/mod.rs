//! The outer shell driving a session.
//!
//! A shell supplies target coordinates and is told about every outcome so it
//! can redraw. Implementations:
//! - CliShell: line-oriented terminal front end
//! - ScriptedShell: fires a fixed list of targets, for automation and tests

use crate::core::{GameEngine, SessionState, ShotOutcome};

/// Interface implemented by the front ends.
#[async_trait::async_trait]
pub trait Shell: Send {
    /// Choose the next cell to fire at on the opponent's grid. `None` forfeits.
    async fn choose_target(&mut self, engine: &GameEngine) -> Option<(usize, usize)>;

    /// Our shot at `coord` came back with `outcome`.
    fn shot_resolved(&mut self, _coord: (usize, usize), _outcome: ShotOutcome) {}

    /// The opponent fired at `coord` on our grid.
    fn incoming_shot(&mut self, _coord: (usize, usize), _outcome: ShotOutcome) {}

    /// The session has ended in `state`.
    fn game_over(&mut self, _state: SessionState) {}
}

pub mod cli;
pub use cli::CliShell;

pub mod scripted;
pub use scripted::{ScriptedShell, ShellEvent};
