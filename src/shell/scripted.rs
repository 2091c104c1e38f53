use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::{GameEngine, SessionState, ShotOutcome};
use crate::shell::Shell;

/// Something a [`ScriptedShell`] was told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Fired((usize, usize), ShotOutcome),
    Received((usize, usize), ShotOutcome),
    GameOver(SessionState),
}

/// Fires the queued targets in order and records what happens.
///
/// Once the queue is empty it either forfeits or, with
/// [`ScriptedShell::stall_when_empty`], waits forever.
pub struct ScriptedShell {
    targets: VecDeque<(usize, usize)>,
    events: Arc<Mutex<Vec<ShellEvent>>>,
    stall: bool,
}

impl ScriptedShell {
    pub fn new<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self {
            targets: targets.into_iter().collect(),
            events: Arc::new(Mutex::new(Vec::new())),
            stall: false,
        }
    }

    /// Never forfeit; hang once the script runs out.
    pub fn stall_when_empty(mut self) -> Self {
        self.stall = true;
        self
    }

    /// Shared handle to the recorded events, readable after the shell moved
    /// into a session.
    pub fn events(&self) -> Arc<Mutex<Vec<ShellEvent>>> {
        Arc::clone(&self.events)
    }

    fn push(&self, event: ShellEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait::async_trait]
impl Shell for ScriptedShell {
    async fn choose_target(&mut self, _engine: &GameEngine) -> Option<(usize, usize)> {
        match self.targets.pop_front() {
            Some(target) => Some(target),
            None if self.stall => std::future::pending().await,
            None => None,
        }
    }

    fn shot_resolved(&mut self, coord: (usize, usize), outcome: ShotOutcome) {
        self.push(ShellEvent::Fired(coord, outcome));
    }

    fn incoming_shot(&mut self, coord: (usize, usize), outcome: ShotOutcome) {
        self.push(ShellEvent::Received(coord, outcome));
    }

    fn game_over(&mut self, state: SessionState) {
        self.push(ShellEvent::GameOver(state));
    }
}
