use rand::Rng;

use crate::core::{
    common::{CellState, GameError, PlacementOutcome, ShotOutcome},
    config::GameConfig,
    grid::Grid,
    placement::{self, ShipPlacer},
    ship::{Fleet, Orientation},
    shot,
};

/// Phase of a game. Only `SettingShips -> Playing` is gated; the win states
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SettingShips,
    Playing,
    /// We sank the whole enemy fleet.
    PlayerWon,
    /// The remote peer sank our fleet, or the session was lost.
    OpponentWon,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::PlayerWon | SessionState::OpponentWon)
    }
}

/// Game state owned by one player: their own grid, their view of the
/// opponent's grid and the fleet bookkeeping.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    own: Grid,
    view: Grid,
    fleet: Fleet,
    placer: ShipPlacer,
    state: SessionState,
    ships_lost: usize,
    enemy_ships_sunk: usize,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::build(GameConfig::default())
    }
}

impl GameEngine {
    /// Create a fresh engine in `SettingShips` after validating `config`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        Self {
            own: Grid::new(config.rows, config.cols),
            view: Grid::new(config.rows, config.cols),
            fleet: Fleet::from_config(&config.fleet),
            placer: ShipPlacer::new(),
            state: SessionState::SettingShips,
            ships_lost: 0,
            enemy_ships_sunk: 0,
            config,
        }
    }

    /// Throw away all state and go back to ship placement.
    pub fn restart(&mut self) {
        *self = Self::build(self.config);
        log::info!("game restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Our own grid with real ship positions.
    pub fn own_grid(&self) -> &Grid {
        &self.own
    }

    /// What our shots have revealed of the opponent's grid.
    pub fn enemy_view(&self) -> &Grid {
        &self.view
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Our ships sunk so far.
    pub fn ships_lost(&self) -> usize {
        self.ships_lost
    }

    /// Enemy ships we have sunk so far.
    pub fn enemy_ships_sunk(&self) -> usize {
        self.enemy_ships_sunk
    }

    fn require(&self, expected: SessionState) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.state,
            })
        }
    }

    fn rebuild_halo(&mut self) {
        placement::remove_forbidden_squares(&mut self.own);
        placement::set_forbidden_squares(&mut self.own);
    }

    /// Forward a setup click to the placement flow.
    pub fn setup_click(&mut self, row: usize, col: usize) -> Result<PlacementOutcome, GameError> {
        self.require(SessionState::SettingShips)?;
        Ok(self.placer.click(&mut self.own, &mut self.fleet, row, col))
    }

    /// Place the next unplaced ship directly from its canonical origin.
    pub fn place_next(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<PlacementOutcome, GameError> {
        self.require(SessionState::SettingShips)?;
        self.placer.cancel(&mut self.own);
        let Some(idx) = self.fleet.next_unplaced() else {
            return Ok(PlacementOutcome::Failed);
        };
        let length = self.fleet.ships()[idx].length();
        let outcome = if placement::set_ship(&mut self.own, length, orientation, row, col) {
            self.fleet.mark_placed((row, col));
            PlacementOutcome::ShipPlaced {
                origin: (row, col),
                length,
            }
        } else {
            PlacementOutcome::Failed
        };
        self.rebuild_halo();
        Ok(outcome)
    }

    /// Remove the ship covering (`row`, `col`), whichever of its cells is given.
    /// Cells that hold no ship, including ones off the grid, yield `Failed`.
    pub fn remove_ship_at(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<PlacementOutcome, GameError> {
        self.require(SessionState::SettingShips)?;
        if self.own.probe(row, col) != CellState::Ship {
            return Ok(PlacementOutcome::Failed);
        }
        self.placer.cancel(&mut self.own);
        let origin = placement::canonical_origin(&self.own, row, col);
        let outcome = if placement::remove_ship(&mut self.own, origin.0, origin.1) {
            self.fleet.mark_removed(origin);
            PlacementOutcome::ShipRemoved { origin }
        } else {
            PlacementOutcome::Failed
        };
        self.rebuild_halo();
        Ok(outcome)
    }

    /// Fill in every ship not yet placed at random legal positions.
    pub fn place_fleet_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.require(SessionState::SettingShips)?;
        self.placer.cancel(&mut self.own);
        placement::place_fleet_randomly(&mut self.own, &mut self.fleet, rng)
    }

    /// Whether every ship of the fleet has a position.
    pub fn is_ready(&self) -> bool {
        self.fleet.all_placed()
    }

    /// Leave setup: drop arrows and the halo and enter `Playing`.
    pub fn start_playing(&mut self) -> Result<(), GameError> {
        self.require(SessionState::SettingShips)?;
        if !self.fleet.all_placed() {
            return Err(GameError::FleetIncomplete);
        }
        self.placer.cancel(&mut self.own);
        placement::remove_forbidden_squares(&mut self.own);
        self.state = SessionState::Playing;
        log::info!("all {} ships placed, entering play", self.fleet.len());
        Ok(())
    }

    /// Whether firing at (`row`, `col`) on the opponent could change anything.
    pub fn can_target(&self, row: usize, col: usize) -> bool {
        matches!(self.view.get(row, col), Ok(state) if !state.is_resolved())
    }

    /// Resolve an inbound shot against our own grid.
    pub fn receive_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GameError> {
        self.require(SessionState::Playing)?;
        let outcome = shot::resolve_shot(&mut self.own, row, col);
        if outcome == ShotOutcome::Sunk {
            self.ships_lost += 1;
            if self.ships_lost >= self.fleet.len() {
                self.state = SessionState::OpponentWon;
                log::info!("our last ship was sunk");
            }
        }
        log::debug!("opponent fired at ({}, {}): {:?}", row, col, outcome);
        Ok(outcome)
    }

    /// Record the opponent's reply to one of our shots.
    pub fn record_shot_result(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), GameError> {
        self.require(SessionState::Playing)?;
        shot::record_on_view(&mut self.view, row, col, outcome)?;
        if outcome == ShotOutcome::Sunk {
            self.enemy_ships_sunk += 1;
            if self.enemy_ships_sunk >= self.fleet.len() {
                self.state = SessionState::PlayerWon;
                log::info!("enemy fleet destroyed");
            }
        }
        log::debug!("our shot at ({}, {}): {:?}", row, col, outcome);
        Ok(())
    }

    /// The connection is gone: a game still running counts as lost.
    pub fn connection_lost(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::OpponentWon;
        }
    }
}
