//! Common types for the engine: cell states, shot and placement outcomes, errors.

use core::fmt;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Open water.
    #[default]
    Water,
    /// Part of a ship that has not been shot.
    Ship,
    /// Part of a ship that has been shot.
    Hit,
    /// Water that has been shot at.
    Miss,
    /// Part of a sunken ship.
    Sunk,
    /// Water next to a placed ship where no other ship may start.
    Forbidden,
    /// Placement marker: the pending ship can extend upwards.
    ArrowUp,
    /// Placement marker: the pending ship can extend downwards.
    ArrowDown,
    /// Placement marker: the pending ship can extend to the left.
    ArrowLeft,
    /// Placement marker: the pending ship can extend to the right.
    ArrowRight,
}

impl CellState {
    /// Whether this is one of the transient placement arrows.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            CellState::ArrowUp | CellState::ArrowDown | CellState::ArrowLeft | CellState::ArrowRight
        )
    }

    /// Whether a shot has already been resolved at this cell.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Sunk)
    }

    /// Single character used by the text rendering.
    pub fn symbol(self) -> char {
        match self {
            CellState::Water => '.',
            CellState::Ship => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'o',
            CellState::Sunk => '#',
            CellState::Forbidden => '-',
            CellState::ArrowUp => '^',
            CellState::ArrowDown => 'v',
            CellState::ArrowLeft => '<',
            CellState::ArrowRight => '>',
        }
    }
}

/// Axis direction on the grid, also used for the placement arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Step `distance` cells from (`row`, `col`). `None` when the step leaves
    /// the non-negative quadrant.
    pub fn step(self, row: usize, col: usize, distance: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Up => row.checked_sub(distance).map(|r| (r, col)),
            Direction::Down => row.checked_add(distance).map(|r| (r, col)),
            Direction::Left => col.checked_sub(distance).map(|c| (row, c)),
            Direction::Right => col.checked_add(distance).map(|c| (row, c)),
        }
    }

    /// The placement marker drawn for this direction.
    pub fn arrow(self) -> CellState {
        match self {
            Direction::Up => CellState::ArrowUp,
            Direction::Down => CellState::ArrowDown,
            Direction::Left => CellState::ArrowLeft,
            Direction::Right => CellState::ArrowRight,
        }
    }

    /// Inverse of [`Direction::arrow`].
    pub fn from_arrow(cell: CellState) -> Option<Self> {
        match cell {
            CellState::ArrowUp => Some(Direction::Up),
            CellState::ArrowDown => Some(Direction::Down),
            CellState::ArrowLeft => Some(Direction::Left),
            CellState::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A ship segment was hit but the ship is still afloat.
    Hit,
    /// Nothing but water.
    Miss,
    /// The hit completed a ship.
    Sunk,
    /// The cell was already resolved or lies outside the grid.
    Forbidden,
}

impl ShotOutcome {
    /// Whether the shooter keeps the turn after this outcome.
    pub fn keeps_turn(self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// What a setup click did, for the shell to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A ship was committed with its canonical origin.
    ShipPlaced {
        origin: (usize, usize),
        length: usize,
    },
    /// A start cell was chosen; arrows show the directions that fit.
    PlacementStarted {
        origin: (usize, usize),
        directions: alloc::vec::Vec<Direction>,
    },
    /// The ship with this canonical origin was taken off the grid.
    ShipRemoved { origin: (usize, usize) },
    /// Nothing changed (or a pending placement was cancelled).
    Failed,
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate lies outside the configured grid.
    OutOfBounds { row: usize, col: usize },
    /// The target cell was already resolved.
    IllegalReshoot { row: usize, col: usize },
    /// Operation is not valid in the current session state.
    WrongPhase {
        expected: crate::core::game::SessionState,
        actual: crate::core::game::SessionState,
    },
    /// Play cannot start until every ship is placed.
    FleetIncomplete,
    /// The configuration cannot be used.
    InvalidConfig(&'static str),
    /// Random placement gave up.
    UnableToPlaceShip,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the grid", row, col)
            }
            GameError::IllegalReshoot { row, col } => {
                write!(f, "Cell ({}, {}) has already been shot", row, col)
            }
            GameError::WrongPhase { expected, actual } => {
                write!(f, "Operation requires {:?} but session is {:?}", expected, actual)
            }
            GameError::FleetIncomplete => write!(f, "Not all ships have been placed"),
            GameError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            GameError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
