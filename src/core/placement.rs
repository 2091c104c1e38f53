//! Ship placement during setup: line fitting, commit/removal, the forbidden
//! halo and the click-driven placement flow.

use alloc::vec::Vec;
use rand::Rng;

use super::common::{CellState, Direction, GameError, PlacementOutcome};
use super::grid::Grid;
use super::ship::{Fleet, Orientation};

fn forward(orientation: Orientation) -> Direction {
    match orientation {
        Orientation::Horizontal => Direction::Right,
        Orientation::Vertical => Direction::Down,
    }
}

/// True when the `length` cells starting at (`row`, `col`) and extending
/// towards increasing index are all in bounds and `Water`.
pub fn is_settable(
    grid: &Grid,
    length: usize,
    orientation: Orientation,
    row: usize,
    col: usize,
) -> bool {
    if length == 0 {
        return false;
    }
    let dir = forward(orientation);
    (0..length).all(|i| match dir.step(row, col, i) {
        Some((r, c)) => grid.get(r, c) == Ok(CellState::Water),
        None => false,
    })
}

/// Commit a ship after re-validating it. Returns `false` without touching the
/// grid when it does not fit.
pub fn set_ship(
    grid: &mut Grid,
    length: usize,
    orientation: Orientation,
    row: usize,
    col: usize,
) -> bool {
    if !is_settable(grid, length, orientation, row, col) {
        return false;
    }
    let dir = forward(orientation);
    for i in 0..length {
        if let Some((r, c)) = dir.step(row, col, i) {
            if grid.set(r, c, CellState::Ship).is_err() {
                return false;
            }
        }
    }
    true
}

/// Remove the ship whose canonical origin is (`row`, `col`).
///
/// Fails when the cell is not a ship or another ship cell sits directly above
/// or to the left of it.
pub fn remove_ship(grid: &mut Grid, row: usize, col: usize) -> bool {
    if grid.probe(row, col) != CellState::Ship {
        return false;
    }
    let ship_above = row > 0 && grid.probe(row - 1, col) == CellState::Ship;
    let ship_left = col > 0 && grid.probe(row, col - 1) == CellState::Ship;
    if ship_above || ship_left {
        return false;
    }

    let dir = if grid.probe(row, col.saturating_add(1)) == CellState::Ship {
        Direction::Right
    } else {
        Direction::Down
    };
    let mut distance = 0;
    while let Some((r, c)) = dir.step(row, col, distance) {
        if grid.probe(r, c) != CellState::Ship {
            break;
        }
        let _ = grid.set(r, c, CellState::Water);
        distance += 1;
    }
    true
}

/// Walk up and left from a ship cell to the ship's top-left-most cell.
pub fn canonical_origin(grid: &Grid, mut row: usize, mut col: usize) -> (usize, usize) {
    loop {
        if row > 0 && grid.probe(row - 1, col) == CellState::Ship {
            row -= 1;
        } else if col > 0 && grid.probe(row, col - 1) == CellState::Ship {
            col -= 1;
        } else {
            return (row, col);
        }
    }
}

/// Mark every non-ship cell in the Moore neighbourhood of a ship `Forbidden`.
pub fn set_forbidden_squares(grid: &mut Grid) {
    let ship_cells: Vec<(usize, usize)> = grid
        .cells()
        .filter(|&(_, state)| state == CellState::Ship)
        .map(|(coord, _)| coord)
        .collect();
    for (row, col) in ship_cells {
        let halo: Vec<(usize, usize)> = grid.neighbors(row, col).collect();
        for (r, c) in halo {
            if grid.probe(r, c) != CellState::Ship {
                let _ = grid.set(r, c, CellState::Forbidden);
            }
        }
    }
}

/// Turn every `Forbidden` cell back into `Water`.
pub fn remove_forbidden_squares(grid: &mut Grid) {
    grid.replace_where(|s| s == CellState::Forbidden, CellState::Water);
}

/// Turn every placement arrow back into `Water`.
pub fn clear_arrows(grid: &mut Grid) {
    grid.replace_where(CellState::is_arrow, CellState::Water);
}

/// Where a ship of `length` would start if laid from (`row`, `col`) towards
/// `dir`, provided it fits. Up and left are checked from the far end.
pub fn fits(
    grid: &Grid,
    length: usize,
    row: usize,
    col: usize,
    dir: Direction,
) -> Option<((usize, usize), Orientation)> {
    let back = length.checked_sub(1)?;
    let (origin, orientation) = match dir {
        Direction::Right => ((row, col), Orientation::Horizontal),
        Direction::Down => ((row, col), Orientation::Vertical),
        Direction::Up => ((row.checked_sub(back)?, col), Orientation::Vertical),
        Direction::Left => ((row, col.checked_sub(back)?), Orientation::Horizontal),
    };
    is_settable(grid, length, orientation, origin.0, origin.1).then_some((origin, orientation))
}

/// Click-driven placement: pick a start cell, then one of the offered arrows.
#[derive(Debug, Clone, Default)]
pub struct ShipPlacer {
    pending: Option<(usize, usize)>,
}

impl ShipPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any placement in progress and its arrows.
    pub fn cancel(&mut self, grid: &mut Grid) {
        self.pending = None;
        clear_arrows(grid);
    }

    /// Handle a click on (`row`, `col`) and rebuild the halo afterwards.
    pub fn click(
        &mut self,
        grid: &mut Grid,
        fleet: &mut Fleet,
        row: usize,
        col: usize,
    ) -> PlacementOutcome {
        let outcome = self.handle(grid, fleet, row, col);
        remove_forbidden_squares(grid);
        set_forbidden_squares(grid);
        outcome
    }

    fn handle(
        &mut self,
        grid: &mut Grid,
        fleet: &mut Fleet,
        row: usize,
        col: usize,
    ) -> PlacementOutcome {
        if !grid.in_bounds(row, col) {
            return PlacementOutcome::Failed;
        }

        if let Some((start_row, start_col)) = self.pending {
            if (row, col) == (start_row, start_col) {
                self.cancel(grid);
                return PlacementOutcome::Failed;
            }
            let Some(dir) = Direction::from_arrow(grid.probe(row, col)) else {
                return PlacementOutcome::Failed;
            };
            self.cancel(grid);
            let Some(idx) = fleet.next_unplaced() else {
                return PlacementOutcome::Failed;
            };
            let length = fleet.ships()[idx].length();
            let Some(((r, c), orientation)) = fits(grid, length, start_row, start_col, dir) else {
                return PlacementOutcome::Failed;
            };
            if !set_ship(grid, length, orientation, r, c) {
                return PlacementOutcome::Failed;
            }
            fleet.mark_placed((r, c));
            log::debug!("placed {}-cell ship at ({}, {}) {:?}", length, r, c, orientation);
            return PlacementOutcome::ShipPlaced { origin: (r, c), length };
        }

        if grid.probe(row, col) == CellState::Ship {
            let origin = canonical_origin(grid, row, col);
            if remove_ship(grid, origin.0, origin.1) {
                fleet.mark_removed(origin);
                log::debug!("removed ship at {:?}", origin);
                return PlacementOutcome::ShipRemoved { origin };
            }
            return PlacementOutcome::Failed;
        }

        let Some(idx) = fleet.next_unplaced() else {
            return PlacementOutcome::Failed;
        };
        let length = fleet.ships()[idx].length();
        let directions: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| fits(grid, length, row, col, d).is_some())
            .filter(|&d| d.step(row, col, 1).is_some_and(|(r, c)| grid.in_bounds(r, c)))
            .collect();
        if directions.is_empty() {
            return PlacementOutcome::Failed;
        }
        for &d in &directions {
            if let Some((r, c)) = d.step(row, col, 1) {
                let _ = grid.set(r, c, d.arrow());
            }
        }
        self.pending = Some((row, col));
        PlacementOutcome::PlacementStarted {
            origin: (row, col),
            directions,
        }
    }
}

/// Place every unplaced ship at a uniformly chosen legal position, keeping the
/// halo between ships.
pub fn place_fleet_randomly<R: Rng>(
    grid: &mut Grid,
    fleet: &mut Fleet,
    rng: &mut R,
) -> Result<(), GameError> {
    clear_arrows(grid);
    set_forbidden_squares(grid);
    while let Some(idx) = fleet.next_unplaced() {
        let length = fleet.ships()[idx].length();
        let mut candidates = Vec::new();
        for ((row, col), _) in grid.cells() {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                if is_settable(grid, length, orientation, row, col) {
                    candidates.push((row, col, orientation));
                }
            }
        }
        if candidates.is_empty() {
            return Err(GameError::UnableToPlaceShip);
        }
        let (row, col, orientation) = candidates[rng.random_range(0..candidates.len())];
        if !set_ship(grid, length, orientation, row, col) {
            return Err(GameError::UnableToPlaceShip);
        }
        fleet.mark_placed((row, col));
        set_forbidden_squares(grid);
    }
    Ok(())
}
