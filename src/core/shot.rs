//! Shot resolution and sunk detection.

use alloc::vec;
use alloc::vec::Vec;

use super::common::{CellState, Direction, GameError, ShotOutcome};
use super::grid::Grid;

/// Fire at (`row`, `col`) on a grid holding real ship positions.
///
/// Re-shooting a resolved cell or shooting off the board is `Forbidden` and
/// leaves the grid untouched.
pub fn resolve_shot(grid: &mut Grid, row: usize, col: usize) -> ShotOutcome {
    let state = match grid.get(row, col) {
        Ok(state) => state,
        Err(_) => return ShotOutcome::Forbidden,
    };
    match state {
        CellState::Hit | CellState::Miss | CellState::Sunk => ShotOutcome::Forbidden,
        CellState::Ship => {
            let _ = grid.set(row, col, CellState::Hit);
            match sunk_extent(grid, row, col) {
                Some(extent) => {
                    mark_sunk(grid, &extent);
                    ShotOutcome::Sunk
                }
                None => ShotOutcome::Hit,
            }
        }
        _ => {
            let _ = grid.set(row, col, CellState::Miss);
            ShotOutcome::Miss
        }
    }
}

/// Cells of the ship through the hit at (`row`, `col`) when none of them is
/// still afloat.
///
/// Probes each axis direction until the first non-`Hit` cell. A live `Ship`
/// cell anywhere on those runs means the ship is not sunk.
pub fn sunk_extent(grid: &Grid, row: usize, col: usize) -> Option<Vec<(usize, usize)>> {
    let mut extent = vec![(row, col)];
    for dir in Direction::ALL {
        let mut distance = 1;
        while let Some((r, c)) = dir.step(row, col, distance) {
            match grid.probe(r, c) {
                CellState::Hit => extent.push((r, c)),
                CellState::Ship => return None,
                _ => break,
            }
            distance += 1;
        }
    }
    Some(extent)
}

fn mark_sunk(grid: &mut Grid, extent: &[(usize, usize)]) {
    for &(r, c) in extent {
        let _ = grid.set(r, c, CellState::Sunk);
    }
}

/// Record the outcome of our own shot on the view of the opponent's grid.
///
/// `Sunk` promotes the connected run of hits through the target to `Sunk`.
/// `Forbidden` changes nothing.
pub fn record_on_view(
    view: &mut Grid,
    row: usize,
    col: usize,
    outcome: ShotOutcome,
) -> Result<(), GameError> {
    if view.get(row, col)?.is_resolved() && outcome != ShotOutcome::Forbidden {
        return Err(GameError::IllegalReshoot { row, col });
    }
    match outcome {
        ShotOutcome::Hit => view.set(row, col, CellState::Hit)?,
        ShotOutcome::Miss => view.set(row, col, CellState::Miss)?,
        ShotOutcome::Sunk => {
            view.set(row, col, CellState::Hit)?;
            if let Some(extent) = sunk_extent(view, row, col) {
                mark_sunk(view, &extent);
            }
        }
        ShotOutcome::Forbidden => {}
    }
    Ok(())
}
