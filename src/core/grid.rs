//! Rectangular board of cell states with bounds-checked access.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::common::{CellState, GameError};

/// A `rows × cols` grid, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid of open water.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Water; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if self.in_bounds(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// State at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GameError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Overwrite the state at (`row`, `col`). No transition checks happen here.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GameError> {
        let i = self.index(row, col)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Like [`Grid::get`] but reads anything off the board as `Forbidden`.
    pub fn probe(&self, row: usize, col: usize) -> CellState {
        self.get(row, col).unwrap_or(CellState::Forbidden)
    }

    /// In-bounds cells of the 8-connected neighbourhood of (`row`, `col`).
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let rows = row.saturating_sub(1)..=row.saturating_add(1);
        rows.flat_map(move |r| {
            (col.saturating_sub(1)..=col.saturating_add(1)).map(move |c| (r, c))
        })
        .filter(move |&(r, c)| (r, c) != (row, col) && self.in_bounds(r, c))
    }

    /// Every coordinate with its state, row by row.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| ((i / self.cols, i % self.cols), state))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Rewrite every cell matching `from` to `to`.
    pub fn replace_where<F>(&mut self, mut from: F, to: CellState)
    where
        F: FnMut(CellState) -> bool,
    {
        for cell in self.cells.iter_mut() {
            if from(*cell) {
                *cell = to;
            }
        }
    }

    /// Reset the whole grid to water.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Water);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for c in 0..self.cols {
            write!(f, "{:>3}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.rows {
            write!(f, "{:>3} ", r)?;
            for c in 0..self.cols {
                write!(f, "{:>3}", self.cells[r * self.cols + c].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} {{", self.rows, self.cols)?;
        for r in 0..self.rows {
            write!(f, "  ")?;
            for c in 0..self.cols {
                write!(f, "{}", self.cells[r * self.cols + c].symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
