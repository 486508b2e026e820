use thiserror::Error;

mod clock;

pub use clock::SimulationClock;

/// The state of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Alive,
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

/// Raised when a grid would have no rows or no columns, or when the supplied
/// cells don't fill the requested dimensions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid grid dimensions {rows}x{cols}: {reason}")]
pub struct InvalidDimensionError {
    pub rows: usize,
    pub cols: usize,
    pub reason: &'static str,
}

// Chebyshev-distance-1 offsets as (row, col), center excluded.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A toroidal Game of Life board, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid with every cell independently alive with probability 0.5.
    pub fn random(rows: usize, cols: usize) -> Result<Grid, InvalidDimensionError> {
        Self::random_with(rows, cols, &mut fastrand::Rng::new())
    }

    /// Same as [`Grid::random`], drawing from the supplied generator so a seeded
    /// generator reproduces the same board.
    pub fn random_with(
        rows: usize,
        cols: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Grid, InvalidDimensionError> {
        check_dimensions(rows, cols)?;
        let cells = (0..rows * cols)
            .map(|_| if rng.bool() { Cell::Alive } else { Cell::Dead })
            .collect();
        Ok(Grid { rows, cols, cells })
    }

    /// Build a grid from explicit row-major cell states.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Cell>,
    ) -> Result<Grid, InvalidDimensionError> {
        check_dimensions(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(InvalidDimensionError {
                rows,
                cols,
                reason: "cell count does not match rows * cols",
            });
        }
        Ok(Grid { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Direct, non-wrapping lookup. `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Toroidal lookup.
    ///
    /// Each coordinate wraps a single step: anything below zero maps to the last
    /// index on that axis and anything past the last index maps to zero. This is
    /// only correct for neighbor offsets of magnitude one, which is all the
    /// transition rule asks of it. Switch to `rem_euclid` before using it with
    /// larger offsets.
    pub fn cell_at(&self, row: isize, col: isize) -> Cell {
        let row = wrap_once(row, self.rows);
        let col = wrap_once(col, self.cols);
        self.cells[row * self.cols + col]
    }

    /// Number of alive cells among the 8 toroidal neighbors of `(row, col)`.
    pub fn alive_neighbor_count(&self, row: usize, col: usize) -> u8 {
        let (row, col) = (row as isize, col as isize);
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dr, dc)| self.cell_at(row + dr, col + dc).is_alive())
            .count() as u8
    }

    /// Apply B3/S23 to every cell, reading only from `self`.
    pub fn next_generation(&self) -> Grid {
        let cells = (0..self.rows * self.cols)
            .map(|idx| {
                let (row, col) = (idx / self.cols, idx % self.cols);
                let neighbors = self.alive_neighbor_count(row, col);
                match (self.cells[idx], neighbors) {
                    (Cell::Alive, 2 | 3) => Cell::Alive,
                    (Cell::Dead, 3) => Cell::Alive,
                    _ => Cell::Dead,
                }
            })
            .collect();
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// `(row, col)` of every alive cell in row-major order.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), InvalidDimensionError> {
    if rows == 0 || cols == 0 {
        return Err(InvalidDimensionError {
            rows,
            cols,
            reason: "a grid needs at least one row and one column",
        });
    }
    Ok(())
}

#[inline(always)]
fn wrap_once(coord: isize, len: usize) -> usize {
    let max = len as isize - 1;
    if coord < 0 {
        max as usize
    } else if coord > max {
        0
    } else {
        coord as usize
    }
}
