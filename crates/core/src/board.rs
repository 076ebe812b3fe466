//! Board module - the 4x4 grid of optional tiles
//!
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates are `(row, col)`, row 0 at the top, col 0 on the left.
//!
//! The board is the only record of where tiles are. Lookups such as
//! [`Board::position_of`] scan it instead of keeping a side index.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::tile::{Tile, TileFactory};
use crate::types::{TileId, CELL_COUNT, GRID_SIZE};

/// One row (or, after a transpose, one column) of the board.
pub type Line = [Option<Tile>; GRID_SIZE];

/// Why a tile could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) is already occupied by tile {occupant}")]
    Occupied {
        row: usize,
        col: usize,
        occupant: TileId,
    },
}

/// The game board - 4x4 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    cells: [Option<Tile>; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some(row * GRID_SIZE + col)
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get cell at `(row, col)`. Returns None if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Option<Tile>> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Tile at `(row, col)`, if any.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<Tile> {
        self.get(row, col).flatten()
    }

    /// In bounds and empty.
    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Ok if `(row, col)` can take a tile.
    pub fn check_vacant(&self, row: usize, col: usize) -> Result<(), PlacementError> {
        match self.get(row, col) {
            None => Err(PlacementError::OutOfBounds { row, col }),
            Some(Some(occupant)) => Err(PlacementError::Occupied {
                row,
                col,
                occupant: occupant.id(),
            }),
            Some(None) => Ok(()),
        }
    }

    /// Put a tile into an empty cell. Never overwrites.
    pub fn place(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), PlacementError> {
        self.check_vacant(row, col)?;
        self.cells[row * GRID_SIZE + col] = Some(tile);
        Ok(())
    }

    /// Remove and return the tile at `(row, col)`.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Tile> {
        Self::index(row, col).and_then(|idx| self.cells[idx].take())
    }

    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| (idx / GRID_SIZE, idx % GRID_SIZE))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Sum of all tile values.
    pub fn value_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|t| t.value() as u64).sum()
    }

    pub fn max_value(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.value()).max().unwrap_or(0)
    }

    /// Current cell of tile `id`.
    pub fn position_of(&self, id: TileId) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| cell.is_some_and(|t| t.id() == id))
            .map(|idx| (idx / GRID_SIZE, idx % GRID_SIZE))
    }

    /// Iterate occupied cells as `(row, col, tile)`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|t| (idx / GRID_SIZE, idx % GRID_SIZE, t)))
    }

    /// True if some move could still change the board: an empty cell, or two
    /// orthogonally adjacent tiles with equal values.
    pub fn has_available_moves(&self) -> bool {
        if !self.is_full() {
            return true;
        }
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.tile_at(row, col).map(|t| t.value());
                if col + 1 < GRID_SIZE && value == self.tile_at(row, col + 1).map(|t| t.value()) {
                    return true;
                }
                if row + 1 < GRID_SIZE && value == self.tile_at(row + 1, col).map(|t| t.value()) {
                    return true;
                }
            }
        }
        false
    }

    pub fn row(&self, row: usize) -> Line {
        let start = row * GRID_SIZE;
        let mut line = [None; GRID_SIZE];
        line.copy_from_slice(&self.cells[start..start + GRID_SIZE]);
        line
    }

    pub(crate) fn set_row(&mut self, row: usize, line: Line) {
        let start = row * GRID_SIZE;
        self.cells[start..start + GRID_SIZE].copy_from_slice(&line);
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = Self::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                out.cells[col * GRID_SIZE + row] = self.cells[row * GRID_SIZE + col];
            }
        }
        out
    }

    /// Mirror every row left-to-right.
    pub fn reverse_rows(&self) -> Self {
        let mut out = self.clone();
        for chunk in out.cells.chunks_exact_mut(GRID_SIZE) {
            chunk.reverse();
        }
        out
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Tile values as a grid, 0 for empty cells.
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0u32; GRID_SIZE]; GRID_SIZE];
        for (row, col, tile) in self.tiles() {
            out[row][col] = tile.value();
        }
        out
    }

    /// Tile ids as a grid, 0 for empty cells.
    pub fn ids(&self) -> [[TileId; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0; GRID_SIZE]; GRID_SIZE];
        for (row, col, tile) in self.tiles() {
            out[row][col] = tile.id();
        }
        out
    }

    /// Build a board from a value grid (0 = empty), allocating ids from `factory`
    /// in row-major order.
    pub fn from_values(values: [[u32; GRID_SIZE]; GRID_SIZE], factory: &mut TileFactory) -> Self {
        let mut board = Self::new();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    board.cells[row * GRID_SIZE + col] = Some(factory.create_tile(value));
                }
            }
        }
        board
    }

    /// Check the structural invariants: unique ids, values are powers of two >= 2.
    pub fn is_consistent(&self) -> bool {
        let mut seen: ArrayVec<TileId, CELL_COUNT> = ArrayVec::new();
        for tile in self.cells.iter().flatten() {
            if tile.value() < 2 || !tile.value().is_power_of_two() || seen.contains(&tile.id()) {
                return false;
            }
            seen.push(tile.id());
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
