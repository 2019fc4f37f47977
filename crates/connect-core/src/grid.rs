//! Game grid representation and the gravity-fill drop rule.
//!
//! This module contains:
//! - Cell ownership for a single grid position
//! - The `Grid` itself, stored row-major with row 0 at the top
//! - Column drop and cell query methods

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player identifier (1..=N in turn order)
pub type PlayerId = u8;

/// Who occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellOwner {
    /// No token has been dropped here yet
    #[default]
    Empty,
    /// Token belonging to a player
    Player(PlayerId),
}

impl CellOwner {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellOwner::Empty)
    }

    /// Get the owning player, if any
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            CellOwner::Empty => None,
            CellOwner::Player(id) => Some(*id),
        }
    }
}

/// Reasons a drop can be refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DropError {
    #[error("Column is outside the grid")]
    InvalidColumn,

    #[error("Column is full")]
    ColumnFull,
}

/// The game grid.
///
/// Cells are stored row-major. Row 0 is the top row and row `height - 1`
/// is the bottom row, so tokens fall towards higher row indices. Every
/// column's tokens form one contiguous run ending at the bottom row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellOwner>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            width,
            height,
            cells: vec![CellOwner::Empty; width * height],
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, column: usize, row: usize) -> usize {
        row * self.width + column
    }

    /// Get the owner of a cell, or `None` if the position is off the grid
    pub fn owner(&self, column: usize, row: usize) -> Option<CellOwner> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[self.index(column, row)])
    }

    /// Check if a column has no room left.
    ///
    /// Columns outside the grid count as full since nothing can land there.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.owner(column, 0) {
            Some(top) => !top.is_empty(),
            None => true,
        }
    }

    /// Check if every column is full
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|column| self.is_column_full(column))
    }

    /// Columns that can still take a token, in ascending order
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    /// Number of tokens stacked in a column
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.width {
            return 0;
        }
        (0..self.height)
            .rev()
            .take_while(|&row| !self.cells[self.index(column, row)].is_empty())
            .count()
    }

    /// Total number of occupied cells
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Drop a token into a column, returns the row where it landed.
    ///
    /// The grid is left untouched on error.
    pub fn drop(&mut self, column: usize, player: PlayerId) -> Result<usize, DropError> {
        if column >= self.width {
            return Err(DropError::InvalidColumn);
        }

        // Scan up from the bottom for the first empty cell
        for row in (0..self.height).rev() {
            let idx = self.index(column, row);
            if self.cells[idx].is_empty() {
                self.cells[idx] = CellOwner::Player(player);
                return Ok(row);
            }
        }

        Err(DropError::ColumnFull)
    }

    /// Rows from top to bottom, each a slice of `width` cells
    pub fn rows(&self) -> impl Iterator<Item = &[CellOwner]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Owned copy of the rows, top to bottom (for JSON snapshots)
    pub fn to_rows(&self) -> Vec<Vec<CellOwner>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}
