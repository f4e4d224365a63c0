//! Board module - manages the game grid
//!
//! The board is a `rows x columns` grid (canonically 20x10) where each cell is
//! either empty or holds the color of a locked piece.
//! Uses a flat row-major vector allocated once; dimensions never change.
//! Coordinates: (row, col) where row 0 is the top and col 0 the left edge.

use crate::piece::{Piece, Position};
use crate::shape::Shape;
use crate::types::{Cell, BOARD_COLUMNS, BOARD_ROWS};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    /// Build a board from explicit rows. Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from signed (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.columns {
            return None;
        }
        Some((row as usize) * self.columns + (col as usize))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Whether `shape` placed with its top-left cell at `position` fits.
    ///
    /// Every occupied shape cell must land in bounds on an empty cell. This is
    /// the only collision check; gravity, shifts, rotation and spawning all
    /// go through it.
    pub fn is_position_valid(&self, shape: &Shape, position: Position) -> bool {
        shape.cells().iter().all(|&(r, c)| {
            position
                .offset(i32::from(r), i32::from(c))
                .is_some_and(|cell| self.is_free(cell.row, cell.col))
        })
    }

    /// Write the piece's color into every cell it covers.
    ///
    /// The placement must already have been validated with
    /// [`Board::is_position_valid`].
    pub fn lock(&mut self, piece: &Piece) {
        debug_assert!(
            self.is_position_valid(&piece.shape, piece.position),
            "lock called on an invalid placement"
        );
        for cell in piece.cells() {
            self.set(cell.row, cell.col, Some(piece.color));
        }
    }

    /// Remove every full row, shifting the rest down and filling the top
    /// with empty rows. Returns how many rows were removed.
    ///
    /// Two-pointer compaction from the bottom up; surviving rows keep their
    /// relative order and nothing is allocated.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.columns;
        let mut write_row = self.rows;
        let mut cleared = 0;

        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(None);
        cleared
    }

    /// Clear the entire board; dimensions are unchanged
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// One row as a slice, or None if out of bounds
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid out as rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(<[Cell]>::to_vec)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLUMNS)
    }
}
