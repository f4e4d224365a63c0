//! Shape module - piece geometry as a small occupancy matrix
//!
//! A shape is a rectangular boolean matrix (at most 4x4) describing which
//! cells of a piece's local bounding box are occupied. Storage is inline, so
//! shapes are `Copy` and rotation never allocates.
//!
//! Local coordinates are `(row, col)` with row 0 at the top.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest supported bounding box side.
pub const SHAPE_MAX: usize = 4;

/// Upper bound on occupied cells in any shape.
pub const SHAPE_MAX_CELLS: usize = SHAPE_MAX * SHAPE_MAX;

/// Offset `(row, col)` of an occupied cell inside the bounding box
pub type CellOffset = (u8, u8);

/// Immutable occupancy matrix for one piece orientation.
///
/// Cells outside `rows x cols` are always `false`, so derived equality
/// compares exactly the visible matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    blocks: [[bool; SHAPE_MAX]; SHAPE_MAX],
}

impl Shape {
    pub const I: Shape = Shape::from_pattern(&[b".#..", b".#..", b".#..", b".#.."]);
    pub const O: Shape = Shape::from_pattern(&[b"##", b"##"]);
    pub const T: Shape = Shape::from_pattern(&[b".#.", b"###", b"..."]);
    pub const S: Shape = Shape::from_pattern(&[b".##", b"##.", b"..."]);
    pub const Z: Shape = Shape::from_pattern(&[b"##.", b".##", b"..."]);
    pub const J: Shape = Shape::from_pattern(&[b"#..", b"###", b"..."]);
    pub const L: Shape = Shape::from_pattern(&[b"..#", b"###", b"..."]);

    /// Build a shape from rows of `#` (filled) and `.` (empty).
    ///
    /// Used for the canonical constants; a malformed pattern fails at compile time.
    const fn from_pattern(pattern: &[&[u8]]) -> Self {
        assert!(!pattern.is_empty() && pattern.len() <= SHAPE_MAX);
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= SHAPE_MAX);

        let mut blocks = [[false; SHAPE_MAX]; SHAPE_MAX];
        let mut r = 0;
        while r < pattern.len() {
            assert!(pattern[r].len() == cols);
            let mut c = 0;
            while c < cols {
                blocks[r][c] = pattern[r][c] == b'#';
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: pattern.len() as u8,
            cols: cols as u8,
            blocks,
        }
    }

    /// Build a shape from an arbitrary boolean matrix.
    ///
    /// Returns `None` if the matrix is empty, ragged, or larger than 4x4.
    pub fn from_matrix<Row: AsRef<[bool]>>(matrix: &[Row]) -> Option<Self> {
        let rows = matrix.len();
        let cols = matrix.first()?.as_ref().len();
        if rows > SHAPE_MAX || cols == 0 || cols > SHAPE_MAX {
            return None;
        }

        let mut blocks = [[false; SHAPE_MAX]; SHAPE_MAX];
        for (r, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            blocks[r][..cols].copy_from_slice(row);
        }

        Some(Self {
            rows: rows as u8,
            cols: cols as u8,
            blocks,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows as usize
    }

    pub fn column_count(&self) -> usize {
        self.cols as usize
    }

    /// Whether local cell `(row, col)` is occupied. Out-of-box cells are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.row_count() && col < self.column_count() && self.blocks[row][col]
    }

    /// Return a new shape rotated 90 degrees clockwise.
    ///
    /// An R x C source becomes C x R with `result[i][j] = source[R-1-j][i]`.
    pub fn rotated(&self) -> Shape {
        let r = self.row_count();
        let c = self.column_count();
        let mut blocks = [[false; SHAPE_MAX]; SHAPE_MAX];
        for (i, out_row) in blocks.iter_mut().enumerate().take(c) {
            for (j, out) in out_row.iter_mut().enumerate().take(r) {
                *out = self.blocks[r - 1 - j][i];
            }
        }

        Shape {
            rows: self.cols,
            cols: self.rows,
            blocks,
        }
    }

    /// Occupied cells as local offsets, in row-major order.
    pub fn cells(&self) -> ArrayVec<CellOffset, SHAPE_MAX_CELLS> {
        let mut out = ArrayVec::new();
        for r in 0..self.row_count() {
            for c in 0..self.column_count() {
                if self.blocks[r][c] {
                    out.push((r as u8, c as u8));
                }
            }
        }
        out
    }

    /// Copy out the visible matrix.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.row_count())
            .map(|r| self.blocks[r][..self.column_count()].to_vec())
            .collect()
    }
}

/// Canonical spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::I,
        PieceKind::O => Shape::O,
        PieceKind::T => Shape::T,
        PieceKind::S => Shape::S,
        PieceKind::Z => Shape::Z,
        PieceKind::J => Shape::J,
        PieceKind::L => Shape::L,
    }
}
