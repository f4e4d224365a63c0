//! Piece module - a positioned, colored shape on the board

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::rng::RandomIndex;
use crate::shape::{get_shape, Shape, SHAPE_MAX_CELLS};
use crate::types::{Color, PieceKind};

/// Board coordinate of a shape's top-left cell.
///
/// May point off-board while a candidate move is being checked; only valid
/// positions are ever committed to a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position shifted by `(drow, dcol)`, or `None` if that leaves the
    /// coordinate range. An unrepresentable position is never valid.
    pub fn offset(self, drow: i32, dcol: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(drow)?,
            col: self.col.checked_add(dcol)?,
        })
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub position: Position,
}

impl Piece {
    /// Create a piece of `kind` in its spawn orientation at `position`.
    pub fn new(kind: PieceKind, position: Position) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color: kind.color(),
            position,
        }
    }

    /// Create a piece at the spawn point of a board `columns` wide:
    /// row 0, horizontally centered with floor division.
    pub fn spawn(kind: PieceKind, columns: usize) -> Self {
        let shape = get_shape(kind);
        Self::new(kind, Position::new(0, spawn_column(columns, shape.column_count())))
    }

    /// Pick one of the seven kinds uniformly and spawn it.
    pub fn random(source: &mut impl RandomIndex, columns: usize) -> Self {
        let index = source.next_index(PieceKind::ALL.len());
        // Sources are expected to honor the bound; clamp anyway.
        let kind = PieceKind::ALL[index.min(PieceKind::ALL.len() - 1)];
        Self::spawn(kind, columns)
    }

    /// Absolute board coordinates `(row, col)` of every occupied cell.
    ///
    /// Cells past the coordinate range are omitted; a committed piece never
    /// has any.
    pub fn cells(&self) -> ArrayVec<Position, SHAPE_MAX_CELLS> {
        self.shape
            .cells()
            .iter()
            .filter_map(|&(r, c)| self.position.offset(i32::from(r), i32::from(c)))
            .collect()
    }
}

/// Spawn column for a shape `shape_columns` wide: `(columns - shape_columns) / 2`,
/// rounded toward negative infinity.
pub fn spawn_column(columns: usize, shape_columns: usize) -> i32 {
    let columns = i64::try_from(columns).unwrap_or(i64::MAX);
    let shape_columns = i64::try_from(shape_columns).unwrap_or(i64::MAX);
    let col = columns.saturating_sub(shape_columns).div_euclid(2);
    i32::try_from(col).unwrap_or(if col < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedIndex;

    #[test]
    fn test_spawn_centers_with_floor_division() {
        assert_eq!(Piece::spawn(PieceKind::O, 10).position, Position::new(0, 4));
        assert_eq!(Piece::spawn(PieceKind::I, 10).position, Position::new(0, 3));
        // (10 - 3) / 2 = 3.5 -> 3
        assert_eq!(Piece::spawn(PieceKind::T, 10).position, Position::new(0, 3));
        // (9 - 2) / 2 = 3.5 -> 3
        assert_eq!(Piece::spawn(PieceKind::O, 9).position, Position::new(0, 3));
    }

    #[test]
    fn test_spawn_column_floors_negative() {
        assert_eq!(spawn_column(3, 4), -1);
        assert_eq!(spawn_column(1, 4), -2);
    }

    #[test]
    fn test_spawn_column_on_wide_boards() {
        assert_eq!(spawn_column(70_000, 2), 34_999);
        assert_eq!(spawn_column(100_001, 3), 49_999);
    }

    #[test]
    fn test_offset_past_range_is_none() {
        let edge = Position::new(i32::MAX, 0);
        assert_eq!(edge.offset(1, 0), None);
        assert_eq!(edge.offset(0, 1), Some(Position::new(i32::MAX, 1)));
        assert_eq!(Position::new(0, i32::MIN).offset(0, -1), None);
    }

    #[test]
    fn test_random_piece_pairs_kind_shape_and_color() {
        let mut source = ScriptedIndex::new((0..7).collect());
        for kind in PieceKind::ALL {
            let piece = Piece::random(&mut source, 10);
            assert_eq!(piece.kind, kind);
            assert_eq!(piece.shape, get_shape(kind));
            assert_eq!(piece.color, kind.color());
            assert_eq!(piece.position.row, 0);
        }
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::new(PieceKind::O, Position::new(5, 2));
        let cells: Vec<Position> = piece.cells().into_iter().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(5, 2),
                Position::new(5, 3),
                Position::new(6, 2),
                Position::new(6, 3),
            ]
        );
    }
}
