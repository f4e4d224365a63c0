//! Read-only views of the game for presentation adapters.

use serde::Serialize;

use crate::piece::{Piece, Position};
use crate::types::{Cell, Color, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    /// Absolute board cells covered by the piece
    pub cells: Vec<Position>,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            position: value.position,
            cells: value.cells().into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// An empty board of the given size with nothing active.
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            board: vec![vec![None; columns]; rows],
            active: None,
            score: 0,
            lines: 0,
            game_over: false,
            episode_id: 0,
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Color at (row, col), counting the active piece on top of the board.
    pub fn color_at(&self, row: usize, col: usize) -> Cell {
        if let Some(active) = &self.active {
            let hit = active.cells.iter().any(|p| {
                usize::try_from(p.row) == Ok(row) && usize::try_from(p.col) == Ok(col)
            });
            if hit {
                return Some(active.color);
            }
        }
        self.board.get(row).and_then(|r| r.get(col).copied().flatten())
    }
}
