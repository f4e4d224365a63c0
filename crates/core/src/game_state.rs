//! Game state module - the engine's state machine
//!
//! This module ties together board, pieces and the random source. It owns the
//! spawn -> fall -> lock -> clear -> spawn cycle and exposes the player
//! intents. Time is not tracked here: callers drive gravity by invoking
//! [`GameState::tick`] on their own cadence.
//!
//! Invalid intents (blocked moves, rotations into walls, anything after game
//! over) are silently ignored; the state is simply left unchanged.

use log::{debug, info};

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::{RandomIndex, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, GameAction, BOARD_COLUMNS, BOARD_ROWS, LINE_CLEAR_POINTS};

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Created but `start` not yet called.
    Idle,
    Running,
    /// Terminal until `restart`.
    GameOver,
}

/// Outcome of the most recent lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// The next piece could not spawn and the game ended.
    pub topped_out: bool,
}

/// Points for clearing `lines` rows in a single lock: linear, no multi-line bonus.
pub fn line_clear_points(lines: u32) -> u32 {
    LINE_CLEAR_POINTS.saturating_mul(lines)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: Option<Piece>,
    source: R,
    score: u32,
    lines: u32,
    run_state: RunState,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    last_event: Option<LastEvent>,
}

impl GameState<SimpleRng> {
    /// Create a canonical 20x10 game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(BOARD_ROWS, BOARD_COLUMNS, SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomIndex> GameState<R> {
    /// Create a game on a `rows x columns` board drawing pieces from `source`.
    pub fn with_source(rows: usize, columns: usize, source: R) -> Self {
        Self {
            board: Board::new(rows, columns),
            active: None,
            source,
            score: 0,
            lines: 0,
            run_state: RunState::Idle,
            episode_id: 0,
            last_event: None,
        }
    }

    /// Start the game: empty board, score 0, first piece spawned.
    pub fn start(&mut self) {
        self.restart();
    }

    /// Reset everything and spawn a new piece. Allowed from any state.
    pub fn restart(&mut self) {
        if self.run_state != RunState::Idle {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.board.reset();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.last_event = None;
        self.run_state = RunState::Running;
        info!(
            "game started (episode {}, {}x{})",
            self.episode_id,
            self.board.rows(),
            self.board.columns()
        );
        self.spawn_piece();
    }

    /// One gravity step.
    ///
    /// Moves the active piece down a row if it fits; otherwise locks it,
    /// clears full lines, scores them and spawns the next piece. A spawn that
    /// is blocked ends the game.
    pub fn tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        let below = piece
            .position
            .offset(1, 0)
            .filter(|&below| self.board.is_position_valid(&piece.shape, below));
        if let Some(below) = below {
            self.active = Some(Piece {
                position: below,
                ..piece
            });
            return;
        }

        self.lock_piece(piece);
    }

    pub fn move_left(&mut self) {
        self.try_shift(-1);
    }

    pub fn move_right(&mut self) {
        self.try_shift(1);
    }

    /// Rotate clockwise in place. No wall kicks: a blocked rotation is dropped.
    pub fn rotate(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        let shape = piece.shape.rotated();
        if self.board.is_position_valid(&shape, piece.position) {
            self.active = Some(Piece { shape, ..piece });
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.tick(),
            GameAction::Restart => self.restart(),
        }
    }

    fn try_shift(&mut self, dcol: i32) {
        if self.run_state != RunState::Running {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        let target = piece
            .position
            .offset(0, dcol)
            .filter(|&target| self.board.is_position_valid(&piece.shape, target));
        if let Some(target) = target {
            self.active = Some(Piece {
                position: target,
                ..piece
            });
        }
    }

    /// Lock `piece`, clear lines, score, and spawn the next piece.
    fn lock_piece(&mut self, piece: Piece) {
        self.board.lock(&piece);
        self.active = None;

        let cleared = self.board.clear_full_lines() as u32;
        let points = line_clear_points(cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared);
        debug!(
            "locked {:?} at ({}, {}), cleared {} line(s)",
            piece.kind, piece.position.row, piece.position.col, cleared
        );

        let spawned = self.spawn_piece();
        self.last_event = Some(LastEvent {
            lines_cleared: cleared,
            points,
            topped_out: !spawned,
        });
    }

    /// Spawn a random piece at the top. Returns false (and ends the game) if
    /// it does not fit.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::random(&mut self.source, self.board.columns());
        if !self.board.is_position_valid(&piece.shape, piece.position) {
            self.run_state = RunState::GameOver;
            self.active = None;
            info!(
                "game over: {:?} cannot spawn, final score {}",
                piece.kind, self.score
            );
            return false;
        }

        self.active = Some(piece);
        true
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Locked cells as rows of optional colors (active piece excluded).
    pub fn board_snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.to_rows()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LastEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.board.rows(),
            columns: self.board.columns(),
            board: self.board_snapshot(),
            active: self.active.map(ActiveSnapshot::from),
            score: self.score,
            lines: self.lines,
            game_over: self.is_game_over(),
            episode_id: self.episode_id,
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Position;
    use crate::rng::ScriptedIndex;
    use crate::shape::Shape;
    use crate::types::{Color, PieceKind};

    /// Index of `kind` in canonical order, for scripting the random source.
    fn idx(kind: PieceKind) -> usize {
        PieceKind::ALL.iter().position(|&k| k == kind).unwrap()
    }

    fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedIndex> {
        let indices = kinds.iter().map(|&k| idx(k)).collect();
        GameState::with_source(BOARD_ROWS, BOARD_COLUMNS, ScriptedIndex::new(indices))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.run_state(), RunState::Idle);
        assert_eq!(state.score(), 0);
        assert!(state.current_piece().is_none());
    }

    #[test]
    fn test_ops_before_start_are_noops() {
        let mut state = GameState::new(1);
        state.tick();
        state.move_left();
        state.rotate();
        assert_eq!(state.run_state(), RunState::Idle);
        assert!(state.current_piece().is_none());
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        assert_eq!(state.run_state(), RunState::Running);
        let piece = state.current_piece().unwrap();
        assert_eq!(piece.kind, PieceKind::O);
        assert_eq!(piece.position, Position::new(0, 4));
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        state.tick();
        assert_eq!(state.current_piece().unwrap().position, Position::new(1, 3));
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        for _ in 0..4 {
            state.move_left();
        }
        assert_eq!(state.current_piece().unwrap().position.col, 0);
        state.move_left();
        assert_eq!(state.current_piece().unwrap().position.col, 0);
    }

    #[test]
    fn test_move_right_stops_at_wall() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        for _ in 0..10 {
            state.move_right();
        }
        assert_eq!(state.current_piece().unwrap().position.col, 8);
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.board_mut().set(0, 3, Some(Color::Red));
        state.move_left();
        assert_eq!(state.current_piece().unwrap().position.col, 4);
    }

    #[test]
    fn test_rotate_commits_new_shape() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        state.rotate();
        let piece = state.current_piece().unwrap();
        assert_eq!(piece.shape, Shape::T.rotated());
        assert_eq!(piece.position, Position::new(0, 3));
    }

    #[test]
    fn test_rotate_rejected_against_wall() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        // Vertical I hugging the left wall: occupied column is local col 1.
        state.set_active(Piece::new(PieceKind::I, Position::new(0, -1)));
        state.rotate();
        let piece = state.current_piece().unwrap();
        assert_eq!(piece.shape, Shape::I);
        assert_eq!(piece.position, Position::new(0, -1));
    }

    #[test]
    fn test_rotate_rejected_on_overlap() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        // T rotated occupies (1,5) relative to board at spawn (0,3).
        state.board_mut().set(1, 5, Some(Color::Blue));
        let before = *state.current_piece().unwrap();
        state.rotate();
        state.rotate();
        // Second attempt also blocked since the first never committed.
        assert_eq!(*state.current_piece().unwrap(), before);
    }

    #[test]
    fn test_piece_locks_at_floor_and_next_spawns() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        state.start();
        for _ in 0..18 {
            state.tick();
        }
        assert_eq!(state.current_piece().unwrap().position.row, 18);

        state.tick();
        assert_eq!(state.board().get(19, 4), Some(Some(Color::Yellow)));
        assert_eq!(state.board().get(18, 5), Some(Some(Color::Yellow)));
        assert_eq!(state.current_piece().unwrap().kind, PieceKind::T);
        assert_eq!(
            state.take_last_event(),
            Some(LastEvent {
                lines_cleared: 0,
                points: 0,
                topped_out: false
            })
        );
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        state.start();
        for col in 0..10 {
            if col != 5 {
                state.board_mut().set(19, col, Some(Color::Green));
            }
        }
        state.board_mut().set(18, 0, Some(Color::Red));

        // I spawns at col 3 and occupies board col 4; shift it over col 5.
        state.move_right();
        for _ in 0..16 {
            state.tick();
        }
        assert_eq!(state.current_piece().unwrap().position, Position::new(16, 4));
        state.tick();

        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        // Row 19 removed: old row 18 moved down, a blank row entered at the top.
        assert!(state.board().row(0).unwrap().iter().all(Option::is_none));
        assert_eq!(state.board().get(19, 0), Some(Some(Color::Red)));
        for row in 17..20 {
            assert_eq!(state.board().get(row, 5), Some(Some(Color::Cyan)));
        }
        assert_eq!(state.board().get(16, 5), Some(None));
        assert_eq!(state.current_piece().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_multi_line_clear_is_linear() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        state.start();
        for row in 16..20 {
            for col in 0..10 {
                if col != 4 {
                    state.board_mut().set(row, col, Some(Color::Green));
                }
            }
        }
        for _ in 0..16 {
            state.tick();
        }
        state.tick();
        assert_eq!(state.score(), 400);
        assert_eq!(state.lines(), 4);
        assert!(state.board().cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_blocked_spawn_ends_game_and_freezes_state() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        // O at rows 0-1; block row 2 under it so the first tick locks it there.
        state.board_mut().set(2, 4, Some(Color::Red));
        state.tick();

        assert!(state.is_game_over());
        assert!(state.current_piece().is_none());
        assert_eq!(state.take_last_event().map(|e| e.topped_out), Some(true));

        let before = state.snapshot();
        state.tick();
        state.move_left();
        state.move_right();
        state.rotate();
        state.apply_action(GameAction::SoftDrop);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.board_mut().set(2, 4, Some(Color::Red));
        state.tick();
        assert!(state.is_game_over());

        state.restart();
        assert_eq!(state.run_state(), RunState::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.episode_id(), 1);
        assert!(state.board().cells().iter().all(Option::is_none));
        assert_eq!(state.current_piece().unwrap().position, Position::new(0, 4));
    }

    #[test]
    fn test_piece_locks_at_floor_of_very_tall_board() {
        let rows = 40_000;
        let mut state =
            GameState::with_source(rows, 10, ScriptedIndex::new(vec![idx(PieceKind::O)]));
        state.start();
        // rows - 2 ticks to reach the floor, one more to lock.
        for _ in 0..rows - 1 {
            state.tick();
        }
        let floor = rows as i32;
        assert!(state.board().is_occupied(floor - 1, 4));
        assert!(state.board().is_occupied(floor - 2, 5));
        assert_eq!(state.take_last_event().map(|e| e.lines_cleared), Some(0));
        assert_eq!(state.current_piece().unwrap().position.row, 0);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut once = scripted(&[PieceKind::S]);
        once.start();
        once.tick();
        once.restart();

        let mut twice = scripted(&[PieceKind::S]);
        twice.start();
        twice.tick();
        twice.restart();
        twice.restart();

        let a = once.snapshot();
        let b = twice.snapshot();
        assert_eq!(a.board, b.board);
        assert_eq!(a.active, b.active);
        assert_eq!(a.score, 0);
        assert_eq!(b.score, 0);
        assert!(!a.game_over && !b.game_over);
    }

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(4), 400);
    }
}
