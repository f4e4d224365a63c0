//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and state management.
//! It has **zero dependencies** on terminals, clocks or I/O, making it:
//!
//! - **Deterministic**: Same random source produces identical games
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Can run behind any presentation layer
//!
//! # Module Structure
//!
//! - [`shape`]: Occupancy matrices for the seven pieces and clockwise rotation
//! - [`piece`]: A shape placed on the board with a color, plus spawning
//! - [`board`]: Grid of optional colors with collision checks, locking and line clearing
//! - [`rng`]: Injectable uniform index sources (seeded LCG, scripted sequences)
//! - [`game_state`]: The engine state machine (spawn, fall, lock, clear, game over)
//! - [`snapshot`]: Read-only views for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random from I, O, T, S, Z, J, L
//! - Pieces spawn at row 0, horizontally centered (floor division)
//! - Rotation is clockwise in place; there are no wall kicks
//! - A piece locks as soon as it cannot fall one more row
//! - Each cleared line scores 100 points
//! - The game ends when a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//!
//! assert_eq!(game.score(), 0);
//! assert!(!game.is_game_over());
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{line_clear_points, GameState, LastEvent, RunState};
pub use piece::{spawn_column, Piece, Position};
pub use rng::{RandomIndex, ScriptedIndex, SimpleRng};
pub use shape::{get_shape, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
