//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` keyboard and mouse events into
//! [`crate::types::GameAction`]s. Keys cover every intent; a mouse press
//! splits the terminal into a left and a right half, one per direction.
//! Terminal auto-repeat is left to the caller to accept or ignore.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
