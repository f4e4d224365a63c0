//! Terminal presentation for blockfall.
//!
//! Snapshots are drawn into a plain framebuffer (see [`GameView`]) and the
//! [`TerminalRenderer`] writes only the cells that changed since the last
//! frame. Nothing here mutates game state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette, BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
