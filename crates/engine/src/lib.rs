//! Runtime glue between the pure core and a live front end.
//!
//! The core never reads a clock. This crate supplies what a running game
//! needs around it:
//!
//! - [`scheduler`]: fixed-interval [`TickTimer`] polled with caller-supplied instants
//! - [`session`]: [`Session`] pairs a game with its timer and a game-over sink
//! - [`config`]: [`GameConfig`] read from `BLOCKFALL_*` environment variables
//! - [`logging`]: log4rs file logger setup
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use blockfall_core::GameState;
//! use blockfall_engine::{NoopSink, Session};
//! use blockfall_types::GameAction;
//!
//! let t0 = Instant::now();
//! let mut session = Session::new(GameState::new(7), Duration::from_millis(500), NoopSink);
//! session.start(t0);
//! session.handle(GameAction::MoveLeft, t0);
//! assert!(session.advance(t0 + Duration::from_millis(500)));
//! ```

pub mod config;
pub mod logging;
pub mod scheduler;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::GameConfig;
pub use logging::init_file_logging;
pub use scheduler::TickTimer;
pub use session::{GameOverSink, NoopSink, Session};
