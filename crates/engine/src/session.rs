//! Session: a game plus the timer that drives it.
//!
//! The session owns the only mutable handle to the game. Presentation code
//! reads snapshots and forwards player intents; it never touches the board.
//! Everything runs on the caller's thread, one operation at a time.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::core::{GameSnapshot, GameState, RandomIndex, SimpleRng};
use crate::scheduler::TickTimer;
use crate::types::GameAction;

/// Receives the final score when a game ends.
pub trait GameOverSink {
    fn game_over(&mut self, final_score: u32);
}

impl<F: FnMut(u32)> GameOverSink for F {
    fn game_over(&mut self, final_score: u32) {
        self(final_score)
    }
}

/// Sink that ignores game over.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl GameOverSink for NoopSink {
    fn game_over(&mut self, _final_score: u32) {}
}

pub struct Session<R = SimpleRng, S = NoopSink> {
    game: GameState<R>,
    interval: Duration,
    /// `None` once stopped. A stopped timer is dropped, never resumed.
    timer: Option<TickTimer>,
    sink: S,
    notified: bool,
}

impl<R: RandomIndex, S: GameOverSink> Session<R, S> {
    /// Wrap a game. Nothing ticks until [`Session::start`].
    pub fn new(game: GameState<R>, interval: Duration, sink: S) -> Self {
        Self {
            game,
            interval,
            timer: None,
            sink,
            notified: false,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.restart(now);
    }

    /// Reset the game and arm a fresh timer.
    pub fn restart(&mut self, now: Instant) {
        self.game.restart();
        self.notified = false;
        self.timer = Some(TickTimer::new(self.interval, now));
        info!("tick timer armed at {:?}", self.interval);
        self.check_game_over();
    }

    /// Stop ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("tick timer stopped");
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }

    /// Run a gravity tick if one is due. Returns whether it ticked.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        if !timer.poll(now) {
            return false;
        }

        self.game.tick();
        self.check_game_over();
        true
    }

    /// Forward a player intent.
    pub fn handle(&mut self, action: GameAction, now: Instant) {
        match action {
            GameAction::Restart => self.restart(now),
            other => {
                self.game.apply_action(other);
                self.check_game_over();
            }
        }
    }

    /// Time until the next tick, or `None` when stopped.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.as_ref().map(|t| t.time_until_next(now))
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn check_game_over(&mut self) {
        if !self.game.is_game_over() || self.notified {
            return;
        }
        self.stop();
        self.notified = true;
        self.sink.game_over(self.game.score());
    }
}
