//! Event handling infrastructure
//!
//! Polls the terminal for keyboard and resize events and produces a tick
//! every tick rate, whether or not input arrives in between. Ticks drive
//! every timer in the app: the splash countdown, analysis stages, mock
//! listening and the assistant's reply delay.

use crate::app::Action;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::{Duration, Instant};

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for timers and progress
    Tick,
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            last_tick: Instant::now(),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Time left until the next tick is due
    fn time_to_tick(&self, now: Instant) -> Duration {
        self.tick_rate
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.time_to_tick(now).is_zero()
    }

    /// Wait for the next key, resize or tick
    ///
    /// A due tick is returned before any queued input, so timers keep
    /// running while keys arrive faster than the tick rate. Focus, paste
    /// and mouse events are dropped.
    pub fn next(&mut self) -> std::io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.tick_due(now) {
                self.last_tick = now;
                return Ok(TuiEvent::Tick);
            }

            if event::poll(self.time_to_tick(now))? {
                match event::read()? {
                    CrosstermEvent::Key(key) => return Ok(TuiEvent::Key(key)),
                    CrosstermEvent::Resize(w, h) => return Ok(TuiEvent::Resize(w, h)),
                    _ => {}
                }
            }
        }
    }
}
