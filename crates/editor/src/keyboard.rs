//! Keyboard commands and debouncing.

use std::time::{Duration, Instant};

/// A keyboard action the editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Step selection to the previous timed annotation.
    ArrowUp,
    /// Step selection to the next timed annotation.
    ArrowDown,
    /// Pick the Nth configured label of the active tool, 1-based.
    Digit(u8),
    /// Remove the selected annotation.
    Delete,
    /// Clear selection.
    Escape,
}

/// Coalesces rapid repeat triggers into one logical action: a call within
/// `delay` of the last accepted one is dropped.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self) -> bool {
        self.accept_at(Instant::now())
    }

    fn accept_at(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.delay => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
