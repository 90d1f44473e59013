//! Accelerate hold tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! key auto-repeat keeps refreshing the hold, and once the repeats stop for
//! longer than the grace period the hold is released.

use crate::types::{GameAction, ACCELERATE_GRACE_MS};

/// Tracks whether the accelerate key is held.
#[derive(Debug, Clone)]
pub struct AccelerateHold {
    held: bool,
    since_last_press_ms: u32,
    grace_ms: u32,
}

impl Default for AccelerateHold {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelerateHold {
    pub fn new() -> Self {
        Self::with_grace_ms(ACCELERATE_GRACE_MS)
    }

    pub fn with_grace_ms(grace_ms: u32) -> Self {
        Self {
            held: false,
            since_last_press_ms: 0,
            grace_ms,
        }
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn grace_ms(&self) -> u32 {
        self.grace_ms
    }

    /// Record a press (or auto-repeat). Returns `Accelerate` only on the first
    /// press of a hold.
    pub fn press(&mut self) -> Option<GameAction> {
        self.since_last_press_ms = 0;
        if self.held {
            None
        } else {
            self.held = true;
            Some(GameAction::Accelerate)
        }
    }

    /// Record an explicit key release.
    pub fn release(&mut self) -> Option<GameAction> {
        self.since_last_press_ms = 0;
        if self.held {
            self.held = false;
            Some(GameAction::Decelerate)
        } else {
            None
        }
    }

    /// Advance the timer. Returns `Decelerate` when the grace period runs out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.held {
            return None;
        }
        self.since_last_press_ms = self.since_last_press_ms.saturating_add(elapsed_ms);
        if self.since_last_press_ms > self.grace_ms {
            self.held = false;
            Some(GameAction::Decelerate)
        } else {
            None
        }
    }

    /// Forget any hold, e.g. after a restart.
    pub fn reset(&mut self) {
        self.held = false;
        self.since_last_press_ms = 0;
    }
}
