//! One-shot countdown timer.
//!
//! Structurally a single-state subset of the session machine: a setup
//! phase takes a duration, then the armed timer ticks down to zero once
//! and stops. There is no transition to a next phase; completion just
//! surfaces the finished event for the notification tone.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Quick-pick durations offered at setup, in minutes.
pub const PRESET_MINUTES: [u32; 4] = [1, 5, 10, 15];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    /// Waiting for a duration.
    Setup,
    /// Duration set; counting down or paused.
    Armed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    phase: CountdownPhase,
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            phase: CountdownPhase::Setup,
            total_secs: 0,
            remaining_secs: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CountdownPhase::Armed && self.remaining_secs == 0
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs) as f64;
        (elapsed / self.total_secs as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the duration from hours/minutes/seconds fields.
    ///
    /// # Errors
    /// Field ranges follow the setup form: hours ≤ 23, minutes and
    /// seconds ≤ 59, and the total must be positive.
    pub fn arm(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<(), ValidationError> {
        if hours > 23 {
            return Err(ValidationError::invalid("hours", "must be at most 23"));
        }
        if minutes > 59 {
            return Err(ValidationError::invalid("minutes", "must be at most 59"));
        }
        if seconds > 59 {
            return Err(ValidationError::invalid("seconds", "must be at most 59"));
        }
        let total = hours * 3600 + minutes * 60 + seconds;
        if total == 0 {
            return Err(ValidationError::invalid("duration", "must be positive"));
        }
        self.phase = CountdownPhase::Armed;
        self.total_secs = total;
        self.remaining_secs = total;
        self.running = false;
        Ok(())
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.phase != CountdownPhase::Armed || self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        Some(Event::CountdownStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::CountdownPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to the setup phase, discarding the duration.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply one second of countdown; returns the finished event at zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            return Some(Event::CountdownFinished {
                total_secs: self.total_secs,
                at: Utc::now(),
            });
        }
        None
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_validates_field_ranges() {
        let mut cd = Countdown::new();
        assert!(cd.arm(24, 0, 0).is_err());
        assert!(cd.arm(0, 60, 0).is_err());
        assert!(cd.arm(0, 0, 60).is_err());
        assert!(cd.arm(0, 0, 0).is_err());
        assert_eq!(cd.phase(), CountdownPhase::Setup);
        assert!(cd.arm(1, 30, 15).is_ok());
        assert_eq!(cd.total_secs(), 3600 + 30 * 60 + 15);
    }

    #[test]
    fn cannot_start_from_setup() {
        let mut cd = Countdown::new();
        assert!(cd.start().is_none());
        assert!(!cd.is_running());
    }

    #[test]
    fn ticks_down_to_finished_exactly_once() {
        let mut cd = Countdown::new();
        cd.arm(0, 0, 3).unwrap();
        cd.start().unwrap();
        assert!(cd.tick().is_none());
        assert!(cd.tick().is_none());
        let finished = cd.tick();
        assert!(matches!(finished, Some(Event::CountdownFinished { .. })));
        assert!(cd.is_finished());
        assert!(!cd.is_running());
        assert_eq!(cd.progress(), 1.0);
        // Further ticks stay silent.
        assert!(cd.tick().is_none());
        assert_eq!(cd.progress(), 1.0);
    }

    #[test]
    fn pause_preserves_remaining() {
        let mut cd = Countdown::new();
        cd.arm(0, 5, 0).unwrap();
        cd.start().unwrap();
        cd.tick();
        cd.pause().unwrap();
        assert_eq!(cd.remaining_secs(), 5 * 60 - 1);
        cd.start().unwrap();
        assert_eq!(cd.remaining_secs(), 5 * 60 - 1);
    }

    #[test]
    fn reset_returns_to_setup() {
        let mut cd = Countdown::new();
        cd.arm(0, 1, 0).unwrap();
        cd.start().unwrap();
        cd.reset();
        assert_eq!(cd.phase(), CountdownPhase::Setup);
        assert_eq!(cd.total_secs(), 0);
        assert!(!cd.is_running());
    }

    #[test]
    fn progress_handles_zero_total() {
        let cd = Countdown::new();
        assert_eq!(cd.progress(), 0.0);
        let mut cd = Countdown::new();
        cd.arm(0, 0, 4).unwrap();
        cd.start().unwrap();
        cd.tick();
        assert!((cd.progress() - 0.25).abs() < 1e-9);
    }
}
