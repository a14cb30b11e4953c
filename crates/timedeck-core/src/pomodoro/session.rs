//! Pomodoro session state machine.
//!
//! The machine is tick-driven. It does not use internal threads - the
//! caller owns a tick source and calls `tick()` once per second while the
//! timer is running.
//!
//! ## Session cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//! ```
//!
//! A work session completing increments the completed-session counter;
//! every `sessions_until_long_break`-th completion routes to the long
//! break instead of the short one. The machine cycles indefinitely.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::format;

use super::PomodoroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::ShortBreak => "Short Break",
            SessionKind::LongBreak => "Long Break",
        }
    }
}

/// Core session state machine.
///
/// Owns its configuration; the configuration is only ever replaced
/// wholesale through [`SessionTimer::apply_config`]. Serializable so the
/// CLI can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    config: PomodoroConfig,
    kind: SessionKind,
    /// Remaining time in seconds for the current session.
    remaining_secs: u32,
    running: bool,
    completed_work_sessions: u32,
}

impl SessionTimer {
    /// Create a new machine: a full work session, not running.
    ///
    /// A config with a zero field cannot drive the cadence rule; such a
    /// candidate is discarded in favor of the defaults.
    pub fn new(config: PomodoroConfig) -> Self {
        let config = if config.validate().is_ok() {
            config
        } else {
            PomodoroConfig::default()
        };
        let remaining_secs = config.duration_secs(SessionKind::Work);
        Self {
            config,
            kind: SessionKind::Work,
            remaining_secs,
            running: false,
            completed_work_sessions: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    pub fn total_secs(&self) -> u32 {
        self.config.duration_secs(self.kind)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs) as f64;
        (elapsed / total as f64).clamp(0.0, 1.0)
    }

    /// Build a full display-facing snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::Snapshot {
            kind: self.kind,
            label: self.kind.label().to_string(),
            remaining_secs: self.remaining_secs,
            display: format::mm_ss(self.remaining_secs),
            progress: self.progress(),
            completed_work_sessions: self.completed_work_sessions,
            sessions_until_long_break: self.config.sessions_until_long_break,
            running: self.running,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. No-op when the session is already exhausted;
    /// the invariant keeps `running` false at zero remaining.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        Some(Event::SessionStarted {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown, preserving remaining time exactly so that a
    /// later `start()` resumes from the same count.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::SessionPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restore the full duration of the *current* kind. Never changes the
    /// kind or the completed-session counter.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.total_secs();
        Some(Event::SessionReset {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Apply one second of countdown. Returns the completion event when
    /// the session reaches zero. Ticks arriving while not running are
    /// no-ops, never errors.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            return Some(self.complete());
        }
        None
    }

    /// Replace the configuration wholesale.
    ///
    /// Stops the timer and recomputes remaining time from the new config
    /// and the *current* kind, so a user reconfiguring mid-break stays in
    /// the break. Kind and completed-session counter are preserved.
    ///
    /// # Errors
    /// Rejects the whole candidate if any field is zero; the prior
    /// configuration and run state stay untouched.
    pub fn apply_config(&mut self, candidate: PomodoroConfig) -> Result<Event, ValidationError> {
        candidate.validate()?;
        self.config = candidate;
        self.running = false;
        self.remaining_secs = self.total_secs();
        Ok(Event::ConfigApplied {
            config: self.config,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        let from = self.kind;
        let to = match self.kind {
            SessionKind::Work => {
                self.completed_work_sessions += 1;
                if self.completed_work_sessions % self.config.sessions_until_long_break == 0 {
                    SessionKind::LongBreak
                } else {
                    SessionKind::ShortBreak
                }
            }
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Work,
        };
        self.kind = to;
        self.remaining_secs = self.config.duration_secs(to);
        self.running = false;
        Event::SessionCompleted {
            from,
            to,
            completed_work_sessions: self.completed_work_sessions,
            at: Utc::now(),
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(PomodoroConfig::default())
    }
}
