use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pomodoro::{PomodoroConfig, SessionKind};

/// Every state change in a widget engine produces an Event.
/// The CLI prints them as JSON; the notifier reacts to completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        kind: SessionKind,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A session reached zero and the machine moved to the next kind.
    /// Emitted exactly once per zero-crossing.
    SessionCompleted {
        from: SessionKind,
        to: SessionKind,
        completed_work_sessions: u32,
        at: DateTime<Utc>,
    },
    /// A validated configuration replaced the previous one; the timer is
    /// stopped and remaining time recomputed for the current kind.
    ConfigApplied {
        config: PomodoroConfig,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    CountdownFinished {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// Full display-facing state of the session timer.
    Snapshot {
        kind: SessionKind,
        label: String,
        remaining_secs: u32,
        display: String,
        progress: f64,
        completed_work_sessions: u32,
        sessions_until_long_break: u32,
        running: bool,
        at: DateTime<Utc>,
    },
}
