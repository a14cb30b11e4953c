use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::SessionKind;

/// The four user-adjustable values governing session lengths and
/// long-break cadence. All fields must stay positive; a candidate that
/// violates this is rejected wholesale and never partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
        }
    }
}

impl PomodoroConfig {
    /// Check the positivity invariant on all four fields.
    ///
    /// # Errors
    /// Returns the first zero field found. Callers must treat any error as
    /// rejection of the whole candidate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("work_minutes", self.work_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
            ("sessions_until_long_break", self.sessions_until_long_break),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ValidationError::invalid(name, "must be a positive integer"));
            }
        }
        Ok(())
    }

    /// Configured duration in minutes for a session kind.
    pub fn duration_minutes(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_minutes,
            SessionKind::ShortBreak => self.short_break_minutes,
            SessionKind::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured duration in seconds for a session kind.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self, kind: SessionKind) -> u32 {
        self.duration_minutes(kind).saturating_mul(60)
    }
}
