mod config;
pub mod database;

pub use config::{Config, NotificationsConfig};
pub use database::{Database, Stats};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the timedeck data directory, creating it if needed.
///
/// Defaults to `~/.config/timedeck[-dev]`; `TIMEDECK_ENV=dev` selects the
/// development directory and `TIMEDECK_HOME` overrides the base (used by
/// tests to point at a temp dir).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = match std::env::var_os("TIMEDECK_HOME") {
        Some(base) => PathBuf::from(base),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("TIMEDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timedeck-dev")
    } else {
        base_dir.join("timedeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in the crate that touches TIMEDECK_HOME; everything
    // else uses in-memory storage.
    #[test]
    fn home_override_and_config_round_trip() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::env::set_var("TIMEDECK_HOME", tmp.path());

        let dir = data_dir().unwrap();
        assert!(dir.starts_with(tmp.path()));
        assert!(dir.is_dir());

        let mut cfg = Config::default();
        cfg.pomodoro.work_minutes = 30;
        cfg.save().unwrap();
        let loaded = Config::load().unwrap();
        assert_eq!(loaded.pomodoro.work_minutes, 30);

        // A hand-edited zero field must fail load, not reach the machine.
        std::fs::write(
            dir.join("config.toml"),
            "[pomodoro]\nsessions_until_long_break = 0\n",
        )
        .unwrap();
        assert!(Config::load().is_err());
        let fallback = Config::load_or_default();
        assert_eq!(fallback.pomodoro, crate::pomodoro::PomodoroConfig::default());

        std::env::remove_var("TIMEDECK_HOME");
    }
}
