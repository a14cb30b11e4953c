use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use timedeck_core::storage::Database;
use timedeck_core::{
    format, tick, Config, Event, Notifier, NullNotifier, PomodoroConfig, SessionTimer,
};

use crate::audio::ChimeNotifier;

const TIMER_KEY: &str = "session_timer";

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start (or resume) the current session
    Start,
    /// Pause the countdown, preserving remaining time
    Pause,
    /// Restore the full duration of the current session kind
    Reset,
    /// Print the current timer state as JSON
    Status,
    /// Update session durations and long-break cadence
    Set {
        /// Work session length in minutes
        #[arg(long)]
        work: Option<u32>,
        /// Short break length in minutes
        #[arg(long)]
        short: Option<u32>,
        /// Long break length in minutes
        #[arg(long)]
        long: Option<u32>,
        /// Work sessions before a long break
        #[arg(long)]
        sessions: Option<u32>,
    },
    /// Drive the session interactively until it completes
    Run,
}

fn load_timer(db: &Database) -> SessionTimer {
    if let Ok(Some(json)) = db.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<SessionTimer>(&json) {
            // A tampered snapshot with a zero field must not reach the
            // cadence rule.
            if timer.config().validate().is_ok() {
                return timer;
            }
        }
    }
    log::debug!("no persisted session timer, starting fresh");
    SessionTimer::new(Config::load_or_default().pomodoro)
}

fn save_timer(db: &Database, timer: &SessionTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut timer = load_timer(&db);

    match action {
        PomodoroAction::Start => {
            if let Some(event) = timer.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
            }
        }
        PomodoroAction::Pause => {
            if let Some(event) = timer.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
            }
        }
        PomodoroAction::Reset => {
            if let Some(event) = timer.reset() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        PomodoroAction::Status => {
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        PomodoroAction::Set {
            work,
            short,
            long,
            sessions,
        } => {
            let mut config = Config::load_or_default();
            let current = *timer.config();
            let candidate = PomodoroConfig {
                work_minutes: work.unwrap_or(current.work_minutes),
                short_break_minutes: short.unwrap_or(current.short_break_minutes),
                long_break_minutes: long.unwrap_or(current.long_break_minutes),
                sessions_until_long_break: sessions.unwrap_or(current.sessions_until_long_break),
            };
            // Rejection leaves both the machine and the saved config intact.
            let event = timer.apply_config(candidate)?;
            config.pomodoro = candidate;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PomodoroAction::Run => {
            let config = Config::load_or_default();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(drive_session(&db, &mut timer, &config))?;
        }
    }

    save_timer(&db, &timer)?;
    Ok(())
}

/// Tick the session once per second until it completes or ctrl-c.
async fn drive_session(
    db: &Database,
    timer: &mut SessionTimer,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    timer.start();
    if !timer.is_running() {
        println!("nothing to run: the current session has no remaining time");
        return Ok(());
    }

    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(ChimeNotifier::new(config.notifications.volume))
    } else {
        Box::new(NullNotifier)
    };
    let started_at = Utc::now();
    let (handle, mut ticks) = tick::arm(Duration::from_secs(1));

    render_status_line(timer);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                timer.pause();
                println!();
                println!("paused at {}", format::mm_ss(timer.remaining_secs()));
                break;
            }
            received = ticks.recv() => {
                if received.is_none() {
                    break;
                }
                match timer.tick() {
                    Some(Event::SessionCompleted { from, to, completed_work_sessions, at }) => {
                        // Chime first, exactly once, before the new state is shown.
                        notifier.chime();
                        let duration_min = u64::from(timer.config().duration_minutes(from));
                        db.record_session(from, duration_min, started_at, at)?;
                        println!();
                        println!(
                            "{} complete, next up: {} ({completed_work_sessions} work sessions done)",
                            from.label(),
                            to.label(),
                        );
                        break;
                    }
                    _ => render_status_line(timer),
                }
            }
        }
    }
    handle.disarm();
    Ok(())
}

fn render_status_line(timer: &SessionTimer) {
    print!(
        "\r{:11} {}  {:>3.0}%",
        timer.kind().label(),
        format::mm_ss(timer.remaining_secs()),
        timer.progress() * 100.0
    );
    let _ = std::io::stdout().flush();
}
