use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use timedeck_core::storage::Database;
use timedeck_core::countdown::PRESET_MINUTES;
use timedeck_core::{
    format, tick, Config, Countdown, CountdownPhase, Event, Notifier, NullNotifier,
};

use crate::audio::ChimeNotifier;

const COUNTDOWN_KEY: &str = "countdown";

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Set the countdown duration
    Set {
        #[arg(long, default_value = "0")]
        hours: u32,
        #[arg(long, default_value = "0")]
        minutes: u32,
        #[arg(long, default_value = "0")]
        seconds: u32,
    },
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Discard the countdown and return to setup
    Reset,
    /// Print the countdown state as JSON
    Status,
    /// Drive the countdown until it finishes
    Run,
}

fn load_countdown(db: &Database) -> Countdown {
    if let Ok(Some(json)) = db.kv_get(COUNTDOWN_KEY) {
        if let Ok(countdown) = serde_json::from_str::<Countdown>(&json) {
            return countdown;
        }
    }
    Countdown::new()
}

fn save_countdown(db: &Database, countdown: &Countdown) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(countdown)?;
    db.kv_set(COUNTDOWN_KEY, &json)?;
    Ok(())
}

pub fn run(action: CountdownAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut countdown = load_countdown(&db);

    match action {
        CountdownAction::Set {
            hours,
            minutes,
            seconds,
        } => {
            countdown.arm(hours, minutes, seconds)?;
            println!("countdown set to {}", format::hms(countdown.total_secs()));
        }
        CountdownAction::Start => {
            if let Some(event) = countdown.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("nothing to start: set a duration first");
            }
        }
        CountdownAction::Pause => {
            if let Some(event) = countdown.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        CountdownAction::Reset => {
            countdown.reset();
            println!("countdown reset");
        }
        CountdownAction::Status => {
            if countdown.phase() == CountdownPhase::Setup {
                let presets: Vec<String> =
                    PRESET_MINUTES.iter().map(|m| m.to_string()).collect();
                println!(
                    "no duration set (presets: {} minutes)",
                    presets.join(", ")
                );
            } else {
                println!(
                    "{} remaining of {} ({:.0}%)",
                    format::hms(countdown.remaining_secs()),
                    format::hms(countdown.total_secs()),
                    countdown.progress() * 100.0
                );
            }
        }
        CountdownAction::Run => {
            let config = Config::load_or_default();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(drive_countdown(&mut countdown, &config))?;
        }
    }

    save_countdown(&db, &countdown)?;
    Ok(())
}

/// Tick the countdown once per second until it finishes or ctrl-c.
async fn drive_countdown(
    countdown: &mut Countdown,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    countdown.start();
    if !countdown.is_running() {
        println!("nothing to run: set a duration first");
        return Ok(());
    }

    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(ChimeNotifier::new(config.notifications.volume))
    } else {
        Box::new(NullNotifier)
    };
    let (handle, mut ticks) = tick::arm(Duration::from_secs(1));

    render_status_line(countdown);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                countdown.pause();
                println!();
                println!("paused at {}", format::hms(countdown.remaining_secs()));
                break;
            }
            received = ticks.recv() => {
                if received.is_none() {
                    break;
                }
                match countdown.tick() {
                    Some(Event::CountdownFinished { total_secs, .. }) => {
                        notifier.chime();
                        println!();
                        println!("time's up ({} elapsed)", format::hms(total_secs));
                        break;
                    }
                    _ => render_status_line(countdown),
                }
            }
        }
    }
    handle.disarm();
    Ok(())
}

fn render_status_line(countdown: &Countdown) {
    print!(
        "\r{}  {:>3.0}%",
        format::hms(countdown.remaining_secs()),
        countdown.progress() * 100.0
    );
    let _ = std::io::stdout().flush();
}
