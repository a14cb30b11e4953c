use clap::Subcommand;
use timedeck_core::storage::Database;
use timedeck_core::{format, Stopwatch};

const STOPWATCH_KEY: &str = "stopwatch";

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start (or resume) the stopwatch
    Start,
    /// Pause the stopwatch
    Pause,
    /// Record a lap at the current elapsed time
    Lap,
    /// Stop and clear elapsed time and laps
    Reset,
    /// Print elapsed time and laps
    Status,
}

fn load_stopwatch(db: &Database) -> Stopwatch {
    if let Ok(Some(json)) = db.kv_get(STOPWATCH_KEY) {
        if let Ok(sw) = serde_json::from_str::<Stopwatch>(&json) {
            return sw;
        }
    }
    Stopwatch::new()
}

fn save_stopwatch(db: &Database, sw: &Stopwatch) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(sw)?;
    db.kv_set(STOPWATCH_KEY, &json)?;
    Ok(())
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut sw = load_stopwatch(&db);

    match action {
        StopwatchAction::Start => {
            sw.start();
            println!("running at {}", format::stopwatch_ms(sw.elapsed_ms()));
        }
        StopwatchAction::Pause => {
            sw.pause();
            println!("paused at {}", format::stopwatch_ms(sw.elapsed_ms()));
        }
        StopwatchAction::Lap => {
            let lap = sw.lap();
            println!(
                "lap {}: {} (total {})",
                lap.index,
                format::stopwatch_ms(lap.split_ms),
                format::stopwatch_ms(lap.total_ms)
            );
        }
        StopwatchAction::Reset => {
            sw.reset();
            println!("stopwatch reset");
        }
        StopwatchAction::Status => {
            let state = if sw.is_running() { "running" } else { "paused" };
            println!("{} ({state})", format::stopwatch_ms(sw.elapsed_ms()));
            let fastest = sw.fastest_lap().map(|l| l.index);
            let slowest = sw.slowest_lap().map(|l| l.index);
            for lap in sw.laps().iter().rev() {
                let marker = if Some(lap.index) == fastest && sw.laps().len() > 1 {
                    " fastest"
                } else if Some(lap.index) == slowest && sw.laps().len() > 1 {
                    " slowest"
                } else {
                    ""
                };
                println!(
                    "  lap {:>3}  {}  (total {}){marker}",
                    lap.index,
                    format::stopwatch_ms(lap.split_ms),
                    format::stopwatch_ms(lap.total_ms)
                );
            }
        }
    }

    save_stopwatch(&db, &sw)?;
    Ok(())
}
