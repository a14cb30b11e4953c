use chrono::Utc;
use clap::Subcommand;
use timedeck_core::{Config, CITY_CATALOG};

#[derive(Subcommand)]
pub enum ClockAction {
    /// Show every clock on the board
    List,
    /// Add a catalog city to the board
    Add {
        /// City name, e.g. "Berlin"
        city: String,
    },
    /// Remove a city from the board
    Remove {
        /// City name
        city: String,
    },
    /// List cities available to add
    Cities,
}

pub fn run(action: ClockAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ClockAction::List => {
            let config = Config::load_or_default();
            // One shared instant so every clock agrees to the second.
            let now = Utc::now();
            for clock in config.clocks.clocks() {
                println!(
                    "{:<12} {}  {}",
                    clock.city,
                    clock.time_display(now),
                    clock.date_display(now)
                );
            }
        }
        ClockAction::Add { city } => {
            let mut config = Config::load_or_default();
            config.clocks.add(&city)?;
            config.save()?;
            println!("added {city}");
        }
        ClockAction::Remove { city } => {
            let mut config = Config::load_or_default();
            config.clocks.remove(&city)?;
            config.save()?;
            println!("removed {city}");
        }
        ClockAction::Cities => {
            for (name, offset_minutes) in CITY_CATALOG {
                let sign = if *offset_minutes < 0 { '-' } else { '+' };
                let abs = offset_minutes.unsigned_abs();
                println!("{name:<12} UTC{sign}{:02}:{:02}", abs / 60, abs % 60);
            }
        }
    }
    Ok(())
}
