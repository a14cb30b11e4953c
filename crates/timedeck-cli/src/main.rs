use clap::{Parser, Subcommand};

mod audio;
mod commands;

#[derive(Parser)]
#[command(name = "timedeck", version, about = "Timedeck time-management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro session timer
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// One-shot countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::countdown::CountdownAction,
    },
    /// Stopwatch with laps
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
    /// World-clock board
    Clock {
        #[command(subcommand)]
        action: commands::clock::ClockAction,
    },
    /// Daily planner
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pomodoro { action } => commands::pomodoro::run(action),
        Commands::Timer { action } => commands::countdown::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
        Commands::Clock { action } => commands::clock::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats { action } => commands::stats::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
