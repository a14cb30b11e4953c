pub mod clock;
pub mod config;
pub mod countdown;
pub mod pomodoro;
pub mod stats;
pub mod stopwatch;
pub mod task;
