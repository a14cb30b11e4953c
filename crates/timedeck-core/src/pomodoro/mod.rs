mod config;
mod session;

pub use config::PomodoroConfig;
pub use session::{SessionKind, SessionTimer};
