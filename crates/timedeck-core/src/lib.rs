//! # Timedeck Core Library
//!
//! Core business logic for Timedeck, a set of time-management widgets
//! (Pomodoro session timer, countdown timer, stopwatch, world-clock
//! board, daily planner) behind a CLI-first interface. The CLI binary is
//! a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Session machine**: a tick-driven state machine cycling work and
//!   break sessions; the caller owns the tick source and invokes `tick()`
//!   once per second
//! - **Tick source**: a tokio-backed periodic channel behind an owned
//!   handle with deterministic disarm semantics
//! - **Storage**: SQLite for tasks, session history and engine snapshots;
//!   TOML for configuration
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Pomodoro session state machine
//! - [`Countdown`] / [`Stopwatch`] / [`ClockBoard`]: companion widgets
//! - [`Database`]: task and session persistence
//! - [`Config`]: application configuration management

pub mod countdown;
pub mod error;
pub mod events;
pub mod format;
pub mod notify;
pub mod planner;
pub mod pomodoro;
pub mod stopwatch;
pub mod storage;
pub mod tick;
pub mod worldclock;

pub use countdown::{Countdown, CountdownPhase};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use notify::{Notifier, NullNotifier};
pub use planner::{PlannerProgress, Priority, Task};
pub use pomodoro::{PomodoroConfig, SessionKind, SessionTimer};
pub use stopwatch::{Lap, Stopwatch};
pub use storage::{Config, Database};
pub use tick::TickHandle;
pub use worldclock::{CityClock, ClockBoard, CITY_CATALOG};
