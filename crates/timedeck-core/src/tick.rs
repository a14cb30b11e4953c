//! Periodic tick source with scoped ownership.
//!
//! `arm()` returns an explicit [`TickHandle`] alongside the tick channel.
//! Disarming - explicitly or by dropping the handle - aborts the producer
//! task, so no tick can be delivered after pause, reset, reconfiguration
//! or teardown. At most one handle exists per driver loop; the driver owns
//! both the handle and the machine it ticks, and all state mutation stays
//! on the consuming task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owned handle to an armed tick source.
///
/// Dropping the handle disarms the source.
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Disarm the tick source immediately. Equivalent to dropping the
    /// handle; provided so call sites can make cancellation explicit.
    pub fn disarm(self) {
        // Drop does the abort.
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Arm a tick source firing every `period`.
///
/// The first tick is delivered one full period after arming. The channel
/// is bounded at one pending tick; if the consumer falls behind, extra
/// firings are dropped rather than queued, so ticks never overlap and a
/// slow consumer never receives a burst of stale decrements.
pub fn arm(period: Duration) -> (TickHandle, mpsc::Receiver<()>) {
    let (tx, rx) = mpsc::channel(1);
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval fires immediately on the first poll.
        interval.tick().await;
        loop {
            interval.tick().await;
            // try_send: skip the firing when the previous tick is still
            // unconsumed. A closed channel means the receiver is gone.
            match tx.try_send(()) {
                Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
                Err(mpsc::error::TrySendError::Closed(())) => break,
            }
        }
    });
    (TickHandle { task }, rx)
}
