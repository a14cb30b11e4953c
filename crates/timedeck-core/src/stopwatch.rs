//! Wall-clock stopwatch with lap bookkeeping.
//!
//! Elapsed time is derived from wall-clock deltas (accumulated time plus
//! the span since the last resume), so a persisted stopwatch keeps
//! counting across CLI invocations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based lap number.
    pub index: u32,
    /// Total elapsed time when the lap was recorded.
    pub total_ms: u64,
    /// Time since the previous lap (or since start for the first lap).
    pub split_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    /// Elapsed milliseconds accumulated across previous run segments.
    accumulated_ms: u64,
    /// Epoch ms of the last resume; `None` while paused.
    #[serde(default)]
    resumed_epoch_ms: Option<u64>,
    #[serde(default)]
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.resumed_epoch_ms.is_some()
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Total elapsed milliseconds right now.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_at(now_ms())
    }

    pub fn start(&mut self) {
        if self.resumed_epoch_ms.is_none() {
            self.resumed_epoch_ms = Some(now_ms());
        }
    }

    pub fn pause(&mut self) {
        if let Some(resumed) = self.resumed_epoch_ms.take() {
            let now = now_ms();
            self.accumulated_ms += now.saturating_sub(resumed);
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.resumed_epoch_ms = None;
        self.laps.clear();
    }

    /// Record a lap at the current elapsed time.
    pub fn lap(&mut self) -> Lap {
        let total_ms = self.elapsed_ms();
        let previous_total = self.laps.last().map(|l| l.total_ms).unwrap_or(0);
        let lap = Lap {
            index: self.laps.len() as u32 + 1,
            total_ms,
            split_ms: total_ms.saturating_sub(previous_total),
        };
        self.laps.push(lap);
        lap
    }

    pub fn fastest_lap(&self) -> Option<&Lap> {
        self.laps.iter().min_by_key(|l| l.split_ms)
    }

    pub fn slowest_lap(&self) -> Option<&Lap> {
        self.laps.iter().max_by_key(|l| l.split_ms)
    }

    fn elapsed_at(&self, now: u64) -> u64 {
        match self.resumed_epoch_ms {
            Some(resumed) => self.accumulated_ms + now.saturating_sub(resumed),
            None => self.accumulated_ms,
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn starts_at_zero_and_paused() {
        let sw = Stopwatch::new();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn pause_freezes_elapsed_time() {
        let mut sw = Stopwatch::new();
        sw.start();
        sleep(Duration::from_millis(20));
        sw.pause();
        let frozen = sw.elapsed_ms();
        assert!(frozen >= 20);
        sleep(Duration::from_millis(20));
        assert_eq!(sw.elapsed_ms(), frozen);
    }

    #[test]
    fn resume_continues_accumulating() {
        let mut sw = Stopwatch::new();
        sw.start();
        sleep(Duration::from_millis(15));
        sw.pause();
        let first = sw.elapsed_ms();
        sw.start();
        sleep(Duration::from_millis(15));
        assert!(sw.elapsed_ms() > first);
    }

    #[test]
    fn laps_record_totals_and_splits() {
        let mut sw = Stopwatch::new();
        sw.start();
        sleep(Duration::from_millis(15));
        let first = sw.lap();
        sleep(Duration::from_millis(15));
        let second = sw.lap();
        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert_eq!(first.split_ms, first.total_ms);
        assert_eq!(second.split_ms, second.total_ms - first.total_ms);
    }

    #[test]
    fn fastest_and_slowest_bound_the_splits() {
        let mut sw = Stopwatch::new();
        sw.start();
        sleep(Duration::from_millis(10));
        sw.lap();
        sleep(Duration::from_millis(25));
        sw.lap();
        let fastest = sw.fastest_lap().unwrap().split_ms;
        let slowest = sw.slowest_lap().unwrap().split_ms;
        assert!(fastest <= slowest);
    }

    #[test]
    fn reset_clears_time_and_laps() {
        let mut sw = Stopwatch::new();
        sw.start();
        sleep(Duration::from_millis(10));
        sw.lap();
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());
    }
}
