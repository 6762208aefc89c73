//! Think-time limits for move choosers.
//!
//! The game loop hands every chooser a `ThinkLimits`. Choosers that can run
//! long (model inference, remote generation) poll it between units of work
//! and settle for their fallback once it reports that time is up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Limits for a single move decision.
#[derive(Debug, Clone)]
pub struct ThinkLimits {
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Shared clock and stop flag
    pub time_control: TimeControl,
}

impl ThinkLimits {
    pub fn unbounded() -> Self {
        Self {
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn move_time(move_time: Duration) -> Self {
        Self {
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    pub fn from_budget(move_time: Option<Duration>) -> Self {
        match move_time {
            Some(t) => Self::move_time(t),
            None => Self::unbounded(),
        }
    }

    /// Start the clock. Call this right before handing the limits out.
    pub fn start(&self) {
        self.time_control.start();
    }

    /// Checks the clock and reports whether the chooser should stop.
    pub fn should_stop(&self) -> bool {
        self.time_control.check_time()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.time_control.remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.time_control.elapsed()
    }
}

impl Default for ThinkLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Cheaply cloneable clock with a shared stop flag.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
        }
    }

    pub fn start(&self) {
        let mut start = self.start_time.write().unwrap_or_else(|e| e.into_inner());
        *start = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check time and update the stop flag if the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && self.started()
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    fn started(&self) -> bool {
        self.start_time
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining time (None if there is no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
