use std::time::{Duration, Instant};

/// The external clock that drives `GameEngine::update_game`.
///
/// The engine only starts and stops it; whoever owns the event loop asks the
/// concrete source whether a tick is due.
pub trait TickSource {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Wall-clock tick source with a fixed interval.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    running: bool,
    last_tick: Instant,
}

impl IntervalTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            last_tick: Instant::now(),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (once) when the timer is running and a full interval has
    /// passed since the previous tick.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if !self.running || now.duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick = now;
        true
    }
}

impl TickSource for IntervalTimer {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_tick = Instant::now();
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Tick source for headless runs: records start/stop and delivers nothing on
/// its own. Callers invoke `update_game` directly.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ManualTicks {
    running: bool,
    pub starts: u32,
    pub stops: u32,
}

impl TickSource for ManualTicks {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
