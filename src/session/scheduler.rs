//! Periodic tick sources for auto-run

use std::time::{Duration, Instant};

/// Something that paces repeated steps while a session is running.
///
/// The engine never sees this; only the session loop waits on it.
pub trait Scheduler {
    /// Block until the next tick is due
    fn wait_for_tick(&mut self);
}

/// Ticks on a fixed cadence measured from the previous deadline
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Scheduler for FixedInterval {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();
        let due = self.next_tick.unwrap_or(now + self.interval);
        if due > now {
            std::thread::sleep(due - now);
        }
        // If a tick overran, restart the cadence instead of bursting to catch up
        let after = Instant::now();
        self.next_tick = Some(if due + self.interval > after {
            due + self.interval
        } else {
            after + self.interval
        });
    }
}

/// Never waits; each tick is due immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn wait_for_tick(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_interval_waits() {
        let mut scheduler = FixedInterval::new(Duration::from_millis(5));
        let start = Instant::now();
        scheduler.wait_for_tick();
        scheduler.wait_for_tick();
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(scheduler.interval(), Duration::from_millis(5));
    }

    #[test]
    fn test_immediate_does_not_block() {
        let mut scheduler = Immediate;
        let start = Instant::now();
        for _ in 0..1000 {
            scheduler.wait_for_tick();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
