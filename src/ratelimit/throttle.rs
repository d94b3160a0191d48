use crate::page::{Schedule, TimerId};

/// Runs a handler at most once per interval. The first call in a window wins;
/// calls during the cooldown are dropped, not queued.
#[derive(Debug)]
pub struct Throttle {
    interval_ms: u64,
    cooldown: Option<TimerId>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            cooldown: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns `Some(args)` when the handler should run now. That starts a
    /// cooldown whose timer carries `wake`; hand its id to `release`.
    pub fn call<A, T>(&mut self, args: A, sched: &mut impl Schedule<T>, wake: T) -> Option<A> {
        if self.cooldown.is_some() {
            return None;
        }
        self.cooldown = Some(sched.set_timeout(self.interval_ms, wake));
        Some(args)
    }

    /// End the cooldown if `timer` is the one that started it
    pub fn release(&mut self, timer: TimerId) -> bool {
        if self.cooldown == Some(timer) {
            self.cooldown = None;
            return true;
        }
        false
    }

    pub fn in_cooldown(&self) -> bool {
        self.cooldown.is_some()
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod throttle_tests;
