use crate::page::{Schedule, TimerId};

/// Runs a handler once per quiet period, with the arguments of the last call
/// in the burst.
///
/// `call` (re)arms the timer with `wake` as its task; when that task comes
/// back, pass its timer id to `fire` to get the arguments to run the handler
/// with. Superseded timers are cancelled, so `fire` only ever yields once per
/// burst.
#[derive(Debug)]
pub struct Debounce<A> {
    delay_ms: u64,
    pending: Option<(TimerId, A)>,
}

impl<A> Debounce<A> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn call<T>(&mut self, args: A, sched: &mut impl Schedule<T>, wake: T) {
        if let Some((timer, _)) = self.pending.take() {
            sched.clear_timeout(timer);
        }
        let timer = sched.set_timeout(self.delay_ms, wake);
        self.pending = Some((timer, args));
    }

    /// Take the pending arguments if `timer` is the one currently armed
    pub fn fire(&mut self, timer: TimerId) -> Option<A> {
        if self
            .pending
            .as_ref()
            .is_some_and(|(armed, _)| *armed == timer)
        {
            return self.pending.take().map(|(_, args)| args);
        }
        None
    }

    /// Drop the pending call. Returns whether one was pending.
    pub fn cancel<T>(&mut self, sched: &mut impl Schedule<T>) -> bool {
        match self.pending.take() {
            Some((timer, _)) => {
                sched.clear_timeout(timer);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod debounce_tests;
