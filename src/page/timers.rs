use std::collections::{BTreeMap, HashMap, VecDeque};

/// Handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Anything that can schedule a delayed task on a millisecond clock
pub trait Schedule<T> {
    fn now_ms(&self) -> u64;

    fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId;

    /// Cancel a pending timer. Returns false if it already fired or was cleared.
    fn clear_timeout(&mut self, id: TimerId) -> bool;
}

/// Virtual-clock timer queue plus animation-frame queue.
///
/// Timers fire in (due time, creation order). Frames run in batches: a frame
/// requested while a batch is running lands in the next batch.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u64,
    timers: BTreeMap<(u64, TimerId), T>,
    due_by_id: HashMap<TimerId, u64>,
    frames: VecDeque<T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: BTreeMap::new(),
            due_by_id: HashMap::new(),
            frames: VecDeque::new(),
        }
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|(due, _)| *due)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.timers.iter().next()?;
        if due > until {
            return None;
        }
        let task = self.timers.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    pub fn request_frame(&mut self, task: T) {
        self.frames.push_back(task);
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Take every frame callback requested so far
    pub fn take_frame_batch(&mut self) -> Vec<T> {
        self.frames.drain(..).collect()
    }
}

impl<T> Schedule<T> for TimerQueue<T> {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay_ms);
        self.timers.insert((due, id), task);
        self.due_by_id.insert(id, due);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.timers.remove(&(due, id)).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(30, "late");
        queue.set_timeout(10, "early");
        queue.set_timeout(10, "early-second");

        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(100))
            .map(|(_, t)| t)
            .collect();
        assert_eq!(fired, vec!["early", "early-second", "late"]);
        assert_eq!(queue.now_ms(), 30);
    }

    #[test]
    fn test_pop_due_respects_limit() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(50, "a");
        assert!(queue.pop_due(49).is_none());
        assert_eq!(queue.pop_due(50).map(|(_, t)| t), Some("a"));
    }

    #[test]
    fn test_clear_timeout() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout(10, "a");
        assert!(queue.is_pending(id));
        assert!(queue.clear_timeout(id));
        assert!(!queue.clear_timeout(id));
        assert!(queue.pop_due(100).is_none());
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut queue = TimerQueue::new();
        queue.advance_clock(1000);
        queue.set_timeout(5, "a");
        assert_eq!(queue.next_due(), Some(1005));
        queue.advance_clock(10);
        assert_eq!(queue.now_ms(), 1000);
    }

    #[test]
    fn test_frame_batches() {
        let mut queue = TimerQueue::new();
        queue.request_frame(1);
        queue.request_frame(2);
        let batch = queue.take_frame_batch();
        assert_eq!(batch, vec![1, 2]);
        assert_eq!(queue.pending_frames(), 0);
    }
}
