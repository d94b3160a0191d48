//! Tests for debounce

use super::*;
use crate::page::TimerQueue;
use proptest::prelude::*;

const TEST_DELAY_MS: u64 = 300;

/// Run every timer and collect (fire time, args) for the ones the debouncer
/// accepts
fn drain(debounce: &mut Debounce<u32>, queue: &mut TimerQueue<&'static str>) -> Vec<(u64, u32)> {
    let mut fired = Vec::new();
    while let Some((id, _)) = queue.pop_due(u64::MAX) {
        if let Some(args) = debounce.fire(id) {
            fired.push((queue.now_ms(), args));
        }
    }
    fired
}

#[test]
fn test_new_debounce_has_no_pending() {
    let debounce: Debounce<u32> = Debounce::new(TEST_DELAY_MS);
    assert!(!debounce.is_pending());
    assert_eq!(debounce.delay_ms(), TEST_DELAY_MS);
}

#[test]
fn test_single_call_fires_after_delay() {
    let mut queue = TimerQueue::new();
    let mut debounce = Debounce::new(TEST_DELAY_MS);

    queue.advance_clock(40);
    debounce.call(7, &mut queue, "wake");
    assert!(debounce.is_pending());
    assert!(queue.pop_due(40 + TEST_DELAY_MS - 1).is_none());

    assert_eq!(drain(&mut debounce, &mut queue), vec![(40 + TEST_DELAY_MS, 7)]);
    assert!(!debounce.is_pending());
}

#[test]
fn test_new_call_replaces_pending_timer() {
    let mut queue = TimerQueue::new();
    let mut debounce = Debounce::new(TEST_DELAY_MS);

    debounce.call(1, &mut queue, "wake");
    queue.advance_clock(100);
    debounce.call(2, &mut queue, "wake");

    assert_eq!(queue.pending_timers(), 1);
    assert_eq!(drain(&mut debounce, &mut queue), vec![(100 + TEST_DELAY_MS, 2)]);
}

#[test]
fn test_foreign_timer_does_not_fire() {
    let mut queue = TimerQueue::new();
    let mut debounce = Debounce::new(TEST_DELAY_MS);

    let foreign = queue.set_timeout(0, "other");
    debounce.call(1, &mut queue, "wake");
    assert_eq!(debounce.fire(foreign), None);
    assert!(debounce.is_pending());
}

#[test]
fn test_cancel_drops_pending_call() {
    let mut queue = TimerQueue::new();
    let mut debounce = Debounce::new(TEST_DELAY_MS);

    debounce.call(1, &mut queue, "wake");
    assert!(debounce.cancel(&mut queue));
    assert!(!debounce.cancel(&mut queue));
    assert_eq!(queue.pending_timers(), 0);
    assert!(drain(&mut debounce, &mut queue).is_empty());
}

#[test]
fn test_separate_bursts_fire_separately() {
    let mut queue = TimerQueue::new();
    let mut debounce = Debounce::new(TEST_DELAY_MS);

    debounce.call(1, &mut queue, "wake");
    let first = drain(&mut debounce, &mut queue);

    queue.advance_clock(1000);
    debounce.call(2, &mut queue, "wake");
    let second = drain(&mut debounce, &mut queue);

    assert_eq!(first, vec![(TEST_DELAY_MS, 1)]);
    assert_eq!(second, vec![(1000 + TEST_DELAY_MS, 2)]);
}

// For any burst of calls where each call arrives within the delay of the
// previous one, the handler fires exactly once, with the last call's
// arguments, exactly `delay` after the last call.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_burst_fires_once_with_last_args(
        gaps in prop::collection::vec(0u64..TEST_DELAY_MS, 1..20)
    ) {
        let mut queue = TimerQueue::new();
        let mut debounce = Debounce::new(TEST_DELAY_MS);
        let mut now = 0;

        for (i, gap) in gaps.iter().enumerate() {
            now += gap;
            // Nothing may fire inside the burst
            prop_assert!(queue.pop_due(now).is_none());
            queue.advance_clock(now);
            debounce.call(i as u32, &mut queue, "wake");
        }

        let fired = drain(&mut debounce, &mut queue);
        let last = (gaps.len() - 1) as u32;
        prop_assert_eq!(fired, vec![(now + TEST_DELAY_MS, last)]);
    }
}
