// Host-side tests for the cooperative timer scheduler.

use effigy_core::Scheduler;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn drain(s: &mut Scheduler<&'static str>, until: Duration) -> Vec<(u64, &'static str)> {
    let mut fired = Vec::new();
    while let Some((_, payload)) = s.pop_due(until) {
        fired.push((s.now().as_millis() as u64, payload));
    }
    s.settle(until);
    fired
}

#[test]
fn one_shot_fires_once_at_its_due_time() {
    let mut s = Scheduler::new();
    s.after(ms(100), "a");
    assert!(drain(&mut s, ms(99)).is_empty());
    assert_eq!(drain(&mut s, ms(100)), vec![(100, "a")]);
    assert!(drain(&mut s, ms(1_000)).is_empty());
    assert_eq!(s.pending(), 0);
    assert_eq!(s.now(), ms(1_000));
}

#[test]
fn timers_fire_in_due_order_with_ties_in_arm_order() {
    let mut s = Scheduler::new();
    s.after(ms(300), "c");
    s.after(ms(100), "a");
    s.after(ms(100), "b");
    assert_eq!(
        drain(&mut s, ms(500)),
        vec![(100, "a"), (100, "b"), (300, "c")]
    );
}

#[test]
fn periodic_fires_once_per_elapsed_interval() {
    let mut s = Scheduler::new();
    s.every(ms(500), "tick");
    let fired = drain(&mut s, ms(1_600));
    assert_eq!(fired, vec![(500, "tick"), (1_000, "tick"), (1_500, "tick")]);
    assert_eq!(s.pending(), 1);
    assert_eq!(s.next_due(), Some(ms(2_000)));
}

#[test]
fn cancel_prevents_firing_and_reports_once() {
    let mut s = Scheduler::new();
    let h = s.after(ms(100), "a");
    assert!(s.is_pending(h));
    assert!(s.cancel(h));
    assert!(!s.cancel(h));
    assert!(!s.is_pending(h));
    assert!(drain(&mut s, ms(1_000)).is_empty());
}

#[test]
fn cancelling_a_periodic_timer_stops_it() {
    let mut s = Scheduler::new();
    let h = s.every(ms(100), "tick");
    assert_eq!(drain(&mut s, ms(250)).len(), 2);
    assert!(s.cancel(h));
    assert!(drain(&mut s, ms(5_000)).is_empty());
}

#[test]
fn timers_armed_while_draining_offset_from_the_firing_instant() {
    let mut s = Scheduler::new();
    s.after(ms(100), "first");
    let (_, first) = s.pop_due(ms(1_000)).expect("first is due");
    assert_eq!(first, "first");
    assert_eq!(s.now(), ms(100));
    s.after(ms(50), "second");
    assert_eq!(drain(&mut s, ms(1_000)), vec![(150, "second")]);
}

#[test]
fn zero_interval_is_clamped_to_one_millisecond() {
    let mut s = Scheduler::new();
    s.every(Duration::ZERO, "spin");
    assert_eq!(drain(&mut s, ms(3)).len(), 3);
}

#[test]
fn cancel_all_disarms_everything() {
    let mut s = Scheduler::new();
    s.after(ms(10), "a");
    s.every(ms(10), "b");
    s.cancel_all();
    assert_eq!(s.pending(), 0);
    assert_eq!(s.next_due(), None);
    assert!(drain(&mut s, ms(100)).is_empty());
}

#[test]
fn clock_never_moves_backwards() {
    let mut s: Scheduler<&'static str> = Scheduler::new();
    s.settle(ms(100));
    s.settle(ms(50));
    assert_eq!(s.now(), ms(100));
    s.after(ms(10), "a");
    assert_eq!(drain(&mut s, ms(60)), vec![]);
    assert_eq!(drain(&mut s, ms(110)), vec![(110, "a")]);
}

#[test]
fn cancelled_timers_do_not_pile_up() {
    let mut s = Scheduler::new();
    s.every(ms(100), "tick");
    for _ in 0..200 {
        let handles: Vec<_> = (1..=5).map(|k| s.after(ms(60_000 * k), "stage")).collect();
        for h in handles {
            s.cancel(h);
        }
    }
    assert_eq!(s.pending(), 1);
    assert!(s.queued() <= 2 * s.pending() + 16 + 1, "queued {}", s.queued());
    assert_eq!(drain(&mut s, ms(300)).len(), 3);
}

#[test]
fn compaction_keeps_arm_order_for_ties() {
    let mut s = Scheduler::new();
    let keep: Vec<&'static str> = vec!["a", "b", "c", "d"];
    for &name in &keep {
        s.after(ms(100), name);
    }
    let doomed: Vec<_> = (0..40).map(|_| s.after(ms(100), "x")).collect();
    for h in doomed {
        s.cancel(h);
    }
    assert!(s.queued() < 44);
    let fired: Vec<_> = drain(&mut s, ms(100)).into_iter().map(|(_, p)| p).collect();
    assert_eq!(fired, keep);
}
