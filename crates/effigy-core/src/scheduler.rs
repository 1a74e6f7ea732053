//! Cooperative timer scheduler driven by an explicit virtual clock.
//!
//! Timers carry a plain payload instead of a closure; the owner drains due
//! payloads with [`Scheduler::pop_due`] and dispatches them itself, so every
//! "callback" runs on the caller's thread with full mutable access to the
//! owning state and nothing ever runs concurrently.
//!
//! Typical usage:
//! - `after(delay, payload)` arms a one-shot timer
//! - `every(interval, payload)` arms a periodic timer
//! - `cancel(handle)` disarms either kind
//! - drain with `while let Some((_, p)) = s.pop_due(until) { ... }`, then
//!   `settle(until)` to move the clock to the end of the window

use fnv::FnvHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Shortest period a repeating timer may have.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Opaque handle returned by `after`/`every`, used to cancel a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Debug)]
struct Entry<T> {
    payload: T,
    repeat: Repeat,
    due: Duration,
    seq: u64,
}

// Cancelled entries linger in the heap until popped; past this much slack
// the heap is rebuilt from the live table.
const COMPACT_SLACK: usize = 16;

pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    entries: FnvHashMap<u64, Entry<T>>,
    // (due, arm order, id); cancelled ids are skipped lazily on pop
    queue: BinaryHeap<Reverse<(Duration, u64, u64)>>,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            entries: FnvHashMap::default(),
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time. While a payload is being dispatched this is the
    /// instant that payload was due.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm a one-shot timer `delay` after the current instant.
    pub fn after(&mut self, delay: Duration, payload: T) -> TimerHandle {
        self.arm(delay, Repeat::Once, payload)
    }

    /// Arm a periodic timer. The first firing happens one `interval` from now.
    pub fn every(&mut self, interval: Duration, payload: T) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        self.arm(interval, Repeat::Every(interval), payload)
    }

    /// Disarm a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.entries.remove(&handle.0).is_none() {
            return false;
        }
        if self.queue.len() > 2 * self.entries.len() + COMPACT_SLACK {
            self.compact();
        }
        true
    }

    /// Disarm every timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle.0)
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest instant at which an armed timer is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.values().map(|e| e.due).min()
    }

    /// Pop the next timer due at or before `until`, advancing the clock to
    /// its due time. Periodic timers are re-armed one interval later before
    /// their payload is returned, so a periodic timer far behind the clock
    /// fires once per elapsed interval.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, T)> {
        loop {
            let Reverse((due, seq, id)) = *self.queue.peek()?;
            if due > until {
                return None;
            }
            self.queue.pop();
            let repeat = match self.entries.get(&id) {
                Some(entry) if entry.seq == seq => entry.repeat,
                _ => continue,
            };
            self.now = self.now.max(due);
            let handle = TimerHandle(id);
            match repeat {
                Repeat::Once => {
                    let entry = self.entries.remove(&id)?;
                    return Some((handle, entry.payload));
                }
                Repeat::Every(interval) => {
                    let next_due = due + interval;
                    let seq = self.bump_seq();
                    let entry = self.entries.get_mut(&id)?;
                    entry.due = next_due;
                    entry.seq = seq;
                    let payload = entry.payload.clone();
                    self.queue.push(Reverse((next_due, seq, id)));
                    return Some((handle, payload));
                }
            }
        }
    }

    /// Move the clock forward to `until` once every due timer was drained.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn arm(&mut self, delay: Duration, repeat: Repeat, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let due = self.now + delay;
        let seq = self.bump_seq();
        self.entries.insert(
            id,
            Entry {
                payload,
                repeat,
                due,
                seq,
            },
        );
        self.queue.push(Reverse((due, seq, id)));
        TimerHandle(id)
    }

    /// Heap slots held, cancelled timers included.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn compact(&mut self) {
        self.queue = self
            .entries
            .iter()
            .map(|(&id, e)| Reverse((e.due, e.seq, id)))
            .collect();
    }

    #[inline]
    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
