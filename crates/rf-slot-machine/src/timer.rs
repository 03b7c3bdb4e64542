//! Millisecond timer queue
//!
//! Delayed work for the spin sequence. Tasks are plain data scheduled against
//! a clock that only moves when [`TimerQueue::advance`] is called, so the whole
//! sequence runs on the caller's frame loop.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Task waiting for its due time
#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    due_ms: f64,
    task: T,
}

/// Clock plus pending tasks, fired in due order (FIFO on ties)
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: f64,
    next_id: u64,
    pending: Vec<ScheduledTask<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current clock (ms since creation)
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `task` to become due `delay_ms` from now. Negative delays count as 0.
    pub fn schedule(&mut self, delay_ms: f64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTask {
            handle,
            due_ms: self.now_ms + delay_ms.max(0.0),
            task,
        });
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every pending task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Move the clock forward. Does not fire anything; drain with [`TimerQueue::pop_due`].
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms > 0.0 {
            self.now_ms += elapsed_ms;
        }
    }

    /// Remove and return the earliest task due at or before now
    pub fn pop_due(&mut self) -> Option<(TaskHandle, T)> {
        let now = self.now_ms;
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then_with(|| a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        let fired = self.pending.remove(index);
        Some((fired.handle, fired.task))
    }

    /// Is the task still waiting?
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Due time of the next task, if any
    pub fn next_due_ms(&self) -> Option<f64> {
        self.pending.iter().map(|t| t.due_ms).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.pop_due().map(|(_, task)| task)).collect()
    }

    #[test]
    fn test_nothing_due_before_delay() {
        let mut queue = TimerQueue::new();
        queue.schedule(100.0, "a");

        queue.advance(99.0);
        assert!(queue.pop_due().is_none());

        queue.advance(1.0);
        assert_eq!(drain(&mut queue), vec!["a"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(200.0, "c");
        queue.schedule(0.0, "a");
        queue.schedule(100.0, "b");

        queue.advance(500.0);
        assert_eq!(drain(&mut queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_fire_fifo() {
        let mut queue = TimerQueue::new();
        queue.schedule(50.0, "first");
        queue.schedule(50.0, "second");
        queue.schedule(50.0, "third");

        queue.advance(50.0);
        assert_eq!(drain(&mut queue), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(10.0, "keep");
        let drop = queue.schedule(10.0, "drop");

        assert!(queue.cancel(drop));
        assert!(!queue.cancel(drop));
        assert!(queue.is_pending(keep));
        assert!(!queue.is_pending(drop));

        queue.advance(10.0);
        assert_eq!(drain(&mut queue), vec!["keep"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule(10.0, "a");
        queue.schedule(20.0, "b");

        assert_eq!(queue.cancel_all(), 2);
        queue.advance(100.0);
        assert!(queue.pop_due().is_none());
    }

    #[test]
    fn test_schedule_is_relative_to_clock() {
        let mut queue = TimerQueue::new();
        queue.advance(1000.0);
        queue.schedule(10.0, "later");

        assert_eq!(queue.next_due_ms(), Some(1010.0));
        queue.advance(5.0);
        assert!(queue.pop_due().is_none());
    }

    #[test]
    fn test_negative_delay_is_immediate() {
        let mut queue = TimerQueue::new();
        queue.schedule(-5.0, "now");
        assert_eq!(drain(&mut queue), vec!["now"]);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(1.0, "a");
        let b = queue.schedule(1.0, "b");
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }
}
