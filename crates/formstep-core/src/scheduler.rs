//! Deterministic delayed-task queue.
//!
//! The scheduler owns a virtual monotonic clock measured in milliseconds.
//! Nothing runs on its own: the owner advances the clock and receives the
//! tasks that became due, in due-time order (ties in scheduling order).
//! Keyed tasks supersede each other, which is how input debouncing is
//! expressed.

use std::collections::HashMap;

/// Handle of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: u64,
    key: Option<String>,
    task: T,
}

/// Cancellable delayed tasks over a virtual clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
    keys: HashMap<String, TaskId>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: Vec::new(),
            keys: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Schedules `task` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.push(None, delay_ms, task)
    }

    /// Schedules `task` under `key`, cancelling any pending task with the
    /// same key.
    pub fn schedule_keyed(&mut self, key: impl Into<String>, delay_ms: u64, task: T) -> TaskId {
        let key = key.into();
        self.cancel_key(&key);
        self.push(Some(key), delay_ms, task)
    }

    fn push(&mut self, key: Option<String>, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        if let Some(key) = &key {
            self.keys.insert(key.clone(), id);
        }
        self.pending.push(Scheduled {
            id,
            due: self.now.saturating_add(delay_ms),
            key,
            task,
        });
        id
    }

    /// Cancels a pending task. Returns the task if it had not run yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let pos = self.pending.iter().position(|s| s.id == id)?;
        let scheduled = self.pending.remove(pos);
        if let Some(key) = &scheduled.key {
            if self.keys.get(key) == Some(&id) {
                self.keys.remove(key);
            }
        }
        Some(scheduled.task)
    }

    /// Cancels the pending task registered under `key`.
    pub fn cancel_key(&mut self, key: &str) -> Option<T> {
        let id = self.keys.remove(key)?;
        self.cancel(id)
    }

    /// Removes and returns the earliest task due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: u64) -> Option<T> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= deadline)
            .min_by_key(|(_, s)| (s.due, s.id))
            .map(|(pos, _)| pos)?;
        let scheduled = self.pending.remove(pos);
        if let Some(key) = &scheduled.key {
            if self.keys.get(key) == Some(&scheduled.id) {
                self.keys.remove(key);
            }
        }
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Moves the clock forward to `deadline` without running anything.
    pub fn advance_to(&mut self, deadline: u64) {
        self.now = self.now.max(deadline);
    }

    /// Advances the clock by `ms` and returns every task that became due.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        let deadline = self.now.saturating_add(ms);
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(deadline) {
            due.push(task);
        }
        self.advance_to(deadline);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_run_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, "late");
        scheduler.schedule(100, "early");
        scheduler.schedule(100, "early-second");

        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.advance(1), vec!["early", "early-second"]);
        assert_eq!(scheduler.now(), 100);
        assert_eq!(scheduler.advance(500), vec!["late"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_keyed_tasks_supersede() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_keyed("name", 300, 1);
        scheduler.advance(200);
        scheduler.schedule_keyed("name", 300, 2);

        assert!(scheduler.advance(200).is_empty());
        assert_eq!(scheduler.advance(100), vec![2]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(10, "x");
        scheduler.schedule_keyed("k", 10, "y");
        assert_eq!(scheduler.cancel(id), Some("x"));
        assert_eq!(scheduler.cancel(id), None);
        assert_eq!(scheduler.cancel_key("k"), Some("y"));
        assert!(scheduler.advance(100).is_empty());
    }

    #[test]
    fn test_pop_due_moves_clock_to_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(40, 'a');
        assert_eq!(scheduler.next_due(), Some(40));
        assert_eq!(scheduler.pop_due(100), Some('a'));
        assert_eq!(scheduler.now(), 40);
        scheduler.advance_to(100);
        assert_eq!(scheduler.now(), 100);
    }
}
