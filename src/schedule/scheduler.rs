use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Handle of one scheduled callback; use it to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

#[derive(Clone, Debug)]
struct Task<O, E> {
    owner: O,
    event: E,
    due_ms: u64,
    interval_ms: u64,
    // Calls still to deliver, including the pending one.
    remaining: u32,
}

/// A callback that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<O, E> {
    /// The task that fired.
    pub task: TaskId,
    /// Owner the callback belongs to.
    pub owner: O,
    /// Payload to dispatch.
    pub event: E,
    /// Time the callback was due.
    pub due_ms: u64,
    /// Whether the task will fire again.
    pub repeats: bool,
}

/// Time-ordered queue of owned callbacks with cancellation by task or by owner.
///
/// Ordering rule: earlier due time first; ties fire in scheduling order.
pub struct Scheduler<O, E> {
    tasks: HashMap<TaskId, Task<O, E>>,
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    next_id: u64,
}

impl<O, E> Default for Scheduler<O, E> {
    fn default() -> Self {
        Self {
            tasks: HashMap::new(),
            queue: BinaryHeap::new(),
            next_id: 0,
        }
    }
}

impl<O, E> Scheduler<O, E>
where
    O: Copy + Eq + Hash,
    E: Clone,
{
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Fire `event` once, `delay_ms` after `now_ms`.
    pub fn after(&mut self, now_ms: u64, delay_ms: u64, owner: O, event: E) -> TaskId {
        self.every(now_ms, delay_ms, 1, owner, event)
    }

    /// Fire `event` every `interval_ms` for `repeats` calls, the first one `interval_ms` from now.
    ///
    /// `repeats == 0` schedules nothing; the returned id is already inert.
    pub fn every(
        &mut self,
        now_ms: u64,
        interval_ms: u64,
        repeats: u32,
        owner: O,
        event: E,
    ) -> TaskId {
        let id = self.alloc_id();
        if repeats == 0 {
            return id;
        }
        let due_ms = now_ms.saturating_add(interval_ms);
        self.tasks.insert(
            id,
            Task {
                owner,
                event,
                due_ms,
                interval_ms,
                remaining: repeats,
            },
        );
        self.queue.push(Reverse((due_ms, id.0)));
        id
    }

    /// Cancel one task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Cancel every task of `owner`; returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: O) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| t.owner != owner);
        before - self.tasks.len()
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Pending tasks belonging to `owner`.
    pub fn pending_for(&self, owner: O) -> usize {
        self.tasks.values().filter(|t| t.owner == owner).count()
    }

    /// Total pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&mut self) -> Option<u64> {
        self.skip_cancelled();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    fn skip_cancelled(&mut self) {
        while let Some(Reverse((due, raw))) = self.queue.peek().copied() {
            match self.tasks.get(&TaskId(raw)) {
                Some(t) if t.due_ms == due => return,
                _ => {
                    self.queue.pop();
                }
            }
        }
    }

    /// Pop the next callback due at or before `now_ms`.
    ///
    /// Repeating tasks are re-queued one interval after their previous due time.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<O, E>> {
        self.skip_cancelled();
        let Reverse((due, raw)) = *self.queue.peek()?;
        if due > now_ms {
            return None;
        }
        self.queue.pop();

        let id = TaskId(raw);
        let task = self.tasks.get_mut(&id)?;
        task.remaining = task.remaining.saturating_sub(1);
        let owner = task.owner;
        let event = task.event.clone();
        let repeats = task.remaining > 0;
        if repeats {
            // Zero intervals would refire forever within one tick.
            task.due_ms = due.saturating_add(task.interval_ms.max(1));
            self.queue.push(Reverse((task.due_ms, raw)));
        } else {
            self.tasks.remove(&id);
        }

        Some(Fired {
            task: id,
            owner,
            event,
            due_ms: due,
            repeats,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
