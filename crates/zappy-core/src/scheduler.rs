//! Per-session FIFO of deferred agent actions.
//!
//! Each agent session owns one [`ActionQueue`]. Actions leave it strictly
//! in insertion order: a ready action never overtakes one queued before it,
//! even if the earlier one is due later. Dropping the queue discards every
//! pending action unexecuted.

use std::collections::VecDeque;
use std::time::Duration;

use crate::command::AgentCommand;

/// One deferred agent command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The command to run.
    pub command: AgentCommand,
    /// Earliest time it may run, since reactor start.
    pub exec_at: Duration,
}

/// FIFO of [`Action`]s for one session.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
}

impl ActionQueue {
    /// An empty queue.
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Append `command`, due at `now + delay`. Returns the due time.
    pub fn push(&mut self, command: AgentCommand, now: Duration, delay: Duration) -> Duration {
        let exec_at = now.saturating_add(delay);
        self.pending.push_back(Action { command, exec_at });
        exec_at
    }

    /// Pop the head if it is due at or before `now`.
    pub fn pop_ready(&mut self, now: Duration) -> Option<Action> {
        if self.pending.front()?.exec_at <= now {
            self.pending.pop_front()
        } else {
            None
        }
    }

    /// Pending actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard everything. Returns how many actions were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}
