//! Time-gated deferred-operation queue.
//!
//! Any component may schedule world-mutating work for a future logic tick.
//! The pipeline drains the queue once per frame: operations due exactly now
//! run and are discarded, operations for the future are re-enqueued
//! verbatim, and operations whose tick already passed have "leaked" (they
//! missed their window) — those are discarded with a diagnostic. Tasklets
//! whose owning simulant no longer exists are dropped silently before any
//! comparison.
//!
//! Scheduling from inside a running tasklet is allowed; such work lands in a
//! fresh queue that the current drain never observes, so it cannot execute
//! early within the same cycle.

use bevy_ecs::prelude::{Entity, Resource, World};

/// World-mutating deferred operation.
pub type TaskletOp = Box<dyn FnOnce(&mut World) + Send + Sync>;

/// A deferred, time-gated unit of work owned by a simulant.
pub struct Tasklet {
    pub owner: Entity,
    pub due_tick: u64,
    pub operation: TaskletOp,
}

/// Queue of pending tasklets, drained once per frame by
/// `systems::tasklets::process_tasklets`.
#[derive(Resource, Default)]
pub struct TaskletQueue {
    pending: Vec<Tasklet>,
}

impl TaskletQueue {
    pub fn new() -> Self {
        TaskletQueue::default()
    }

    /// Schedule `operation` to run when the logic tick reaches `due_tick`.
    pub fn schedule(
        &mut self,
        owner: Entity,
        due_tick: u64,
        operation: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        self.pending.push(Tasklet {
            owner,
            due_tick,
            operation: Box::new(operation),
        });
    }

    /// Take the whole pending list, leaving the queue empty. The drain works
    /// on the taken list so tasklets scheduled during execution wait for the
    /// next frame.
    pub fn take_pending(&mut self) -> Vec<Tasklet> {
        std::mem::take(&mut self.pending)
    }

    /// Put a not-yet-due tasklet back for a future frame.
    pub fn requeue(&mut self, tasklet: Tasklet) {
        self.pending.push(tasklet);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
