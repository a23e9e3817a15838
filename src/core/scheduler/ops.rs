//! Re-entrant scheduler requests from inside a task callback
//!
//! A task's `update()` runs while the scheduler is mid-dispatch, so it cannot
//! borrow the scheduler directly. Instead it receives a [`SchedulerOps`]
//! sink; requests queue during the callback and are applied immediately
//! after it returns - before the executed slot's timestamp is stamped and
//! before any further dispatch. A task that removes its own slot is therefore
//! neither stamped nor re-dispatched.

use heapless::Vec;

use super::registry::TaskHandle;

/// Depth of the per-dispatch request queue
///
/// Bounds how many requests a single `update()` call can queue. Requests
/// beyond this are dropped.
pub(crate) const PENDING_OPS_DEPTH: usize = 8;

/// Scheduler requests available to a running task
///
/// Requests are deferred, so they cannot report failure to the task; a
/// request against a handle that is already empty is applied as an
/// idempotent no-op. Mid-callback *registration* is not offered - new tasks
/// are added by the embedding program between ticks.
pub trait SchedulerOps {
    /// Remove a task from the active registry
    fn remove(&mut self, handle: TaskHandle);

    /// Remove a task from the idle registry
    fn remove_idle(&mut self, handle: TaskHandle);

    /// Change the period of an active-registry task
    fn change_period(&mut self, handle: TaskHandle, period_ms: u32);

    /// Start scheduler execution after this callback returns
    fn request_start(&mut self);

    /// Stop scheduler execution after this callback returns
    ///
    /// Typical use is a task that hits an error condition requiring
    /// everything to stop.
    fn request_stop(&mut self);
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SlotOp {
    Remove(TaskHandle),
    RemoveIdle(TaskHandle),
    ChangePeriod(TaskHandle, u32),
    Start,
    Stop,
}

/// Request queue handed to `update()` during dispatch
pub(crate) struct PendingOps {
    queue: Vec<SlotOp, PENDING_OPS_DEPTH>,
}

impl PendingOps {
    pub(crate) fn new() -> Self {
        Self { queue: Vec::new() }
    }

    fn push(&mut self, op: SlotOp) {
        // Queue overflow drops the request; the depth covers any sane
        // callback.
        let _ = self.queue.push(op);
    }

    pub(crate) fn into_queue(self) -> Vec<SlotOp, PENDING_OPS_DEPTH> {
        self.queue
    }
}

impl SchedulerOps for PendingOps {
    fn remove(&mut self, handle: TaskHandle) {
        self.push(SlotOp::Remove(handle));
    }

    fn remove_idle(&mut self, handle: TaskHandle) {
        self.push(SlotOp::RemoveIdle(handle));
    }

    fn change_period(&mut self, handle: TaskHandle, period_ms: u32) {
        self.push(SlotOp::ChangePeriod(handle, period_ms));
    }

    fn request_start(&mut self) {
        self.push(SlotOp::Start);
    }

    fn request_stop(&mut self) {
        self.push(SlotOp::Stop);
    }
}
