//! Task lifecycle contract
//!
//! A task is a unit of recurring work registered with the scheduler together
//! with an execution period. Implementations override only the lifecycle
//! operations they need; every operation defaults to a no-op.
//!
//! The call sequence for a registered task is:
//!
//! - `setup()` - called exactly once, when the task is added to a registry,
//!   regardless of the current mode.
//! - `start()` - called every time the owning registry's mode becomes live
//!   (scheduler start for the active registry, scheduler stop for the idle
//!   registry), and immediately after `setup()` if that mode is already live
//!   at registration time. A task resets its working state here; the
//!   scheduler may be started and stopped many times.
//! - `update()` - called from `tick()` when the task's period has elapsed
//!   since its last execution.
//! - `stop()` - called every time the owning registry's mode is exited, and
//!   on removal while that mode is live. The task must end in a safe
//!   quiescent state.
//!
//! No operation may block: everything runs synchronously inside the single
//! polling call, and a callback that does not return promptly starves every
//! other registered task.

use super::ops::SchedulerOps;

/// Lifecycle operations for schedulable work
///
/// All methods have no-op defaults so an implementation overrides only what
/// it needs.
pub trait Task {
    /// One-time initialization at registration
    fn setup(&mut self) {}

    /// Transition into the running state for the owning mode
    ///
    /// Must be idempotent under repeated start/stop cycling.
    fn start(&mut self) {}

    /// One unit of periodic work
    ///
    /// `ops` queues re-entrant scheduler requests (removal, period change,
    /// mode change); they are applied as soon as this call returns. See
    /// [`SchedulerOps`].
    fn update(&mut self, ops: &mut dyn SchedulerOps) {
        let _ = ops;
    }

    /// Transition into a safe quiescent state for the owning mode
    fn stop(&mut self) {}
}
