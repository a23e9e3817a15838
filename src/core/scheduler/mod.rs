//! Cooperative round-robin task scheduler
//!
//! The scheduler owns two bounded registries of task slots: the active
//! registry, dispatched while the scheduler is running, and the idle
//! registry, dispatched while it is stopped. One call to [`Scheduler::tick`]
//! per program iteration advances at most one due task per registry,
//! scanning round-robin so no slot can starve the others. An optional
//! debounced button toggles between the two modes.
//!
//! There is exactly one logical thread of control: all dispatch happens
//! synchronously inside `tick()`, tasks must not block, and no locking
//! exists anywhere in the core.

pub mod error;
pub mod ops;
pub mod registry;
pub mod task;
pub mod tasks;

pub use error::SchedulerError;
pub use ops::SchedulerOps;
pub use registry::TaskHandle;
pub use task::Task;

use crate::core::button::ButtonDetector;
use crate::log_info;
use crate::platform::traits::{Clock, InputPin};
use ops::{PendingOps, SlotOp};
use registry::SlotRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Stopped,
    Running,
}

/// Cooperative scheduler over two fixed-capacity registries
///
/// `ACTIVE` and `IDLE` are the registry capacities, chosen at build time.
/// The scheduler holds non-owning borrows of caller-owned task objects and a
/// shared reference to the platform clock; it allocates nothing.
///
/// The embedding program constructs exactly one instance and calls
/// [`tick`](Scheduler::tick) from its main loop.
///
/// # Example
///
/// ```ignore
/// let clock = SystemClock::new();
/// let mut blink = BlinkTask::new(led);
/// let mut sched: Scheduler<'_, 8, 2> = Scheduler::new(&clock);
/// sched.add(&mut blink, 500)?;
/// sched.start();
/// loop {
///     sched.tick();
/// }
/// ```
pub struct Scheduler<'a, const ACTIVE: usize, const IDLE: usize> {
    clock: &'a dyn Clock,
    active: SlotRegistry<'a, ACTIVE>,
    idle: SlotRegistry<'a, IDLE>,
    mode: Mode,
    button: Option<ButtonDetector<'a>>,
}

impl<'a, const ACTIVE: usize, const IDLE: usize> Scheduler<'a, ACTIVE, IDLE> {
    /// Create a stopped scheduler with empty registries
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            active: SlotRegistry::new(),
            idle: SlotRegistry::new(),
            mode: Mode::Stopped,
            button: None,
        }
    }

    /// Register a task in the active registry
    ///
    /// Calls `task.setup()` once. If the scheduler is already running the
    /// task is started immediately and its period starts counting from now.
    ///
    /// # Errors
    ///
    /// `SchedulerError::RegistryFull` if every active slot is occupied; the
    /// registry is left untouched.
    pub fn add(
        &mut self,
        task: &'a mut dyn Task,
        period_ms: u32,
    ) -> Result<TaskHandle, SchedulerError> {
        let now = self.clock.now_ms();
        self.active
            .add(task, period_ms, self.mode == Mode::Running, now)
    }

    /// Register a task in the idle registry
    ///
    /// The idle counterpart of [`add`](Scheduler::add): the task is started
    /// immediately only while the scheduler is stopped.
    pub fn add_idle(
        &mut self,
        task: &'a mut dyn Task,
        period_ms: u32,
    ) -> Result<TaskHandle, SchedulerError> {
        let now = self.clock.now_ms();
        self.idle
            .add(task, period_ms, self.mode == Mode::Stopped, now)
    }

    /// Change the period of an active-registry task
    ///
    /// # Errors
    ///
    /// `SchedulerError::NoSuchTask` if the handle's slot is empty.
    pub fn change_period(
        &mut self,
        handle: TaskHandle,
        period_ms: u32,
    ) -> Result<(), SchedulerError> {
        self.active.change_period(handle, period_ms)
    }

    /// Remove a task from the active registry
    ///
    /// If the scheduler is running, the task's `stop()` is called first.
    ///
    /// # Errors
    ///
    /// `SchedulerError::NoSuchTask` if the handle's slot is empty.
    pub fn remove(&mut self, handle: TaskHandle) -> Result<(), SchedulerError> {
        self.active.remove(handle, self.mode == Mode::Running)
    }

    /// Remove a task from the idle registry
    ///
    /// If the scheduler is stopped, the task's `stop()` is called first.
    pub fn remove_idle(&mut self, handle: TaskHandle) -> Result<(), SchedulerError> {
        self.idle.remove(handle, self.mode == Mode::Stopped)
    }

    /// Remove every registered task from both registries
    ///
    /// Tasks whose mode is currently live are stopped first. The mode flag
    /// is left unchanged.
    pub fn remove_all(&mut self) {
        self.active.remove_all(self.mode == Mode::Running);
        self.idle.remove_all(self.mode == Mode::Stopped);
    }

    /// Whether the scheduler is in running mode
    pub fn is_running(&self) -> bool {
        self.mode == Mode::Running
    }

    /// Monitor a button that toggles between running and stopped
    ///
    /// `rest_level` is the level the line sits at while the button is not
    /// pressed. Each detected (debounced) press flips the mode, exactly as a
    /// programmatic [`start`](Scheduler::start)/[`stop`](Scheduler::stop)
    /// call would.
    pub fn monitor_button(&mut self, input: &'a dyn InputPin, rest_level: bool) {
        self.button = Some(ButtonDetector::new(input, self.clock, rest_level));
        log_info!("ready to start execution");
    }

    /// Start scheduler execution
    ///
    /// No-op if already running. Otherwise idle tasks are stopped, every
    /// active task is started with its period counting from now, the active
    /// cursor is reset and the mode flips to running.
    pub fn start(&mut self) {
        if self.mode == Mode::Running {
            return;
        }

        let now = self.clock.now_ms();
        self.idle.stop_all();

        log_info!("starting execution");

        self.active.start_all(now);
        self.active.reset_cursor();
        self.mode = Mode::Running;
    }

    /// Stop scheduler execution
    ///
    /// No-op if already stopped. Otherwise every active task is stopped, the
    /// mode flips to stopped and idle tasks are started. Callable from
    /// anywhere in the embedding program, e.g. on an error condition.
    pub fn stop(&mut self) {
        if self.mode == Mode::Stopped {
            return;
        }

        log_info!("stopping execution");

        self.active.stop_all();
        self.mode = Mode::Stopped;
        self.active.reset_cursor();

        log_info!("ready to start execution");

        let now = self.clock.now_ms();
        self.idle.start_all(now);
    }

    /// Advance the scheduler by one polling iteration
    ///
    /// Call this once per main-loop pass. In order:
    /// 1. while stopped, dispatch at most one due idle task;
    /// 2. poll the monitored button and flip the mode on a detected press;
    /// 3. while running, dispatch at most one due active task.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();

        if self.mode == Mode::Stopped {
            self.dispatch_idle(now);
        }

        let pressed = match self.button.as_mut() {
            Some(button) => button.pressed_since_last_poll(),
            None => false,
        };
        if pressed {
            if self.mode == Mode::Running {
                self.stop();
            } else {
                self.start();
            }
        }

        if self.mode == Mode::Running {
            self.dispatch_active(now);
        }
    }

    fn dispatch_active(&mut self, now: u32) {
        let (executed, ops) = self.active.scan_one(now);
        if let Some(index) = executed {
            self.apply_ops(ops);
            // The update may have emptied this slot; a removed task keeps no
            // timestamp and is not re-dispatched.
            if self.active.is_occupied(index) {
                self.active.stamp(index, now);
            }
        }
    }

    fn dispatch_idle(&mut self, now: u32) {
        let (executed, ops) = self.idle.scan_one(now);
        if let Some(index) = executed {
            self.apply_ops(ops);
            if self.idle.is_occupied(index) {
                self.idle.stamp(index, now);
            }
        }
    }

    /// Apply requests queued by a task callback, in order
    ///
    /// Requests against already-empty slots are idempotent no-ops; the
    /// deferred path has no way to report them back to the task.
    fn apply_ops(&mut self, ops: PendingOps) {
        for op in ops.into_queue() {
            match op {
                SlotOp::Remove(handle) => {
                    let _ = self.active.remove(handle, self.mode == Mode::Running);
                }
                SlotOp::RemoveIdle(handle) => {
                    let _ = self.idle.remove(handle, self.mode == Mode::Stopped);
                }
                SlotOp::ChangePeriod(handle, period_ms) => {
                    let _ = self.active.change_period(handle, period_ms);
                }
                SlotOp::Start => self.start(),
                SlotOp::Stop => self.stop(),
            }
        }
    }
}
