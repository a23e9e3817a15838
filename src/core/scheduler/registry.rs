//! Bounded slot registry and round-robin dispatch
//!
//! A registry is a fixed array of task slots plus a round-robin cursor. The
//! scheduler owns two of them: the active registry (dispatched while
//! running) and the idle registry (dispatched while stopped). Capacity is a
//! compile-time parameter; the registry never allocates and never owns the
//! tasks it references.

use super::error::SchedulerError;
use super::ops::PendingOps;
use super::task::Task;

/// Identifier for a registered task
///
/// This is the slot index assigned at registration. It stays valid while the
/// slot remains occupied; a handle retained past removal refers to nothing
/// (or, later, to a different task reusing the slot) and operations through
/// it fail with [`SchedulerError::NoSuchTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub(crate) usize);

impl TaskHandle {
    /// Slot index backing this handle
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One registry entry
///
/// `task == None` means the slot is empty and reusable. An empty slot keeps
/// `period_ms == 0` and `last_run_ms == 0`.
struct TaskSlot<'a> {
    task: Option<&'a mut dyn Task>,
    period_ms: u32,
    last_run_ms: u32,
}

impl TaskSlot<'_> {
    fn empty() -> Self {
        Self {
            task: None,
            period_ms: 0,
            last_run_ms: 0,
        }
    }

    fn clear(&mut self) {
        self.task = None;
        self.period_ms = 0;
        self.last_run_ms = 0;
    }

    fn due(&self, now: u32) -> bool {
        // Wrapping subtraction keeps this correct across a counter wrap as
        // long as the true elapsed time stays inside the counter range.
        now.wrapping_sub(self.last_run_ms) >= self.period_ms
    }
}

/// Fixed-capacity task registry with a round-robin cursor
pub(crate) struct SlotRegistry<'a, const N: usize> {
    slots: [TaskSlot<'a>; N],
    cursor: usize,
}

impl<'a, const N: usize> SlotRegistry<'a, N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| TaskSlot::empty()),
            cursor: 0,
        }
    }

    /// Register a task in the first empty slot
    ///
    /// Calls `task.setup()` on success. If `serving` (the registry's mode is
    /// currently live) the slot is also started, stamping `now` as its last
    /// execution time.
    pub(crate) fn add(
        &mut self,
        task: &'a mut dyn Task,
        period_ms: u32,
        serving: bool,
        now: u32,
    ) -> Result<TaskHandle, SchedulerError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.task.is_none())
            .ok_or(SchedulerError::RegistryFull)?;

        task.setup();

        let slot = &mut self.slots[index];
        slot.period_ms = period_ms;
        slot.last_run_ms = 0;
        slot.task = Some(task);

        if serving {
            self.start_slot(index, now);
        }

        Ok(TaskHandle(index))
    }

    /// Change the period of an occupied slot
    pub(crate) fn change_period(
        &mut self,
        handle: TaskHandle,
        period_ms: u32,
    ) -> Result<(), SchedulerError> {
        let slot = self
            .slots
            .get_mut(handle.0)
            .filter(|slot| slot.task.is_some())
            .ok_or(SchedulerError::NoSuchTask)?;
        slot.period_ms = period_ms;
        Ok(())
    }

    /// Empty an occupied slot
    ///
    /// If `serving`, the task is stopped first. The task reference is
    /// discarded, never dropped; the caller still owns the task object.
    pub(crate) fn remove(
        &mut self,
        handle: TaskHandle,
        serving: bool,
    ) -> Result<(), SchedulerError> {
        let slot = self
            .slots
            .get_mut(handle.0)
            .ok_or(SchedulerError::NoSuchTask)?;
        let task = slot.task.take().ok_or(SchedulerError::NoSuchTask)?;
        if serving {
            task.stop();
        }
        slot.clear();
        Ok(())
    }

    /// Empty every occupied slot
    pub(crate) fn remove_all(&mut self, serving: bool) {
        for slot in self.slots.iter_mut() {
            if let Some(task) = slot.task.take() {
                if serving {
                    task.stop();
                }
            }
            slot.clear();
        }
    }

    /// Start one slot if occupied; stamps `now` as its last execution time
    pub(crate) fn start_slot(&mut self, index: usize, now: u32) -> bool {
        let slot = &mut self.slots[index];
        match slot.task.as_mut() {
            Some(task) => {
                task.start();
                slot.last_run_ms = now;
                true
            }
            None => false,
        }
    }

    /// Start every occupied slot (bulk mode entry)
    pub(crate) fn start_all(&mut self, now: u32) {
        for index in 0..N {
            self.start_slot(index, now);
        }
    }

    /// Stop every occupied slot (bulk mode exit)
    pub(crate) fn stop_all(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(task) = slot.task.as_mut() {
                task.stop();
            }
        }
    }

    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.task.is_some())
    }

    /// Stamp a slot's last execution time
    pub(crate) fn stamp(&mut self, index: usize, now: u32) {
        self.slots[index].last_run_ms = now;
    }

    /// Run at most one due slot, scanning circularly from the cursor
    ///
    /// The scan visits each slot once, starting at the cursor; the first
    /// occupied slot whose period has elapsed gets its `update()` called.
    /// The cursor is then advanced one past the position where the scan
    /// stopped, so over `N` consecutive scans every slot gets a turn at
    /// being checked first - an early high-frequency slot cannot starve
    /// later slots.
    ///
    /// Returns the executed slot index (if any) together with the requests
    /// the callback queued. Stamping the executed slot is the caller's job,
    /// after it has applied the requests and confirmed the slot is still
    /// occupied.
    pub(crate) fn scan_one(&mut self, now: u32) -> (Option<usize>, PendingOps) {
        let mut ops = PendingOps::new();
        if N == 0 {
            return (None, ops);
        }

        let start = self.cursor;
        let mut index = start;
        let mut executed = None;
        loop {
            let slot = &mut self.slots[index];
            if slot.task.is_some() && slot.due(now) {
                if let Some(task) = slot.task.as_mut() {
                    task.update(&mut ops);
                }
                executed = Some(index);
                break;
            }
            index = (index + 1) % N;
            if index == start {
                break;
            }
        }

        self.cursor = (index + 1) % N;
        (executed, ops)
    }
}
