//! Host integration tests driving the scheduler through its public API
//! against the mock platform.

use core::cell::{Cell, RefCell};

use coop_sched::core::scheduler::{Scheduler, SchedulerError, SchedulerOps, Task, TaskHandle};
use coop_sched::platform::mock::{MockClock, MockPin};

/// Counts its own update calls
struct Counter<'e> {
    runs: &'e Cell<u32>,
}

impl Task for Counter<'_> {
    fn update(&mut self, _ops: &mut dyn SchedulerOps) {
        self.runs.set(self.runs.get() + 1);
    }
}

/// Appends its id to a shared execution log on every update
struct Logger<'e> {
    id: u8,
    log: &'e RefCell<Vec<u8>>,
}

impl Task for Logger<'_> {
    fn update(&mut self, _ops: &mut dyn SchedulerOps) {
        self.log.borrow_mut().push(self.id);
    }
}

#[test]
fn capacity_is_exact_and_slots_are_reusable() {
    let clock = MockClock::new();
    let runs = Cell::new(0);
    let mut t1 = Counter { runs: &runs };
    let mut t2 = Counter { runs: &runs };
    let mut t3 = Counter { runs: &runs };
    let mut t4 = Counter { runs: &runs };
    let mut t_full = Counter { runs: &runs };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    let h1 = sched.add(&mut t1, 100).unwrap();
    sched.add(&mut t2, 100).unwrap();
    sched.add(&mut t3, 100).unwrap();
    assert_eq!(sched.add(&mut t_full, 100), Err(SchedulerError::RegistryFull));

    sched.remove(h1).unwrap();
    assert!(sched.add(&mut t4, 100).is_ok());
}

#[test]
fn simultaneously_due_tasks_run_once_each_before_any_repeat() {
    let clock = MockClock::new();
    let log = RefCell::new(Vec::new());
    let mut t1 = Logger { id: 1, log: &log };
    let mut t2 = Logger { id: 2, log: &log };
    let mut t3 = Logger { id: 3, log: &log };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    sched.add(&mut t1, 100).unwrap();
    sched.add(&mut t2, 100).unwrap();
    sched.add(&mut t3, 100).unwrap();
    sched.start();

    clock.advance(150);
    sched.tick();
    sched.tick();
    sched.tick();

    let executed = log.borrow();
    assert_eq!(executed.len(), 3);
    let mut sorted = executed.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 3, "a task repeated before all three had run");

    // Everyone is stamped now: a fourth tick at the same instant runs nothing
    drop(executed);
    sched.tick();
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn mixed_periods_scenario() {
    let clock = MockClock::new();
    let a_runs = Cell::new(0);
    let b_runs = Cell::new(0);
    let c_runs = Cell::new(0);
    let mut a = Counter { runs: &a_runs };
    let mut b = Counter { runs: &b_runs };
    let mut c = Counter { runs: &c_runs };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    sched.add(&mut a, 100).unwrap();
    sched.add(&mut b, 200).unwrap();
    sched.add(&mut c, 50).unwrap();
    sched.start();

    // Drive to t = 1000 with a tick every 10 ms
    for _ in 0..100 {
        clock.advance(10);
        sched.tick();
    }

    let (a, b, c) = (a_runs.get(), b_runs.get(), c_runs.get());
    assert!((9..=11).contains(&a), "A ran {} times", a);
    assert!((4..=6).contains(&b), "B ran {} times", b);
    assert!((18..=21).contains(&c), "C ran {} times", c);
}

#[test]
fn self_removing_task_is_not_redispatched() {
    struct SelfRemover<'e> {
        handle: &'e Cell<Option<TaskHandle>>,
        runs: &'e Cell<u32>,
    }

    impl Task for SelfRemover<'_> {
        fn update(&mut self, ops: &mut dyn SchedulerOps) {
            self.runs.set(self.runs.get() + 1);
            if let Some(handle) = self.handle.get() {
                ops.remove(handle);
            }
        }
    }

    let clock = MockClock::new();
    let handle_cell = Cell::new(None);
    let runs = Cell::new(0);
    let mut task = SelfRemover {
        handle: &handle_cell,
        runs: &runs,
    };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    let handle = sched.add(&mut task, 10).unwrap();
    handle_cell.set(Some(handle));
    sched.start();

    for _ in 0..5 {
        clock.advance(20);
        sched.tick();
    }

    assert_eq!(runs.get(), 1);
    assert_eq!(sched.remove(handle), Err(SchedulerError::NoSuchTask));
}

#[test]
fn task_can_remove_another_task_mid_dispatch() {
    struct Assassin<'e> {
        victim: &'e Cell<Option<TaskHandle>>,
    }

    impl Task for Assassin<'_> {
        fn update(&mut self, ops: &mut dyn SchedulerOps) {
            if let Some(handle) = self.victim.take() {
                ops.remove(handle);
            }
        }
    }

    let clock = MockClock::new();
    let victim_cell = Cell::new(None);
    let victim_runs = Cell::new(0);
    let mut assassin = Assassin {
        victim: &victim_cell,
    };
    let mut victim = Counter { runs: &victim_runs };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    sched.add(&mut assassin, 10).unwrap();
    let victim_handle = sched.add(&mut victim, 10).unwrap();
    victim_cell.set(Some(victim_handle));
    sched.start();

    // Slot 0 runs first and removes slot 1 before it ever executes
    for _ in 0..5 {
        clock.advance(20);
        sched.tick();
    }

    assert_eq!(victim_runs.get(), 0);
    assert_eq!(sched.remove(victim_handle), Err(SchedulerError::NoSuchTask));
}

#[test]
fn task_can_retune_its_own_period() {
    struct Retuner<'e> {
        handle: &'e Cell<Option<TaskHandle>>,
        runs: &'e Cell<u32>,
    }

    impl Task for Retuner<'_> {
        fn update(&mut self, ops: &mut dyn SchedulerOps) {
            self.runs.set(self.runs.get() + 1);
            if let Some(handle) = self.handle.take() {
                // Slow down after the first execution
                ops.change_period(handle, 1_000);
            }
        }
    }

    let clock = MockClock::new();
    let handle_cell = Cell::new(None);
    let runs = Cell::new(0);
    let mut task = Retuner {
        handle: &handle_cell,
        runs: &runs,
    };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    let handle = sched.add(&mut task, 10).unwrap();
    handle_cell.set(Some(handle));
    sched.start();

    clock.advance(20);
    sched.tick();
    assert_eq!(runs.get(), 1);

    // Old cadence would fire again; the new 1000 ms period must not
    for _ in 0..5 {
        clock.advance(20);
        sched.tick();
    }
    assert_eq!(runs.get(), 1);

    clock.advance(1_000);
    sched.tick();
    assert_eq!(runs.get(), 2);
}

#[test]
fn due_check_survives_counter_wrap() {
    let clock = MockClock::starting_at(u32::MAX - 25);
    let runs = Cell::new(0);
    let mut task = Counter { runs: &runs };

    let mut sched: Scheduler<'_, 1, 1> = Scheduler::new(&clock);
    sched.add(&mut task, 50).unwrap();
    sched.start();

    // Stamped at u32::MAX - 25; 20 ms later (still pre-wrap) not due
    clock.advance(20);
    sched.tick();
    assert_eq!(runs.get(), 0);

    // 60 ms elapsed in total, past the wrap boundary: due
    clock.advance(40);
    sched.tick();
    assert_eq!(runs.get(), 1);
}

#[test]
fn button_toggles_between_active_and_idle_work() {
    let clock = MockClock::new();
    let button = MockPin::new_input();
    let active_runs = Cell::new(0);
    let idle_runs = Cell::new(0);
    let mut active_task = Counter { runs: &active_runs };
    let mut idle_task = Counter { runs: &idle_runs };

    let mut sched: Scheduler<'_, 3, 1> = Scheduler::new(&clock);
    sched.add(&mut active_task, 10).unwrap();
    sched.add_idle(&mut idle_task, 10).unwrap();
    sched.monitor_button(&button, false);

    // Stopped: idle work accumulates
    for _ in 0..3 {
        clock.advance(20);
        sched.tick();
    }
    assert_eq!(active_runs.get(), 0);
    assert_eq!(idle_runs.get(), 3);

    // Press (with settle time): flips to running
    button.drive(true);
    sched.tick();
    clock.advance(60);
    sched.tick();
    assert!(sched.is_running());

    let idle_before = idle_runs.get();
    for _ in 0..3 {
        clock.advance(20);
        sched.tick();
    }
    assert!(active_runs.get() > 0);
    assert_eq!(idle_runs.get(), idle_before);

    // Release, then press again: back to idle mode
    button.drive(false);
    sched.tick();
    clock.advance(60);
    sched.tick();
    button.drive(true);
    sched.tick();
    clock.advance(60);
    sched.tick();
    assert!(!sched.is_running());
}
