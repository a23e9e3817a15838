//! Host demo of the running/stopped mode toggle.
//!
//! A blink task lives in the active registry, a heartbeat in the idle
//! registry; a simulated button press flips between them.
//!
//! Run with: cargo run --example button_modes --features mock

use coop_sched::core::scheduler::tasks::BlinkTask;
use coop_sched::core::scheduler::{Scheduler, SchedulerOps, Task};
use coop_sched::platform::mock::{MockClock, MockPin};
use coop_sched::platform::traits::OutputPin;

struct Heartbeat;

impl Task for Heartbeat {
    fn update(&mut self, _ops: &mut dyn SchedulerOps) {
        println!("  ... idle heartbeat");
    }
}

/// One debounced press-and-release: edge, settled read, release, settled read
fn press(sched: &mut Scheduler<'_, 4, 1>, button: &MockPin, clock: &MockClock) {
    button.drive(true);
    sched.tick();
    clock.advance(60);
    sched.tick();
    button.drive(false);
    sched.tick();
    clock.advance(60);
    sched.tick();
}

fn main() {
    let clock = MockClock::new();
    let led = MockPin::new_output();
    let button = MockPin::new_input();
    let mut blink = BlinkTask::new(&led);
    let mut heartbeat = Heartbeat;

    let mut sched: Scheduler<'_, 4, 1> = Scheduler::new(&clock);
    sched.add(&mut blink, 100).expect("registry full");
    sched.add_idle(&mut heartbeat, 200).expect("registry full");
    sched.monitor_button(&button, false);

    println!("-- stopped: idle heartbeat runs --");
    for _ in 0..4 {
        clock.advance(100);
        sched.tick();
    }

    println!("-- button press: start --");
    press(&mut sched, &button, &clock);
    for step in 1..=6 {
        clock.advance(100);
        sched.tick();
        println!(
            "t+{:3} ms  led={}",
            step * 100,
            if led.is_set_high() { "on" } else { "off" }
        );
    }

    println!("-- button press: stop --");
    press(&mut sched, &button, &clock);
    for _ in 0..4 {
        clock.advance(100);
        sched.tick();
    }
    println!("running = {}", sched.is_running());
}
