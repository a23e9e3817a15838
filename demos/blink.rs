//! Minimal host demo: blink a mock LED at 100 ms.
//!
//! Run with: cargo run --example blink --features mock

use coop_sched::core::scheduler::tasks::BlinkTask;
use coop_sched::core::scheduler::Scheduler;
use coop_sched::platform::mock::{MockClock, MockPin};
use coop_sched::platform::traits::OutputPin;

fn main() {
    let clock = MockClock::new();
    let led = MockPin::new_output();
    let mut blink = BlinkTask::new(&led);

    let mut sched: Scheduler<'_, 4, 1> = Scheduler::new(&clock);
    sched.add(&mut blink, 100).expect("registry full");
    sched.start();

    for step in 1..=10 {
        clock.advance(100);
        sched.tick();
        println!(
            "t={:4} ms  led={}",
            step * 100,
            if led.is_set_high() { "on" } else { "off" }
        );
    }
}
