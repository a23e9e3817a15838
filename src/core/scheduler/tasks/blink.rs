//! LED blink task
//!
//! Blinking an LED is the ubiquitous way to show that firmware is running as
//! expected (or has run into trouble), so a ready-made task ships with the
//! scheduler. The LED inverts every period: register with 1000 ms and it
//! spends one second on, one second off.

use crate::core::scheduler::ops::SchedulerOps;
use crate::core::scheduler::task::Task;
use crate::platform::traits::OutputPin;

/// Periodic LED toggler
///
/// Owns its output pin. The LED is forced off on every start and stop, so
/// mode transitions always leave the pin de-asserted.
pub struct BlinkTask<O: OutputPin> {
    pin: O,
    lit: bool,
}

impl<O: OutputPin> BlinkTask<O> {
    pub fn new(pin: O) -> Self {
        Self { pin, lit: false }
    }
}

impl<O: OutputPin> Task for BlinkTask<O> {
    fn start(&mut self) {
        self.lit = false;
        let _ = self.pin.set_low();
    }

    fn update(&mut self, _ops: &mut dyn SchedulerOps) {
        self.lit = !self.lit;
        let _ = self.pin.set_state(self.lit);
    }

    fn stop(&mut self) {
        self.lit = false;
        let _ = self.pin.set_low();
    }
}
