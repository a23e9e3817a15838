//! Debounced button press detector
//!
//! Monitors a momentary button on a digital input and reports a single
//! edge-triggered "pressed" event per physical press, already filtered for
//! contact bounce. A raw level change is accepted as a genuine transition
//! only after the reading has held steady for the settle window; the press
//! is reported on the transition away from the configured rest level, never
//! on release.

use crate::log_debug;
use crate::platform::traits::{Clock, InputPin};

/// Settle window before a level change is accepted as genuine
///
/// Increase if the detector still flickers on a particularly noisy switch.
pub const DEBOUNCE_DELAY_MS: u32 = 50;

/// Debounced press detector over a digital input line
pub struct ButtonDetector<'a> {
    input: &'a dyn InputPin,
    clock: &'a dyn Clock,
    rest_level: bool,
    stable_level: bool,
    last_reading: bool,
    last_change_ms: u32,
}

impl<'a> ButtonDetector<'a> {
    /// Create a detector for a button resting at `rest_level`
    ///
    /// The button can be pulled high or low; `rest_level` is the line level
    /// while the button is not pressed.
    pub fn new(input: &'a dyn InputPin, clock: &'a dyn Clock, rest_level: bool) -> Self {
        Self {
            input,
            clock,
            rest_level,
            stable_level: rest_level,
            last_reading: rest_level,
            last_change_ms: 0,
        }
    }

    /// Whether a fresh press occurred since the last poll
    ///
    /// Returns `true` exactly once per debounced press; `false` at all other
    /// times, including button release.
    pub fn pressed_since_last_poll(&mut self) -> bool {
        let reading = self.input.is_high();
        let now = self.clock.now_ms();

        // Any flip, noise or genuine, restarts the settle window
        if reading != self.last_reading {
            self.last_change_ms = now;
        }

        let mut pressed = false;
        if now.wrapping_sub(self.last_change_ms) > DEBOUNCE_DELAY_MS
            && reading != self.stable_level
        {
            // The reading has held longer than the settle window: take it as
            // the actual state
            self.stable_level = reading;
            if self.stable_level != self.rest_level {
                log_debug!("button press detected");
                pressed = true;
            }
        }

        self.last_reading = reading;
        pressed
    }
}
