//! System clock backed by the embassy time driver

use crate::platform::traits::Clock;

/// Millisecond clock over `embassy_time::Instant`
///
/// The 64-bit tick counter is truncated to the 32-bit millisecond domain the
/// scheduler works in; wrapping is handled by the scheduler's due-ness
/// arithmetic.
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
