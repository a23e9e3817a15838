//! RP2350 (Pico 2 W) platform implementation
//!
//! Thin adapters from the embassy-rp HAL to the crate's platform traits. Only
//! compiled for the `rp2350` feature; host builds use the mock platform
//! instead.

use defmt_rtt as _;
use panic_probe as _;

mod clock;
mod gpio;

pub use clock::SystemClock;
pub use gpio::{RpInput, RpOutput};
