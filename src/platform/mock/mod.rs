//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the platform traits that can
//! be used for unit testing without requiring actual hardware. State lives in
//! `Cell`s so a test can drive and observe a pin or advance the clock through
//! a shared reference while the scheduler holds its own borrow.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod clock;
mod gpio;

pub use clock::MockClock;
pub use gpio::MockPin;
