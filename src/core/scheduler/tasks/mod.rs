//! Built-in task implementations
//!
//! Tasks that are common enough to ship with the scheduler itself. Each one
//! follows the standard lifecycle contract and can be registered in either
//! registry.

mod blink;

pub use blink::BlinkTask;
