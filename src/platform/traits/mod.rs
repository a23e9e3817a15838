//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod clock;
pub mod gpio;

// Re-export trait interfaces
pub use clock::Clock;
pub use gpio::{InputPin, OutputPin};
