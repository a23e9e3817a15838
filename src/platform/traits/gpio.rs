//! Digital pin traits
//!
//! These are the only I/O seams the crate consumes: the button detector reads
//! an [`InputPin`], and output-driving tasks (blink, oscillating events) hold
//! an [`OutputPin`]. The scheduler core itself never touches pins.

use crate::platform::Result;

/// Digital input line
pub trait InputPin {
    /// Read the current logic level (`true` = high)
    fn is_high(&self) -> bool;

    /// Read the inverted logic level
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Digital output line
///
/// # Errors
///
/// Implementations return `PlatformError::Gpio(GpioError::NotAnOutput)` when
/// the underlying pin cannot be driven (e.g. a mock pin configured as an
/// input).
pub trait OutputPin {
    /// Drive the line high
    fn set_high(&mut self) -> Result<()>;

    /// Drive the line low
    fn set_low(&mut self) -> Result<()>;

    /// Invert the current output level
    fn toggle(&mut self) -> Result<()>;

    /// Last level the line was driven to (`true` = high)
    fn is_set_high(&self) -> bool;

    /// Drive the line to an explicit level
    fn set_state(&mut self, high: bool) -> Result<()> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}
