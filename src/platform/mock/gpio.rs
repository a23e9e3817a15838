//! Mock pin implementation for testing

use core::cell::Cell;

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{InputPin, OutputPin},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinMode {
    Input,
    Output,
}

/// Mock digital pin
///
/// Tracks level and toggle count for test verification. `OutputPin` is also
/// implemented for `&MockPin`, so a test can hand `&pin` to a task and keep
/// its own reference to observe the level while the task runs.
#[derive(Debug)]
pub struct MockPin {
    mode: PinMode,
    level: Cell<bool>,
    toggles: Cell<u32>,
}

impl MockPin {
    /// Create a new mock pin in output mode, driven low
    pub fn new_output() -> Self {
        Self {
            mode: PinMode::Output,
            level: Cell::new(false),
            toggles: Cell::new(0),
        }
    }

    /// Create a new mock pin in input mode, resting low
    pub fn new_input() -> Self {
        Self {
            mode: PinMode::Input,
            level: Cell::new(false),
            toggles: Cell::new(0),
        }
    }

    /// Simulate an external signal on an input pin
    pub fn drive(&self, high: bool) {
        self.level.set(high);
    }

    /// Number of output transitions performed through `OutputPin`
    pub fn toggle_count(&self) -> u32 {
        self.toggles.get()
    }

    fn write(&self, high: bool) -> Result<()> {
        if self.mode != PinMode::Output {
            return Err(PlatformError::Gpio(GpioError::NotAnOutput));
        }
        if self.level.get() != high {
            self.toggles.set(self.toggles.get() + 1);
        }
        self.level.set(high);
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<()> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.write(false)
    }

    fn toggle(&mut self) -> Result<()> {
        let level = self.level.get();
        self.write(!level)
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

impl OutputPin for &MockPin {
    fn set_high(&mut self) -> Result<()> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.write(false)
    }

    fn toggle(&mut self) -> Result<()> {
        let level = self.level.get();
        self.write(!level)
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}
