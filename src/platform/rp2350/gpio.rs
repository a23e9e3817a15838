//! GPIO adapters over embassy-rp pins

use embassy_rp::gpio::{Input, Output};

use crate::platform::{
    traits::{InputPin, OutputPin},
    Result,
};

/// Input pin adapter
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Output pin adapter
///
/// embassy-rp pin writes are infallible, so every operation returns `Ok`.
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) -> Result<()> {
        self.pin.set_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin.set_low();
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        self.pin.toggle();
        Ok(())
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
