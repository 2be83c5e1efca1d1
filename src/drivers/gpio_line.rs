//! Push-pull GPIO output exposed as an `embedded_hal` [`OutputPin`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the pin level through `hw_init::gpio_write`.
//! On host/test: the level is kept in memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::drivers::hw_init;

pub struct GpioLine {
    gpio: i32,
    high: bool,
}

impl GpioLine {
    /// Wrap an output pin already configured by `hw_init`.
    pub fn new(gpio: i32, initially_high: bool) -> Self {
        Self {
            gpio,
            high: initially_high,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioLine {
    type Error = Infallible;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for GpioLine {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
