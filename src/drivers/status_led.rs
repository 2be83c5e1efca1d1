//! Tri-colour indicator LED driver.
//!
//! Three discrete LEDs (red, green, blue) on plain GPIO outputs. The board
//! wires them to VCC through resistors, so a line is lit when its pin is
//! driven LOW ([`Polarity::ActiveLow`]).
//!
//! ## Dual-target design
//!
//! Generic over `embedded_hal` [`OutputPin`] and [`DelayNs`]: on ESP-IDF the
//! pins are [`GpioLine`](super::gpio_line::GpioLine)s, on host/test any
//! recording pin works.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::ports::IndicatorPort;
use crate::error::IndicatorError;

/// One indicator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Red,
    Green,
    Blue,
}

impl Line {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Blue => write!(f, "blue"),
        }
    }
}

/// Electrical level that lights an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// LED lit when the pin is LOW (sinking current).
    ActiveLow,
    /// LED lit when the pin is HIGH (sourcing current).
    ActiveHigh,
}

impl Polarity {
    pub const fn level(self, lit: bool) -> PinState {
        match (self, lit) {
            (Self::ActiveLow, true) | (Self::ActiveHigh, false) => PinState::Low,
            (Self::ActiveLow, false) | (Self::ActiveHigh, true) => PinState::High,
        }
    }
}

/// Drives the three indicator lines and owns the blink timing.
pub struct IndicatorLeds<P: OutputPin, D: DelayNs> {
    pins: [P; 3],
    delay: D,
    polarity: Polarity,
    blink_half_period_ms: u32,
    lit: [bool; 3],
}

impl<P: OutputPin, D: DelayNs> IndicatorLeds<P, D> {
    pub fn new(
        red: P,
        green: P,
        blue: P,
        delay: D,
        polarity: Polarity,
        blink_half_period_ms: u32,
    ) -> Self {
        Self {
            pins: [red, green, blue],
            delay,
            polarity,
            blink_half_period_ms,
            lit: [false; 3],
        }
    }

    /// Last level commanded on `line` (shadow state, pins are never read).
    pub fn is_lit(&self, line: Line) -> bool {
        self.lit[line.index()]
    }

    /// `(red, green, blue)` shadow state.
    pub fn current(&self) -> (bool, bool, bool) {
        (self.lit[0], self.lit[1], self.lit[2])
    }

    /// Release the pins and delay (tests inspect recorded levels).
    pub fn release(self) -> ([P; 3], D) {
        (self.pins, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> IndicatorPort for IndicatorLeds<P, D> {
    fn set(&mut self, line: Line, on: bool) -> Result<(), IndicatorError> {
        let level = self.polarity.level(on);
        self.pins[line.index()]
            .set_state(level)
            .map_err(|_| IndicatorError::PinWriteFailed(line))?;
        self.lit[line.index()] = on;
        Ok(())
    }

    fn blink(&mut self, line: Line, count: u8) -> Result<(), IndicatorError> {
        debug!("blink {} x{}", line, count);
        for _ in 0..count {
            self.set(line, false)?;
            self.delay.delay_ms(self.blink_half_period_ms);
            self.set(line, true)?;
            self.delay.delay_ms(self.blink_half_period_ms);
        }
        Ok(())
    }

    fn all_off(&mut self) -> Result<(), IndicatorError> {
        for line in Line::ALL {
            self.set(line, false)?;
        }
        Ok(())
    }
}
