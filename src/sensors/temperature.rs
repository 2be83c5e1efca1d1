//! Linear Kelvin-scale temperature sensor (10 mV/K, LM335 class).
//!
//! The sensor output is proportional to absolute temperature, so a
//! smoothed ADC sample converts with a single linear step:
//!
//! ```text
//! kelvin     = (sample / full_scale) * v_ref * 100
//! fahrenheit = (kelvin - 273.15) * 1.8 + 32
//! ```
//!
//! `v_ref` is the measured supply voltage of the physical unit and must be
//! re-measured whenever the board or its regulator changes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Sample → temperature calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Measured ADC reference (supply) voltage.
    pub v_ref: f32,
    /// Offset between Kelvin and Celsius.
    pub kelvin_offset: f32,
    /// Code of a full-scale conversion.
    pub full_scale: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            v_ref: 5.134, // measured on the reference unit
            kelvin_offset: 273.15,
            full_scale: 1023.0,
        }
    }
}

impl Calibration {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.v_ref > 0.0 && self.v_ref.is_finite()) {
            return Err("v_ref must be positive");
        }
        if !(self.full_scale > 0.0 && self.full_scale.is_finite()) {
            return Err("full_scale must be positive");
        }
        Ok(())
    }

    /// Convert a smoothed sample into a temperature.
    pub fn to_temperature(self, sample_average: f32) -> Temperature {
        let kelvin = (sample_average / self.full_scale) * self.v_ref * 100.0;
        let celsius = kelvin - self.kelvin_offset;
        Temperature::from_fahrenheit(celsius * 1.8 + 32.0)
    }

    /// Smoothed sample that would read as `temp`.
    pub fn sample_for(self, temp: Temperature) -> f32 {
        let kelvin = (temp.fahrenheit() - 32.0) / 1.8 + self.kelvin_offset;
        kelvin / (self.v_ref * 100.0) * self.full_scale
    }
}

/// Convert with the shipped calibration.
pub fn to_temperature(sample_average: f32) -> Temperature {
    Calibration::default().to_temperature(sample_average)
}

/// A temperature in degrees Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature {
    fahrenheit: f32,
}

impl Temperature {
    pub const fn from_fahrenheit(fahrenheit: f32) -> Self {
        Self { fahrenheit }
    }

    pub const fn fahrenheit(self) -> f32 {
        self.fahrenheit
    }

    pub fn celsius(self) -> f32 {
        (self.fahrenheit - 32.0) / 1.8
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}\u{00b0}F", self.fahrenheit)
    }
}
