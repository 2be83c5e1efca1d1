//! GPIO / peripheral pin assignments for the nursery monitor board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Indicator LEDs (discrete, wired to VCC, active LOW)
// ---------------------------------------------------------------------------

pub const LED_RED_GPIO: i32 = 11;
pub const LED_GREEN_GPIO: i32 = 12;
pub const LED_BLUE_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Temperature sensor, analog (ADC1)
// ---------------------------------------------------------------------------

/// Linear Kelvin-scale sensor (10 mV/K) on GPIO 9.
pub const TEMP_ADC_GPIO: i32 = 9;
/// ADC1 channel wired to [`TEMP_ADC_GPIO`].
pub const TEMP_ADC_CHANNEL: u8 = 8;
