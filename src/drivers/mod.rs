//! Peripheral drivers, hardware initialisation, and timing helpers.

pub mod adc;
pub mod delay;
pub mod gpio_line;
pub mod hw_init;
pub mod status_led;
