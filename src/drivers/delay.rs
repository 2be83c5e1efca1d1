//! Blocking delay provider.
//!
//! - **`target_os = "espidf"`**: wraps `esp_idf_hal::delay::FreeRtos`,
//!   which yields to the scheduler for the requested time.
//! - **`not(target_os = "espidf")`**: uses `std::thread::sleep` for
//!   host-side simulation.
//!
//! Long waits are issued in [`DELAY_UNIT_MS`] steps so no single call
//! asks the underlying timer for more than one unit.

use embedded_hal::delay::DelayNs;

/// Granularity of long waits.
pub const DELAY_UNIT_MS: u32 = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDelay;

impl SystemDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Wait `ms` milliseconds in [`DELAY_UNIT_MS`] steps plus any remainder.
pub fn wait_ms(delay: &mut impl DelayNs, ms: u32) {
    for _ in 0..ms / DELAY_UNIT_MS {
        delay.delay_ms(DELAY_UNIT_MS);
    }
    let rest = ms % DELAY_UNIT_MS;
    if rest > 0 {
        delay.delay_ms(rest);
    }
}
