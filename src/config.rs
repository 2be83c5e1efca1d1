//! System configuration parameters
//!
//! Every fixed product constant for the nursery monitor lives here. Nothing
//! loads or persists configuration at runtime; `MonitorConfig::default()` is
//! the shipped configuration.

use serde::{Deserialize, Serialize};

use crate::decision::Thresholds;
use crate::drivers::status_led::Polarity;
use crate::sensors::analog::AdcPollPolicy;
use crate::sensors::temperature::Calibration;

/// Upper bound on averaged reads per decision cycle (sizes the report buffer).
pub const MAX_READS_PER_CYCLE: usize = 16;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Decision ---
    /// Fahrenheit thresholds for the five indicator states.
    pub thresholds: Thresholds,

    // --- Sensor ---
    /// Sample → temperature calibration (per physical unit).
    pub calibration: Calibration,
    /// Core clock feeding the ADC prescaler (Hz).
    pub system_clock_hz: u32,
    /// Highest conversion clock the ADC tolerates (Hz).
    pub max_adc_clock_hz: u32,
    /// How long `read_averaged` may poll the completion flag.
    pub adc_poll: AdcPollPolicy,

    // --- Timing ---
    /// Averaged reads accumulated into one decision.
    pub reads_per_cycle: u8,
    /// Pause after each averaged read (milliseconds).
    pub sample_pause_ms: u32,

    // --- Indicator ---
    /// Blinks performed before settling into an alert state.
    pub alert_blink_count: u8,
    /// Dark and lit half-period of one blink (milliseconds).
    pub blink_half_period_ms: u32,
    /// Electrical convention of the LED lines.
    pub polarity: Polarity,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Decision
            thresholds: Thresholds::default(),

            // Sensor
            calibration: Calibration::default(),
            system_clock_hz: 1_000_000, // 1 MHz core
            max_adc_clock_hz: 200_000,  // 50–200 kHz for full resolution
            adc_poll: AdcPollPolicy::Unbounded,

            // Timing
            reads_per_cycle: 16,
            sample_pause_ms: 1000, // 16 s per decision

            // Indicator
            alert_blink_count: 10,
            blink_half_period_ms: 200,
            polarity: Polarity::ActiveLow,
        }
    }
}

impl MonitorConfig {
    /// Reject configurations the control loop cannot run with.
    pub fn validate(&self) -> Result<(), &'static str> {
        self.thresholds.validate()?;
        self.calibration.validate()?;
        if self.system_clock_hz == 0 || self.max_adc_clock_hz == 0 {
            return Err("clock frequencies must be non-zero");
        }
        if self.reads_per_cycle == 0 || self.reads_per_cycle as usize > MAX_READS_PER_CYCLE {
            return Err("reads_per_cycle must be within 1..=16");
        }
        if let AdcPollPolicy::Bounded { max_polls: 0 } = self.adc_poll {
            return Err("bounded ADC poll needs at least one poll");
        }
        Ok(())
    }
}
