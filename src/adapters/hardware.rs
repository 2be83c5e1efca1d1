//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`AnalogSampler`] (with its [`BoardAdc`]) and the
//! [`IndicatorLeds`], exposing them through [`SamplerPort`] and
//! [`IndicatorPort`]. This is the only module that assembles actual
//! hardware. On non-espidf targets, the underlying drivers use cfg-gated
//! simulation stubs.

use crate::app::ports::{IndicatorPort, SamplerPort};
use crate::config::MonitorConfig;
use crate::drivers::adc::BoardAdc;
use crate::drivers::delay::SystemDelay;
use crate::drivers::gpio_line::GpioLine;
use crate::drivers::hw_init::dark_level_high;
use crate::drivers::status_led::{IndicatorLeds, Line};
use crate::error::{IndicatorError, SensorError};
use crate::pins;
use crate::sensors::analog::{AdcPrescaler, AnalogSampler};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sampler: AnalogSampler<BoardAdc>,
    leds: IndicatorLeds<GpioLine, SystemDelay>,
}

impl HardwareAdapter {
    pub fn new(
        sampler: AnalogSampler<BoardAdc>,
        leds: IndicatorLeds<GpioLine, SystemDelay>,
    ) -> Self {
        Self { sampler, leds }
    }

    /// Assemble the board peripherals described by `config` and `pins`.
    pub fn from_config(config: &MonitorConfig) -> Self {
        let prescaler = AdcPrescaler::select(config.system_clock_hz, config.max_adc_clock_hz);
        let sampler = AnalogSampler::new(
            BoardAdc::new(),
            pins::TEMP_ADC_CHANNEL,
            prescaler,
            config.adc_poll,
        );

        let dark = dark_level_high(config.polarity);
        let leds = IndicatorLeds::new(
            GpioLine::new(pins::LED_RED_GPIO, dark),
            GpioLine::new(pins::LED_GREEN_GPIO, dark),
            GpioLine::new(pins::LED_BLUE_GPIO, dark),
            SystemDelay::new(),
            config.polarity,
            config.blink_half_period_ms,
        );

        Self::new(sampler, leds)
    }

    /// `(red, green, blue)` as last commanded.
    pub fn indicator(&self) -> (bool, bool, bool) {
        self.leds.current()
    }
}

// ── SamplerPort implementation ────────────────────────────────

impl SamplerPort for HardwareAdapter {
    fn configure(&mut self) {
        self.sampler.configure();
    }

    fn read_averaged(&mut self) -> Result<u16, SensorError> {
        self.sampler.read_averaged()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set(&mut self, line: Line, on: bool) -> Result<(), IndicatorError> {
        self.leds.set(line, on)
    }

    fn blink(&mut self, line: Line, count: u8) -> Result<(), IndicatorError> {
        self.leds.blink(line, count)
    }

    fn all_off(&mut self) -> Result<(), IndicatorError> {
        self.leds.all_off()
    }
}
