//! Analog sampler: power-gated, oversampled ADC reads.
//!
//! Each [`AnalogSampler::read_averaged`] call powers the converter up,
//! throws away the first conversion (unreliable right after enable),
//! averages [`CONVERSIONS_PER_READ`] conversions and powers the
//! converter back down. The peripheral is disabled on every return path.
//!
//! Register access is confined to an [`AdcPeripheral`] handle owned by the
//! sampler; the board ADC lives in [`crate::drivers::adc`].

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::SamplerPort;
use crate::error::SensorError;

/// Conversions averaged into one raw sample.
pub const CONVERSIONS_PER_READ: usize = 8;
/// `log2(CONVERSIONS_PER_READ)`; the average is a right shift.
const AVERAGE_SHIFT: u32 = 3;
/// Largest code a 10-bit conversion produces.
pub const RAW_SAMPLE_MAX: u16 = 1023;

/// Conversion clock divider applied to the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdcPrescaler {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
}

impl AdcPrescaler {
    const ALL: [Self; 7] = [
        Self::Div2,
        Self::Div4,
        Self::Div8,
        Self::Div16,
        Self::Div32,
        Self::Div64,
        Self::Div128,
    ];

    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
            Self::Div16 => 16,
            Self::Div32 => 32,
            Self::Div64 => 64,
            Self::Div128 => 128,
        }
    }

    /// Smallest divider keeping the conversion clock at or below `max_adc_hz`.
    ///
    /// Falls back to the largest divider when even /128 is too fast.
    pub fn select(system_hz: u32, max_adc_hz: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| system_hz / p.divisor() <= max_adc_hz)
            .unwrap_or(Self::Div128)
    }

    pub const fn adc_clock_hz(self, system_hz: u32) -> u32 {
        system_hz / self.divisor()
    }
}

/// How long to wait for the conversion-complete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdcPollPolicy {
    /// Spin until the flag sets. A stuck converter hangs the caller.
    Unbounded,
    /// Give up after `max_polls` reads of the flag.
    Bounded { max_polls: u32 },
}

/// Register-level operations of a successive-approximation ADC.
///
/// One implementation drives the board converter, tests supply fakes.
pub trait AdcPeripheral {
    /// Route `channel` to the converter and program the clock divider.
    fn configure(&mut self, channel: u8, prescaler: AdcPrescaler);
    /// Power the converter up.
    fn enable(&mut self);
    /// Power the converter down.
    fn disable(&mut self);
    /// Trigger a single conversion.
    fn start_conversion(&mut self);
    /// Conversion-complete flag.
    fn is_conversion_complete(&mut self) -> bool;
    /// 10-bit result of the last completed conversion.
    fn result(&mut self) -> u16;
}

/// Average one read's worth of conversions: `floor(sum / 8)`.
pub fn average_conversions(conversions: &[u16; CONVERSIONS_PER_READ]) -> u16 {
    let sum: u32 = conversions.iter().map(|&c| u32::from(c)).sum();
    (sum >> AVERAGE_SHIFT) as u16
}

/// Owns the ADC handle and implements the oversampled read sequence.
pub struct AnalogSampler<A: AdcPeripheral> {
    adc: A,
    channel: u8,
    prescaler: AdcPrescaler,
    poll: AdcPollPolicy,
    configured: bool,
}

impl<A: AdcPeripheral> AnalogSampler<A> {
    pub fn new(adc: A, channel: u8, prescaler: AdcPrescaler, poll: AdcPollPolicy) -> Self {
        Self {
            adc,
            channel,
            prescaler,
            poll,
            configured: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn prescaler(&self) -> AdcPrescaler {
        self.prescaler
    }

    /// Borrow the underlying peripheral (simulation hooks, tests).
    pub fn peripheral_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    fn convert(&mut self) -> Result<u16, SensorError> {
        self.adc.start_conversion();
        match self.poll {
            AdcPollPolicy::Unbounded => {
                while !self.adc.is_conversion_complete() {
                    core::hint::spin_loop();
                }
            }
            AdcPollPolicy::Bounded { max_polls } => {
                let mut polls = 0;
                while !self.adc.is_conversion_complete() {
                    polls += 1;
                    if polls >= max_polls {
                        return Err(SensorError::ConversionTimeout);
                    }
                    core::hint::spin_loop();
                }
            }
        }
        Ok(self.adc.result().min(RAW_SAMPLE_MAX))
    }

    fn convert_batch(&mut self) -> Result<u16, SensorError> {
        // First conversion after enable settles the sample-and-hold.
        self.convert()?;

        let mut conversions = [0u16; CONVERSIONS_PER_READ];
        for slot in &mut conversions {
            *slot = self.convert()?;
        }
        Ok(average_conversions(&conversions))
    }
}

impl<A: AdcPeripheral> SamplerPort for AnalogSampler<A> {
    fn configure(&mut self) {
        self.adc.configure(self.channel, self.prescaler);
        self.configured = true;
        debug!(
            "ADC configured: channel={} prescaler=/{}",
            self.channel,
            self.prescaler.divisor()
        );
    }

    fn read_averaged(&mut self) -> Result<u16, SensorError> {
        if !self.configured {
            return Err(SensorError::NotConfigured);
        }
        self.adc.enable();
        let result = self.convert_batch();
        self.adc.disable();
        if let Err(e) = result {
            warn!("ADC read aborted: {}", e);
        }
        result
    }
}
