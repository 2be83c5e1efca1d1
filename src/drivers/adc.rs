//! Board ADC (ADC1, oneshot mode) behind the [`AdcPeripheral`] trait.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the oneshot unit is created on `enable()` and deleted on
//! `disable()`, so the converter is unpowered between reads. The 12-bit
//! result is scaled down to the 10-bit range the decision core expects.
//! The ESP32-S3 ADC clock is fixed by the driver; the requested prescaler
//! is recorded and logged only.
//!
//! On host/test: conversions return a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::{debug, error};

use crate::sensors::analog::{AdcPeripheral, AdcPrescaler};

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(584); // ≈ 68 °F

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

/// Bits dropped to bring a 12-bit conversion into the 10-bit range.
#[cfg(target_os = "espidf")]
const RESOLUTION_SHIFT: u32 = 2;

pub struct BoardAdc {
    channel: u8,
    prescaler: AdcPrescaler,
    enabled: bool,
    last: Option<u16>,
    #[cfg(target_os = "espidf")]
    unit: adc_oneshot_unit_handle_t,
}

impl Default for BoardAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardAdc {
    pub fn new() -> Self {
        Self {
            channel: 0,
            prescaler: AdcPrescaler::Div8,
            enabled: false,
            last: None,
            #[cfg(target_os = "espidf")]
            unit: core::ptr::null_mut(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn prescaler(&self) -> AdcPrescaler {
        self.prescaler
    }

    #[cfg(target_os = "espidf")]
    fn power_up(&mut self) {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        // SAFETY: `unit` is owned by this handle and only touched from the
        // single control-loop task.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut self.unit) };
        if ret != ESP_OK as i32 {
            error!("ADC1 unit create failed (rc={})", ret);
            self.unit = core::ptr::null_mut();
            return;
        }
        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        let ret = unsafe { adc_oneshot_config_channel(self.unit, u32::from(self.channel), &chan_cfg) };
        if ret != ESP_OK as i32 {
            error!("ADC1 channel {} config failed (rc={})", self.channel, ret);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn power_up(&mut self) {}

    #[cfg(target_os = "espidf")]
    fn power_down(&mut self) {
        if self.unit.is_null() {
            return;
        }
        // SAFETY: `unit` was created in power_up() and is not used after this.
        let ret = unsafe { adc_oneshot_del_unit(self.unit) };
        if ret != ESP_OK as i32 {
            error!("ADC1 unit delete failed (rc={})", ret);
        }
        self.unit = core::ptr::null_mut();
    }

    #[cfg(not(target_os = "espidf"))]
    fn power_down(&mut self) {}

    /// Oneshot reads block inside the driver; a failed read leaves no
    /// result, which the sampler sees as a conversion that never completes.
    #[cfg(target_os = "espidf")]
    fn sample(&mut self) -> Option<u16> {
        if self.unit.is_null() {
            return None;
        }
        let mut raw: i32 = 0;
        // SAFETY: single-threaded main-loop access to an owned, live unit.
        let ret = unsafe { adc_oneshot_read(self.unit, u32::from(self.channel), &mut raw) };
        if ret != ESP_OK as i32 {
            return None;
        }
        Some((raw.max(0) as u16) >> RESOLUTION_SHIFT)
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&mut self) -> Option<u16> {
        Some(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

impl AdcPeripheral for BoardAdc {
    fn configure(&mut self, channel: u8, prescaler: AdcPrescaler) {
        self.channel = channel;
        self.prescaler = prescaler;
        #[cfg(target_os = "espidf")]
        debug!(
            "ADC1: channel {} (requested /{} divider, driver-managed clock)",
            channel,
            prescaler.divisor()
        );
    }

    fn enable(&mut self) {
        if !self.enabled {
            self.power_up();
            self.enabled = true;
        }
    }

    fn disable(&mut self) {
        if self.enabled {
            self.power_down();
            self.enabled = false;
        }
        self.last = None;
    }

    fn start_conversion(&mut self) {
        self.last = if self.enabled { self.sample() } else { None };
    }

    fn is_conversion_complete(&mut self) -> bool {
        self.last.is_some()
    }

    fn result(&mut self) -> u16 {
        self.last.unwrap_or(0)
    }
}
