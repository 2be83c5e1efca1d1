//! Nursery monitor firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter                  LogEventSink           │
//! │  (SamplerPort + IndicatorPort)    (EventSink)            │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           MonitorService (pure logic)          │      │
//! │  │   SamplingCycle · Calibration · Thresholds     │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info};

use nursery_monitor::adapters::hardware::HardwareAdapter;
use nursery_monitor::adapters::log_sink::LogEventSink;
use nursery_monitor::app::service::MonitorService;
use nursery_monitor::config::MonitorConfig;
use nursery_monitor::drivers::delay::SystemDelay;
use nursery_monitor::drivers::hw_init;
use nursery_monitor::sensors::analog::AdcPrescaler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Nursery monitor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Fixed configuration ────────────────────────────────
    let mut service =
        MonitorService::new(MonitorConfig::default()).context("invalid configuration")?;
    let config = service.config().clone();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => info!("Config: {:?} ({})", config, e),
    }

    let prescaler = AdcPrescaler::select(config.system_clock_hz, config.max_adc_clock_hz);
    info!(
        "ADC clock: {} Hz / {} = {} Hz",
        config.system_clock_hz,
        prescaler.divisor(),
        prescaler.adc_clock_hz(config.system_clock_hz)
    );

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(config.polarity) {
        // Without the indicator outputs there is nothing useful to do.
        error!("HAL init failed, halting: {}", e);
        return Err(e).context("peripheral init");
    }

    let mut hw = HardwareAdapter::from_config(&config);
    let mut delay = SystemDelay::new();
    let mut sink = LogEventSink::new();

    // ── 4. Control loop ───────────────────────────────────────
    service.start(&mut hw, &mut sink).context("service start")?;

    info!("System ready. Entering control loop.");
    service.run(&mut hw, &mut delay, &mut sink)
}
