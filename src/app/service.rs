//! Application service: the hexagonal core.
//!
//! [`MonitorService`] runs the sampling cycle and the temperature
//! decision. All I/O flows through port traits injected at call sites,
//! making the whole loop testable with mock adapters.
//!
//! ```text
//!  SamplerPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                  │       MonitorService         │
//! IndicatorPort ◀──│ smooth · convert · classify  │
//!                  └─────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::config::MonitorConfig;
use crate::decision::IndicatorState;
use crate::drivers::delay::wait_ms;
use crate::drivers::status_led::Line;
use crate::error::{Error, IndicatorError, Result};
use crate::sensors::SamplingCycle;

use super::events::{AppEvent, CycleReport};
use super::ports::{EventSink, IndicatorPort, SamplerPort};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    config: MonitorConfig,
    last_state: Option<IndicatorState>,
    cycle_count: u64,
}

impl MonitorService {
    /// Build a service around a validated configuration.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        Ok(Self {
            config,
            last_state: None,
            cycle_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Darken every line, then configure the sampler (once).
    pub fn start(
        &mut self,
        hw: &mut (impl SamplerPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        hw.all_off()?;
        hw.configure();
        sink.emit(&AppEvent::Started);
        info!(
            "MonitorService started ({} reads x {} ms per decision)",
            self.config.reads_per_cycle, self.config.sample_pause_ms
        );
        Ok(())
    }

    /// Run decision cycles forever.
    ///
    /// A failed cycle is logged and the next one starts immediately; the
    /// loop itself never ends.
    pub fn run(
        &mut self,
        hw: &mut (impl SamplerPort + IndicatorPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            if let Err(e) = self.run_cycle(hw, delay, sink) {
                error!("cycle {} failed: {}", self.cycle_count, e);
            }
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One full decision: sample → smooth → convert → classify → apply.
    ///
    /// Each averaged read is followed by the configured pause. A sensor
    /// error abandons the cycle, darkens the indicator and is returned.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SamplerPort + IndicatorPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<CycleReport> {
        self.cycle_count += 1;

        let mut cycle = SamplingCycle::new();
        for _ in 0..self.config.reads_per_cycle {
            let raw = match hw.read_averaged() {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("sensor fault, indicator darkened: {}", e);
                    sink.emit(&AppEvent::SensorFault(e));
                    self.last_state = None;
                    hw.all_off()?;
                    return Err(e.into());
                }
            };
            if !cycle.push(raw) {
                return Err(Error::Config("sampling cycle overflow"));
            }
            wait_ms(delay, self.config.sample_pause_ms);
        }

        let smoothed = cycle
            .mean()
            .ok_or(Error::Config("sampling cycle has no reads"))?;
        let temperature = self.config.calibration.to_temperature(smoothed);
        let state = self.config.thresholds.classify(temperature);

        self.apply(state, hw)?;

        let report = CycleReport {
            cycle: self.cycle_count,
            reads: cycle.into_reads(),
            smoothed,
            temperature,
            state,
        };

        if self.last_state != Some(state) {
            sink.emit(&AppEvent::StateChanged {
                from: self.last_state,
                to: state,
            });
            self.last_state = Some(state);
        }
        sink.emit(&AppEvent::CycleCompleted(report.clone()));
        Ok(report)
    }

    /// Drive the indicator into `state`.
    ///
    /// Dark lines are cleared first, then the alert blink (if any) runs,
    /// then the lit lines are asserted.
    pub fn apply(
        &self,
        state: IndicatorState,
        hw: &mut impl IndicatorPort,
    ) -> core::result::Result<(), IndicatorError> {
        let pattern = state.pattern();
        for line in Line::ALL {
            if !pattern.is_lit(line) {
                hw.set(line, false)?;
            }
        }
        if let Some(line) = pattern.blink {
            hw.blink(line, self.config.alert_blink_count)?;
        }
        for line in Line::ALL {
            if pattern.is_lit(line) {
                hw.set(line, true)?;
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// State applied by the last successful cycle.
    pub fn state(&self) -> Option<IndicatorState> {
        self.last_state
    }

    /// Cycles attempted since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
