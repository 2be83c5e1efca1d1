//! Port traits: the hexagonal boundary between domain logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (ADC sampler, indicator LEDs, event sinks) implement
//! these traits. The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the decision core never touches hardware
//! directly.

use crate::drivers::status_led::Line;
use crate::error::{IndicatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sampler port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain averaged ADC samples.
pub trait SamplerPort {
    /// Select the sensor channel and conversion clock. Call once, before
    /// the first read.
    fn configure(&mut self);

    /// One oversampled 10-bit reading (0..=1023).
    ///
    /// Blocks until every conversion completes. The converter is powered
    /// down again before this returns, on success and on error.
    fn read_averaged(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the indicator LEDs.
pub trait IndicatorPort {
    /// Light (`on = true`) or darken a single line.
    fn set(&mut self, line: Line, on: bool) -> Result<(), IndicatorError>;

    /// Toggle `line` dark/lit `count` times, blocking for the sequence.
    /// The line is left lit when `count > 0`.
    fn blink(&mut self, line: Line, count: u8) -> Result<(), IndicatorError>;

    /// Darken every line.
    fn all_off(&mut self) -> Result<(), IndicatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
