//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use heapless::Vec;
use serde::Serialize;

use crate::config::MAX_READS_PER_CYCLE;
use crate::decision::IndicatorState;
use crate::error::SensorError;
use crate::sensors::temperature::Temperature;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Lines darkened and sampler configured.
    Started,

    /// A decision cycle finished and the indicator was updated.
    CycleCompleted(CycleReport),

    /// The indicator state differs from the previous cycle.
    StateChanged {
        from: Option<IndicatorState>,
        to: IndicatorState,
    },

    /// A read failed; the cycle was abandoned and every line darkened.
    SensorFault(SensorError),
}

/// Everything one decision cycle observed and decided.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// 1-based cycle counter since start.
    pub cycle: u64,
    /// Averaged reads in acquisition order.
    pub reads: Vec<u16, MAX_READS_PER_CYCLE>,
    /// Mean of `reads`.
    pub smoothed: f32,
    pub temperature: Temperature,
    pub state: IndicatorState,
}

impl CycleReport {
    /// `max - min` of the raw reads; a noisy sensor shows up here first.
    pub fn spread(&self) -> u16 {
        let min = self.reads.iter().copied().min().unwrap_or(0);
        let max = self.reads.iter().copied().max().unwrap_or(0);
        max - min
    }
}
