//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger → UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | lines dark, ADC configured");
            }
            AppEvent::CycleCompleted(r) => {
                info!(
                    "CYCLE | n={} | avg={:.2} spread={} | T={} | state={:?}",
                    r.cycle,
                    r.smoothed,
                    r.spread(),
                    r.temperature,
                    r.state,
                );
                if log::log_enabled!(log::Level::Debug) {
                    match serde_json::to_string(r) {
                        Ok(json) => debug!("CYCLE | {}", json),
                        Err(e) => debug!("CYCLE | report not serialisable: {}", e),
                    }
                }
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SensorFault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
