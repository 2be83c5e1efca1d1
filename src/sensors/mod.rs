//! Sensor subsystem: the analog sampler, the temperature conversion and
//! the per-cycle smoothing accumulator.
//!
//! One decision cycle accumulates `reads_per_cycle` averaged reads into a
//! [`SamplingCycle`], whose mean is the smoothed sample fed to the
//! temperature conversion.

pub mod analog;
pub mod temperature;

use heapless::Vec;

use crate::config::MAX_READS_PER_CYCLE;

/// Raw reads collected during one decision cycle.
#[derive(Debug, Clone, Default)]
pub struct SamplingCycle {
    reads: Vec<u16, MAX_READS_PER_CYCLE>,
    sum: f32,
}

impl SamplingCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one averaged read. Returns `false` once the cycle is full.
    pub fn push(&mut self, raw: u16) -> bool {
        if self.reads.push(raw).is_err() {
            return false;
        }
        self.sum += f32::from(raw);
        true
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    /// Smoothed sample: arithmetic mean of the recorded reads.
    pub fn mean(&self) -> Option<f32> {
        if self.reads.is_empty() {
            return None;
        }
        Some(self.sum / self.reads.len() as f32)
    }

    pub(crate) fn into_reads(self) -> Vec<u16, MAX_READS_PER_CYCLE> {
        self.reads
    }
}
