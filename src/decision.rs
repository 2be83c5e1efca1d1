//! Temperature decision core.
//!
//! Maps a Fahrenheit temperature onto exactly one [`IndicatorState`] and
//! each state onto a fixed LED pattern.
//!
//! ```text
//!   ColdAlert │  Cold  │  Comfortable  │  Hot  │  HotAlert
//!  ───────────┼────────┼───────────────┼───────┼───────────▶ °F
//!            62       65              71      74
//!          (≤62)  (62,65)          [65,71]  (71,74)  (≥74)
//! ```
//!
//! Comparisons are evaluated top-down in a single function, so a reading
//! on a boundary can only ever land in one band.

use serde::{Deserialize, Serialize};

use crate::drivers::status_led::Line;
use crate::sensors::temperature::Temperature;

/// Discrete indicator state derived from one temperature decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorState {
    ColdAlert,
    Cold,
    Comfortable,
    Hot,
    HotAlert,
}

impl IndicatorState {
    pub const ALL: [Self; 5] = [
        Self::ColdAlert,
        Self::Cold,
        Self::Comfortable,
        Self::Hot,
        Self::HotAlert,
    ];

    /// Fixed LED combination for this state.
    pub const fn pattern(self) -> IndicatorPattern {
        match self {
            Self::HotAlert => IndicatorPattern {
                red: true,
                green: false,
                blue: false,
                blink: Some(Line::Red),
            },
            Self::Hot => IndicatorPattern {
                red: true,
                green: false,
                blue: false,
                blink: None,
            },
            Self::Comfortable => IndicatorPattern {
                red: true,
                green: true,
                blue: true,
                blink: None,
            },
            Self::Cold => IndicatorPattern {
                red: false,
                green: false,
                blue: true,
                blink: None,
            },
            Self::ColdAlert => IndicatorPattern {
                red: false,
                green: false,
                blue: true,
                blink: Some(Line::Blue),
            },
        }
    }

    pub const fn is_alert(self) -> bool {
        matches!(self, Self::ColdAlert | Self::HotAlert)
    }
}

/// Which lines are lit once a state has settled, plus the optional
/// escalation blink performed before settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPattern {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub blink: Option<Line>,
}

impl IndicatorPattern {
    /// Settled level of `line`.
    pub const fn is_lit(&self, line: Line) -> bool {
        match line {
            Line::Red => self.red,
            Line::Green => self.green,
            Line::Blue => self.blue,
        }
    }
}

/// Fahrenheit band edges.
///
/// `low_alert` and `high_alert` are inclusive edges of the alert bands;
/// `low` and `high` are inclusive edges of the comfortable band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low_alert: f32,
    pub low: f32,
    pub high: f32,
    pub high_alert: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_alert: 62.0,
            low: 65.0,
            high: 71.0,
            high_alert: 74.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.low_alert < self.low && self.low <= self.high && self.high < self.high_alert) {
            return Err("thresholds must satisfy low_alert < low <= high < high_alert");
        }
        Ok(())
    }

    /// Total classification: every input, including NaN, yields one state.
    ///
    /// NaN fails every comparison and falls through to `ColdAlert`.
    pub fn classify(&self, temp: Temperature) -> IndicatorState {
        let f = temp.fahrenheit();
        if f >= self.high_alert {
            IndicatorState::HotAlert
        } else if f > self.high {
            IndicatorState::Hot
        } else if f >= self.low {
            IndicatorState::Comfortable
        } else if f > self.low_alert {
            IndicatorState::Cold
        } else {
            IndicatorState::ColdAlert
        }
    }
}

/// Classify against the shipped thresholds.
pub fn classify(temp: Temperature) -> IndicatorState {
    Thresholds::default().classify(temp)
}
