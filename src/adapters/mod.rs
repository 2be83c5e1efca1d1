//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                  |
//! |------------|----------------|------------------------------|
//! | `hardware` | SamplerPort    | ESP32 ADC1 (oneshot)         |
//! |            | IndicatorPort  | ESP32 GPIO (R/G/B LEDs)      |
//! | `log_sink` | EventSink      | Serial log output            |

pub mod hardware;
pub mod log_sink;
